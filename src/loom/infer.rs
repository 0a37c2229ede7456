//! Inference: drawdown edit -> frame/treadle placement.

use super::scan::{matching_cols, matching_rows};
use super::{lowest_free, occurrences, CellChange, ChangeSet, Loom, Placement, TieUp};
use crate::drawdown::Drawdown;
use tracing::trace;

impl Loom {
    /// Choose the frame for warp `col` and the treadle for pick `row`,
    /// assuming that row and column of `drawdown` were just edited.
    ///
    /// A pick identical to another pick that already has a treadle reuses it
    /// (first such pick in scan order). Otherwise the pick keeps a treadle it
    /// has to itself, or takes the lowest unused treadle, which is
    /// `num_treadles()` when every treadle is taken. Frames follow the same
    /// rule over columns. Nothing is mutated.
    ///
    /// Returns `None` if the cell is outside the loom or the drawdown.
    pub fn infer_config<D: Drawdown + ?Sized>(
        &self,
        row: usize,
        col: usize,
        drawdown: &D,
    ) -> Option<Placement> {
        if row >= self.wefts()
            || col >= self.warps()
            || row >= drawdown.row_count()
            || col >= drawdown.col_count()
        {
            return None;
        }

        let treadle = choose_slot(
            &self.treadling,
            row,
            matching_rows(drawdown, row),
            self.num_treadles(),
        );
        let frame = choose_slot(
            &self.threading,
            col,
            matching_cols(drawdown, col),
            self.num_frames(),
        );

        Some(Placement { frame, treadle })
    }

    /// Assign warp `col` to `placement.frame` and pick `row` to
    /// `placement.treadle`, growing capacity as needed, then re-derive the
    /// tie-up from `drawdown` for every treadle in use.
    ///
    /// Out-of-range cells, and placements whose tie-up size would overflow,
    /// leave the loom untouched and return an empty set.
    pub fn apply_config<D: Drawdown + ?Sized>(
        &mut self,
        placement: Placement,
        row: usize,
        col: usize,
        drawdown: &D,
    ) -> ChangeSet {
        if row >= self.wefts() || col >= self.warps() {
            return ChangeSet::default();
        }
        let (Some(frames), Some(treadles)) = (
            placement.frame.checked_add(1),
            placement.treadle.checked_add(1),
        ) else {
            return ChangeSet::default();
        };
        if !TieUp::can_hold(
            frames.max(self.num_frames()),
            treadles.max(self.num_treadles()),
        ) {
            return ChangeSet::default();
        }

        let before = self.tieup.clone();
        let mut changes = ChangeSet {
            frames_added: self.ensure_frames(frames),
            treadles_added: self.ensure_treadles(treadles),
            ..ChangeSet::default()
        };

        if let Some(old) = reassign(&mut self.threading, col, placement.frame) {
            if let Some(old_frame) = old {
                changes.threading.push(CellChange::new(old_frame, col, false));
            }
            changes
                .threading
                .push(CellChange::new(placement.frame, col, true));
        }

        if let Some(old) = reassign(&mut self.treadling, row, placement.treadle) {
            if let Some(old_treadle) = old {
                changes.treadling.push(CellChange::new(row, old_treadle, false));
            }
            changes
                .treadling
                .push(CellChange::new(row, placement.treadle, true));
        }

        self.rederive_tieup(drawdown);
        changes.tieup = self
            .tieup
            .diff_from(&before)
            .into_iter()
            .map(|(frame, treadle, value)| CellChange::new(frame, treadle, value))
            .collect();

        trace!(
            row,
            col,
            frame = placement.frame,
            treadle = placement.treadle,
            tieup_changes = changes.tieup.len(),
            "Applied placement"
        );
        changes
    }

    /// Infer and apply in one step for an edited drawdown cell.
    pub fn update_from_drawdown<D: Drawdown + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        drawdown: &D,
    ) -> ChangeSet {
        match self.infer_config(row, col, drawdown) {
            Some(placement) => self.apply_config(placement, row, col, drawdown),
            None => ChangeSet::default(),
        }
    }

    /// Rebuild each used treadle's tie-up column from the first pick on it.
    pub(crate) fn rederive_tieup<D: Drawdown + ?Sized>(&mut self, drawdown: &D) {
        let warps = self.warps().min(drawdown.col_count());
        for treadle in 0..self.num_treadles() {
            let Some(pick) = self.treadling.iter().position(|t| *t == Some(treadle)) else {
                continue;
            };

            self.tieup.clear_treadle(treadle);
            for warp in 0..warps {
                if !drawdown.is_up(pick, warp) {
                    continue;
                }
                if let Some(frame) = self.threading[warp] {
                    self.tieup.set(frame, treadle, true);
                }
            }
        }
    }
}

/// Pick an index for `position` given the positions identical to it.
fn choose_slot(
    assignments: &[Option<usize>],
    position: usize,
    mut identical: impl Iterator<Item = usize>,
    capacity: usize,
) -> usize {
    if let Some(shared) = identical.find_map(|other| assignments.get(other).copied().flatten()) {
        return shared;
    }

    match assignments[position] {
        Some(own) if occurrences(assignments, own) == 1 => own,
        _ => lowest_free(assignments, capacity),
    }
}

/// Point `position` at `index`. Returns the previous value if it changed.
fn reassign(
    assignments: &mut [Option<usize>],
    position: usize,
    index: usize,
) -> Option<Option<usize>> {
    let previous = assignments[position];
    if previous == Some(index) {
        return None;
    }
    assignments[position] = Some(index);
    Some(previous)
}
