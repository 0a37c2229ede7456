//! Direct mechanization edits and their reverse propagation to the drawdown.

use super::{AffectedCells, CellChange, Loom, MechanismEdit};

impl Loom {
    /// Toggle warp `warp` on `frame` in the threading view.
    ///
    /// Setting replaces whatever frame the warp was on; clearing only acts if
    /// the warp is on `frame`. Out-of-range edits change nothing.
    pub fn edit_threading(&mut self, frame: usize, warp: usize, value: bool) -> Vec<CellChange> {
        if frame >= self.num_frames() || warp >= self.warps() {
            return Vec::new();
        }

        let current = self.threading[warp];
        let mut changes = Vec::new();
        if value {
            if current == Some(frame) {
                return changes;
            }
            if let Some(old) = current {
                changes.push(CellChange::new(old, warp, false));
            }
            self.threading[warp] = Some(frame);
            changes.push(CellChange::new(frame, warp, true));
        } else if current == Some(frame) {
            self.threading[warp] = None;
            changes.push(CellChange::new(frame, warp, false));
        }
        changes
    }

    /// Toggle pick `pick` on `treadle` in the treadling view.
    pub fn edit_treadling(&mut self, pick: usize, treadle: usize, value: bool) -> Vec<CellChange> {
        if pick >= self.wefts() || treadle >= self.num_treadles() {
            return Vec::new();
        }

        let current = self.treadling[pick];
        let mut changes = Vec::new();
        if value {
            if current == Some(treadle) {
                return changes;
            }
            if let Some(old) = current {
                changes.push(CellChange::new(pick, old, false));
            }
            self.treadling[pick] = Some(treadle);
            changes.push(CellChange::new(pick, treadle, true));
        } else if current == Some(treadle) {
            self.treadling[pick] = None;
            changes.push(CellChange::new(pick, treadle, false));
        }
        changes
    }

    /// Set one tie-up cell. A treadle may lift any number of frames, so there
    /// is nothing to clear.
    pub fn edit_tieup(&mut self, frame: usize, treadle: usize, value: bool) -> Vec<CellChange> {
        match self.tieup.set(frame, treadle, value) {
            Some(previous) if previous != value => vec![CellChange::new(frame, treadle, value)],
            _ => Vec::new(),
        }
    }

    /// Drawdown cells to recompute after `edit`.
    ///
    /// - threading (frame, warp): picks on treadles tied to the frame, in that
    ///   one warp column
    /// - tie-up (frame, treadle): picks on the treadle x warps on the frame
    /// - treadling (treadle, weft): that one pick x warps on frames tied to
    ///   the treadle
    pub fn affected_cells(&self, edit: MechanismEdit) -> AffectedCells {
        match edit {
            MechanismEdit::Threading { frame, warp } => {
                if frame >= self.num_frames() || warp >= self.warps() {
                    return AffectedCells::default();
                }
                let treadles = self.tieup.treadles_for_frame(frame);
                let wefts = self
                    .treadling
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.map_or(false, |t| treadles.contains(&t)))
                    .map(|(pick, _)| pick)
                    .collect();
                AffectedCells {
                    wefts,
                    warps: vec![warp],
                }
            }
            MechanismEdit::TieUp { frame, treadle } => {
                if frame >= self.num_frames() || treadle >= self.num_treadles() {
                    return AffectedCells::default();
                }
                AffectedCells {
                    wefts: self.picks_on_treadle(treadle),
                    warps: self.warps_on_frame(frame),
                }
            }
            MechanismEdit::Treadling { treadle, weft } => {
                if treadle >= self.num_treadles() || weft >= self.wefts() {
                    return AffectedCells::default();
                }
                let frames = self.tieup.frames_for_treadle(treadle);
                let warps = self
                    .threading
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| f.map_or(false, |f| frames.contains(&f)))
                    .map(|(warp, _)| warp)
                    .collect();
                AffectedCells {
                    wefts: vec![weft],
                    warps,
                }
            }
        }
    }
}
