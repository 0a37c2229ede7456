//! Thread and pick maintenance plus whole-drawdown operations.

use super::scan::{cols_equal, rows_equal};
use super::{Loom, TieUp};
use crate::drawdown::{Drawdown, Grid};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Two positions sharing a frame or treadle that the drawdown says differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conflict {
    Frame { frame: usize, warps: (usize, usize) },
    Treadle { treadle: usize, picks: (usize, usize) },
}

impl Loom {
    /// Insert an unassigned warp before position `at` (`at == warps()` appends).
    pub fn insert_warp(&mut self, at: usize) -> bool {
        if at > self.warps() {
            return false;
        }
        self.threading.insert(at, None);
        true
    }

    /// Remove warp `at`. Its frame stays allocated until the next `compact`.
    pub fn remove_warp(&mut self, at: usize) -> bool {
        if at >= self.warps() {
            return false;
        }
        let frame = self.threading.remove(at);
        debug!(warp = at, ?frame, "Removed warp");
        true
    }

    /// Insert an unassigned pick before position `at` (`at == wefts()` appends).
    pub fn insert_weft(&mut self, at: usize) -> bool {
        if at > self.wefts() {
            return false;
        }
        self.treadling.insert(at, None);
        true
    }

    /// Remove pick `at`. Its treadle stays allocated until the next `compact`.
    pub fn remove_weft(&mut self, at: usize) -> bool {
        if at >= self.wefts() {
            return false;
        }
        let treadle = self.treadling.remove(at);
        debug!(pick = at, ?treadle, "Removed pick");
        true
    }

    /// Truncate or pad threading and treadling with unassigned positions.
    pub fn resize(&mut self, wefts: usize, warps: usize) {
        self.treadling.resize(wefts, None);
        self.threading.resize(warps, None);
    }

    /// Forget the current mechanization and infer one for the whole
    /// drawdown, cell by cell in row-major order.
    pub fn recompute_from_drawdown<D: Drawdown + ?Sized>(&mut self, drawdown: &D) {
        self.threading = vec![None; drawdown.col_count()];
        self.treadling = vec![None; drawdown.row_count()];
        self.tieup = TieUp::new(self.min_frames, self.min_treadles);

        for row in 0..drawdown.row_count() {
            for col in 0..drawdown.col_count() {
                self.update_from_drawdown(row, col, drawdown);
            }
        }

        debug!(
            wefts = self.wefts(),
            warps = self.warps(),
            num_frames = self.num_frames(),
            num_treadles = self.num_treadles(),
            "Recomputed loom from drawdown"
        );
    }

    /// The drawdown this mechanization weaves. Unassigned warps or picks
    /// produce down cells.
    pub fn derive_drawdown(&self) -> Grid {
        Grid::from_fn(self.wefts(), self.warps(), |pick, warp| {
            match (self.treadling[pick], self.threading[warp]) {
                (Some(treadle), Some(frame)) => self.tieup.get(frame, treadle),
                _ => false,
            }
        })
    }

    /// Positions that share a frame or treadle although `drawdown` says they
    /// differ. Direct edits can create these; inference never does.
    pub fn conflicts<D: Drawdown + ?Sized>(&self, drawdown: &D) -> Vec<Conflict> {
        let mut found = Vec::new();

        for (a, b, frame) in shared_pairs(&self.threading) {
            if !cols_equal(drawdown, a, b) {
                found.push(Conflict::Frame {
                    frame,
                    warps: (a, b),
                });
            }
        }
        for (a, b, treadle) in shared_pairs(&self.treadling) {
            if !rows_equal(drawdown, a, b) {
                found.push(Conflict::Treadle {
                    treadle,
                    picks: (a, b),
                });
            }
        }
        found
    }
}

/// Each position paired with the first earlier position holding the same index.
fn shared_pairs(assignments: &[Option<usize>]) -> Vec<(usize, usize, usize)> {
    let mut pairs = Vec::new();
    for (b, slot) in assignments.iter().enumerate() {
        let Some(index) = *slot else { continue };
        if let Some(a) = assignments[..b].iter().position(|s| *s == Some(index)) {
            pairs.push((a, b, index));
        }
    }
    pairs
}
