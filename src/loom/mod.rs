//! Loom Engine
//!
//! Keeps a drawdown and a floor-loom mechanization mutually consistent. The
//! mechanization is the triple of threading (warp -> frame), treadling
//! (pick -> treadle) and tie-up (frame x treadle). The engine reads the
//! drawdown through [`Drawdown`](crate::drawdown::Drawdown) and never writes
//! it; the caller applies drawdown edits and uses the change lists returned
//! here to stay in sync.
//!
//! Capability groups live in their own files:
//! - `infer`: choose and apply a frame/treadle placement for an edited cell
//! - `edit`: direct threading/treadling/tie-up edits and reverse propagation
//! - `compact`: drop unused frames or treadles
//! - `resize`: thread/pick maintenance and whole-drawdown operations

mod compact;
mod edit;
mod infer;
mod resize;
pub mod scan;
mod tieup;

pub use resize::Conflict;
pub use tieup::TieUp;

use crate::error::LoomError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Frame and treadle chosen for one drawdown cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub frame: usize,
    pub treadle: usize,
}

/// One cell of a mechanization view that changed.
///
/// Threading view: `row` is the frame, `col` the warp. Treadling view: `row`
/// is the pick, `col` the treadle. Tie-up view: `row` is the frame, `col`
/// the treadle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub row: usize,
    pub col: usize,
    pub value: bool,
}

impl CellChange {
    pub fn new(row: usize, col: usize, value: bool) -> Self {
        CellChange { row, col, value }
    }
}

/// Everything `apply_config` changed, for incremental redraws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub threading: Vec<CellChange>,
    pub treadling: Vec<CellChange>,
    pub tieup: Vec<CellChange>,
    /// Frames appended to satisfy the placement.
    pub frames_added: usize,
    /// Treadles appended to satisfy the placement.
    pub treadles_added: usize,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.threading.is_empty()
            && self.treadling.is_empty()
            && self.tieup.is_empty()
            && self.frames_added == 0
            && self.treadles_added == 0
    }

    /// True if capacity grew, which needs a full redraw rather than a patch.
    pub fn resized(&self) -> bool {
        self.frames_added > 0 || self.treadles_added > 0
    }
}

/// A change expressed in mechanization terms, for [`Loom::affected_cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MechanismEdit {
    /// Warp `warp` was moved onto or off `frame`.
    Threading { frame: usize, warp: usize },
    /// Tie-up cell (`frame`, `treadle`) was toggled.
    TieUp { frame: usize, treadle: usize },
    /// Pick `weft` was moved onto or off `treadle`.
    Treadling { treadle: usize, weft: usize },
}

/// Drawdown cells that must be recomputed: every pick in `wefts` crossed
/// with every warp in `warps`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedCells {
    pub wefts: Vec<usize>,
    pub warps: Vec<usize>,
}

impl AffectedCells {
    pub fn is_empty(&self) -> bool {
        self.wefts.is_empty() || self.warps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.wefts.len() * self.warps.len()
    }

    pub fn contains(&self, weft: usize, warp: usize) -> bool {
        self.wefts.contains(&weft) && self.warps.contains(&warp)
    }

    /// `(weft, warp)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.wefts
            .iter()
            .flat_map(move |&i| self.warps.iter().map(move |&j| (i, j)))
    }
}

/// Frames or treadles, for operations that treat both the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Frames,
    Treadles,
}

/// Mechanization of one drawdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loom {
    min_frames: usize,
    min_treadles: usize,
    /// `threading[warp]` is the warp's frame.
    threading: Vec<Option<usize>>,
    /// `treadling[pick]` is the pick's treadle.
    treadling: Vec<Option<usize>>,
    tieup: TieUp,
}

impl Loom {
    /// Unassigned loom for a `wefts` x `warps` drawdown with an all-false
    /// `min_frames` x `min_treadles` tie-up.
    pub fn new(wefts: usize, warps: usize, min_frames: usize, min_treadles: usize) -> Self {
        Loom {
            min_frames,
            min_treadles,
            threading: vec![None; warps],
            treadling: vec![None; wefts],
            tieup: TieUp::new(min_frames, min_treadles),
        }
    }

    pub fn threading(&self) -> &[Option<usize>] {
        &self.threading
    }

    pub fn treadling(&self) -> &[Option<usize>] {
        &self.treadling
    }

    pub fn tieup(&self) -> &TieUp {
        &self.tieup
    }

    pub fn warps(&self) -> usize {
        self.threading.len()
    }

    pub fn wefts(&self) -> usize {
        self.treadling.len()
    }

    pub fn num_frames(&self) -> usize {
        self.tieup.frames()
    }

    pub fn num_treadles(&self) -> usize {
        self.tieup.treadles()
    }

    pub fn min_frames(&self) -> usize {
        self.min_frames
    }

    pub fn min_treadles(&self) -> usize {
        self.min_treadles
    }

    pub fn frame_of(&self, warp: usize) -> Option<usize> {
        self.threading.get(warp).copied().flatten()
    }

    pub fn treadle_of(&self, pick: usize) -> Option<usize> {
        self.treadling.get(pick).copied().flatten()
    }

    /// Warps threaded on `frame`, ascending.
    pub fn warps_on_frame(&self, frame: usize) -> Vec<usize> {
        positions_of(&self.threading, frame)
    }

    /// Picks woven with `treadle`, ascending.
    pub fn picks_on_treadle(&self, treadle: usize) -> Vec<usize> {
        positions_of(&self.treadling, treadle)
    }

    /// Frames or treadles referenced by at least one warp or pick.
    pub fn in_use(&self, axis: Axis) -> usize {
        (0..self.capacity(axis))
            .filter(|&idx| occurrences(self.assignments(axis), idx) > 0)
            .count()
    }

    /// Grow to at least `frames` frames. Returns how many were added.
    pub fn ensure_frames(&mut self, frames: usize) -> usize {
        let added = self.tieup.grow_frames(frames);
        if added > 0 {
            debug!(added, num_frames = self.num_frames(), "Allocated frames");
        }
        added
    }

    /// Grow to at least `treadles` treadles. Returns how many were added.
    pub fn ensure_treadles(&mut self, treadles: usize) -> usize {
        let added = self.tieup.grow_treadles(treadles);
        if added > 0 {
            debug!(added, num_treadles = self.num_treadles(), "Allocated treadles");
        }
        added
    }

    /// Check a mechanization that came from outside the engine (e.g. a
    /// deserialized save) before using it.
    pub fn validate(&self) -> Result<(), LoomError> {
        if !self.tieup.is_well_formed() {
            return Err(LoomError::InvalidMechanization(format!(
                "tie-up cells do not match {} frames x {} treadles",
                self.num_frames(),
                self.num_treadles()
            )));
        }
        if self.num_frames() < self.min_frames {
            return Err(LoomError::InvalidMechanization(format!(
                "{} frames is below the minimum of {}",
                self.num_frames(),
                self.min_frames
            )));
        }
        if self.num_treadles() < self.min_treadles {
            return Err(LoomError::InvalidMechanization(format!(
                "{} treadles is below the minimum of {}",
                self.num_treadles(),
                self.min_treadles
            )));
        }
        if let Some((warp, frame)) = out_of_range(&self.threading, self.num_frames()) {
            return Err(LoomError::InvalidMechanization(format!(
                "warp {} is threaded on frame {} but the loom has {} frames",
                warp,
                frame,
                self.num_frames()
            )));
        }
        if let Some((pick, treadle)) = out_of_range(&self.treadling, self.num_treadles()) {
            return Err(LoomError::InvalidMechanization(format!(
                "pick {} uses treadle {} but the loom has {} treadles",
                pick,
                treadle,
                self.num_treadles()
            )));
        }
        Ok(())
    }

    fn capacity(&self, axis: Axis) -> usize {
        match axis {
            Axis::Frames => self.num_frames(),
            Axis::Treadles => self.num_treadles(),
        }
    }

    fn minimum(&self, axis: Axis) -> usize {
        match axis {
            Axis::Frames => self.min_frames,
            Axis::Treadles => self.min_treadles,
        }
    }

    fn assignments(&self, axis: Axis) -> &[Option<usize>] {
        match axis {
            Axis::Frames => &self.threading,
            Axis::Treadles => &self.treadling,
        }
    }

    fn assignments_mut(&mut self, axis: Axis) -> &mut Vec<Option<usize>> {
        match axis {
            Axis::Frames => &mut self.threading,
            Axis::Treadles => &mut self.treadling,
        }
    }
}

/// How many positions are assigned to `index`.
pub(crate) fn occurrences(assignments: &[Option<usize>], index: usize) -> usize {
    assignments.iter().filter(|a| **a == Some(index)).count()
}

/// Lowest index in `0..capacity` nobody is assigned to, or `capacity` when all
/// are taken.
pub(crate) fn lowest_free(assignments: &[Option<usize>], capacity: usize) -> usize {
    (0..capacity)
        .find(|&idx| occurrences(assignments, idx) == 0)
        .unwrap_or(capacity)
}

fn positions_of(assignments: &[Option<usize>], index: usize) -> Vec<usize> {
    assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| **a == Some(index))
        .map(|(pos, _)| pos)
        .collect()
}

fn out_of_range(assignments: &[Option<usize>], capacity: usize) -> Option<(usize, usize)> {
    assignments
        .iter()
        .enumerate()
        .find_map(|(pos, a)| a.filter(|&idx| idx >= capacity).map(|idx| (pos, idx)))
}
