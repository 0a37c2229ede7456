//! Tie-up matrix
//!
//! Dense frames x treadles matrix that owns the loom's frame and treadle
//! counts. Growth appends all-false rows or columns; shrinking only removes
//! from the top; reordering goes through a full permutation applied from a
//! snapshot.

use serde::{Deserialize, Serialize};

/// `cells[frame * treadles + treadle]` is true when the treadle lifts the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieUp {
    frames: usize,
    treadles: usize,
    cells: Vec<bool>,
}

impl TieUp {
    pub fn new(frames: usize, treadles: usize) -> Self {
        TieUp {
            frames,
            treadles,
            cells: vec![false; frames * treadles],
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn treadles(&self) -> usize {
        self.treadles
    }

    /// False outside the matrix.
    pub fn get(&self, frame: usize, treadle: usize) -> bool {
        self.index(frame, treadle)
            .and_then(|idx| self.cells.get(idx).copied())
            .unwrap_or(false)
    }

    /// Write one cell, returning the previous value, or `None` when out of range.
    pub fn set(&mut self, frame: usize, treadle: usize, value: bool) -> Option<bool> {
        let idx = self.index(frame, treadle)?;
        let cell = self.cells.get_mut(idx)?;
        Some(std::mem::replace(cell, value))
    }

    /// Treadles that lift `frame`, ascending.
    pub fn treadles_for_frame(&self, frame: usize) -> Vec<usize> {
        (0..self.treadles)
            .filter(|&t| self.get(frame, t))
            .collect()
    }

    /// Frames lifted by `treadle`, ascending.
    pub fn frames_for_treadle(&self, treadle: usize) -> Vec<usize> {
        (0..self.frames)
            .filter(|&f| self.get(f, treadle))
            .collect()
    }

    pub fn clear_treadle(&mut self, treadle: usize) {
        for frame in 0..self.frames {
            self.set(frame, treadle, false);
        }
    }

    /// True if a `frames` x `treadles` matrix has an addressable cell count.
    pub fn can_hold(frames: usize, treadles: usize) -> bool {
        frames.checked_mul(treadles).is_some()
    }

    /// Append all-false frames until there are at least `frames`. A size
    /// whose cell count overflows is refused and nothing is added.
    pub fn grow_frames(&mut self, frames: usize) -> usize {
        if frames <= self.frames {
            return 0;
        }
        let Some(len) = frames.checked_mul(self.treadles) else {
            return 0;
        };
        let added = frames - self.frames;
        self.cells.resize(len, false);
        self.frames = frames;
        added
    }

    /// Append all-false treadles until there are at least `treadles`.
    pub fn grow_treadles(&mut self, treadles: usize) -> usize {
        if treadles <= self.treadles || !Self::can_hold(self.frames, treadles) {
            return 0;
        }
        let added = treadles - self.treadles;
        let old = self.treadles;
        let cells = Self::build(self.frames, treadles, |f, t| t < old && self.get(f, t));
        self.install(self.frames, treadles, cells);
        added
    }

    /// Drop the top frame.
    pub fn pop_frame(&mut self) -> bool {
        if self.frames == 0 {
            return false;
        }
        self.frames -= 1;
        self.cells.truncate(self.frames * self.treadles);
        true
    }

    /// Drop the top treadle.
    pub fn pop_treadle(&mut self) -> bool {
        if self.treadles == 0 {
            return false;
        }
        let treadles = self.treadles - 1;
        let cells = Self::build(self.frames, treadles, |f, t| self.get(f, t));
        self.install(self.frames, treadles, cells);
        true
    }

    /// Reorder frames so that new frame `n` holds old frame `order[n]`.
    ///
    /// `order` must be a permutation of `0..frames`.
    pub fn permute_frames(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.frames);
        let cells = Self::build(self.frames, self.treadles, |f, t| self.get(order[f], t));
        self.cells = cells;
    }

    /// Reorder treadles so that new treadle `n` holds old treadle `order[n]`.
    pub fn permute_treadles(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.treadles);
        let cells = Self::build(self.frames, self.treadles, |f, t| self.get(f, order[t]));
        self.cells = cells;
    }

    /// Cells whose value differs from `before`, as `(frame, treadle, new value)`.
    ///
    /// Cells that did not exist in `before` count as previously false.
    pub fn diff_from(&self, before: &TieUp) -> Vec<(usize, usize, bool)> {
        let mut changed = Vec::new();
        for f in 0..self.frames {
            for t in 0..self.treadles {
                let now = self.get(f, t);
                if now != before.get(f, t) {
                    changed.push((f, t, now));
                }
            }
        }
        changed
    }

    pub(crate) fn is_well_formed(&self) -> bool {
        self.frames.checked_mul(self.treadles) == Some(self.cells.len())
    }

    fn index(&self, frame: usize, treadle: usize) -> Option<usize> {
        if frame < self.frames && treadle < self.treadles {
            frame.checked_mul(self.treadles)?.checked_add(treadle)
        } else {
            None
        }
    }

    fn build(frames: usize, treadles: usize, value: impl Fn(usize, usize) -> bool) -> Vec<bool> {
        let mut cells = Vec::with_capacity(frames * treadles);
        for f in 0..frames {
            for t in 0..treadles {
                cells.push(value(f, t));
            }
        }
        cells
    }

    fn install(&mut self, frames: usize, treadles: usize, cells: Vec<bool>) {
        self.frames = frames;
        self.treadles = treadles;
        self.cells = cells;
    }
}
