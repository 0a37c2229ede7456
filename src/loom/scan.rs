//! Row and column comparison
//!
//! Inference needs to know which other picks (rows) or warp threads (columns)
//! of the drawdown are identical to the one just edited. The scans are plain
//! iterators so a caller can stop at the first usable match and resume past
//! an unusable one.

use crate::drawdown::Drawdown;

/// True if picks `a` and `b` are identical cell for cell, unset included.
pub fn rows_equal<D: Drawdown + ?Sized>(drawdown: &D, a: usize, b: usize) -> bool {
    (0..drawdown.col_count()).all(|j| drawdown.cell(a, j) == drawdown.cell(b, j))
}

/// True if warp threads `a` and `b` are identical cell for cell, unset included.
pub fn cols_equal<D: Drawdown + ?Sized>(drawdown: &D, a: usize, b: usize) -> bool {
    (0..drawdown.row_count()).all(|i| drawdown.cell(i, a) == drawdown.cell(i, b))
}

/// Which axis of the drawdown a [`Matches`] scan walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lane {
    Rows,
    Cols,
}

/// Ascending indices of the rows (or columns) identical to `target`,
/// excluding `target` itself.
#[derive(Debug, Clone)]
pub struct Matches<'a, D: ?Sized> {
    drawdown: &'a D,
    lane: Lane,
    target: usize,
    next: usize,
}

impl<'a, D: Drawdown + ?Sized> Matches<'a, D> {
    /// Continue the scan from `index` instead of where it left off.
    pub fn restart_at(&mut self, index: usize) {
        self.next = index;
    }

    fn len(&self) -> usize {
        match self.lane {
            Lane::Rows => self.drawdown.row_count(),
            Lane::Cols => self.drawdown.col_count(),
        }
    }

    fn equal(&self, other: usize) -> bool {
        match self.lane {
            Lane::Rows => rows_equal(self.drawdown, self.target, other),
            Lane::Cols => cols_equal(self.drawdown, self.target, other),
        }
    }
}

impl<'a, D: Drawdown + ?Sized> Iterator for Matches<'a, D> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next < self.len() {
            let candidate = self.next;
            self.next += 1;
            if candidate != self.target && self.equal(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Picks identical to pick `target`.
pub fn matching_rows<D: Drawdown + ?Sized>(drawdown: &D, target: usize) -> Matches<'_, D> {
    Matches {
        drawdown,
        lane: Lane::Rows,
        target,
        next: 0,
    }
}

/// Warp threads identical to warp `target`.
pub fn matching_cols<D: Drawdown + ?Sized>(drawdown: &D, target: usize) -> Matches<'_, D> {
    Matches {
        drawdown,
        lane: Lane::Cols,
        target,
        next: 0,
    }
}
