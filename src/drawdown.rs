//! Drawdown access
//!
//! The loom engine only reads a drawdown through the [`Drawdown`] trait. [`Grid`]
//! is the small in-memory implementation used by the CLI and the tests; richer
//! pattern containers implement the trait themselves.

use crate::error::LoomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Read-only view of a drawdown: `row_count()` picks by `col_count()` warps.
///
/// `cell` returns `Some(true)` where the warp is lifted over the weft,
/// `Some(false)` where it is down, and `None` for unset cells or positions
/// outside the matrix.
pub trait Drawdown {
    fn cell(&self, row: usize, col: usize) -> Option<bool>;
    fn row_count(&self) -> usize;
    fn col_count(&self) -> usize;

    /// True if the cell is explicitly up.
    fn is_up(&self, row: usize, col: usize) -> bool {
        self.cell(row, col) == Some(true)
    }
}

impl<D: Drawdown + ?Sized> Drawdown for &D {
    fn cell(&self, row: usize, col: usize) -> Option<bool> {
        (**self).cell(row, col)
    }

    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn col_count(&self) -> usize {
        (**self).col_count()
    }
}

/// Dense drawdown held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    warps: usize,
    rows: Vec<Vec<Option<bool>>>,
}

impl Grid {
    /// All-down drawdown of `wefts` picks and `warps` threads.
    pub fn new(wefts: usize, warps: usize) -> Self {
        Grid {
            warps,
            rows: vec![vec![Some(false); warps]; wefts],
        }
    }

    /// Fully-set drawdown with `value(pick, warp)` in every cell.
    pub fn from_fn(wefts: usize, warps: usize, value: impl Fn(usize, usize) -> bool) -> Self {
        let rows = (0..wefts)
            .map(|i| (0..warps).map(|j| Some(value(i, j))).collect())
            .collect();
        Grid { warps, rows }
    }

    /// Build from fully-set rows. Rows must share one length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, LoomError> {
        let warps = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != warps {
                return Err(LoomError::parse(
                    index + 1,
                    format!("expected {} warps, found {}", warps, row.len()),
                ));
            }
            cells.push(row.into_iter().map(Some).collect());
        }
        Ok(Grid { warps, rows: cells })
    }

    /// Parse the plain-text drawdown format.
    ///
    /// One pick per line: `x`, `X`, `#`, `1` are up; `.`, `-`, `0` are down;
    /// `?` is unset. Blank lines and `;` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, LoomError> {
        let mut rows: Vec<Vec<Option<bool>>> = Vec::new();
        let mut warps = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars() {
                let cell = match ch {
                    'x' | 'X' | '#' | '1' => Some(true),
                    '.' | '-' | '0' => Some(false),
                    '?' => None,
                    c if c.is_whitespace() => continue,
                    other => {
                        return Err(LoomError::parse(
                            line_no,
                            format!("unexpected character {:?}", other),
                        ))
                    }
                };
                row.push(cell);
            }

            match warps {
                None => warps = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(LoomError::parse(
                        line_no,
                        format!("expected {} warps, found {}", expected, row.len()),
                    ));
                }
                Some(_) => {}
            }
            rows.push(row);
        }

        Ok(Grid {
            warps: warps.unwrap_or(0),
            rows,
        })
    }

    pub fn wefts(&self) -> usize {
        self.rows.len()
    }

    pub fn warps(&self) -> usize {
        self.warps
    }

    /// Write one cell. Returns false (and writes nothing) when out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Option<bool>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Option<bool>]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Cells where `self` and `other` differ, in row-major order.
    pub fn diff(&self, other: &impl Drawdown) -> Vec<(usize, usize)> {
        let wefts = self.wefts().max(other.row_count());
        let warps = self.warps().max(other.col_count());
        let mut cells = Vec::new();
        for i in 0..wefts {
            for j in 0..warps {
                if self.cell(i, j) != other.cell(i, j) {
                    cells.push((i, j));
                }
            }
        }
        cells
    }
}

impl Drawdown for Grid {
    fn cell(&self, row: usize, col: usize) -> Option<bool> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.warps
    }
}

impl FromStr for Grid {
    type Err = LoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                let ch = match cell {
                    Some(true) => 'x',
                    Some(false) => '.',
                    None => '?',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
