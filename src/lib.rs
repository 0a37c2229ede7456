//! loomwright: drawdown / loom mechanization consistency
//!
//! Keeps a weaving drawdown and the floor-loom setup that weaves it (threading,
//! treadling, tie-up) mutually valid: drawdown edits infer placements,
//! mechanization edits report the drawdown cells they touch, and unused
//! frames and treadles are compacted away.

pub mod cli;
pub mod config;
pub mod drawdown;
pub mod error;
pub mod logging;
pub mod loom;

pub use drawdown::{Drawdown, Grid};
pub use error::LoomError;
pub use loom::{AffectedCells, Axis, CellChange, ChangeSet, Loom, MechanismEdit, Placement};
