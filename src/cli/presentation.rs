//! Presentation: text rendering of mechanizations and check results.

use crate::loom::{Axis, Conflict, Loom};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;

const UP: char = 'x';
const DOWN: char = '.';

/// Result of comparing a drawdown with a mechanization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub conflicts: Vec<Conflict>,
    /// `(pick, warp)` cells where the mechanization weaves something else.
    pub mismatches: Vec<(usize, usize)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.mismatches.is_empty()
    }
}

/// Threading, tie-up and treadling grids followed by a summary table.
pub fn format_loom_text(loom: &Loom) -> String {
    let mut out = String::new();

    out.push_str("Threading (frame x warp):\n");
    for frame in 0..loom.num_frames() {
        let row: String = loom
            .threading()
            .iter()
            .map(|f| if *f == Some(frame) { UP } else { DOWN })
            .collect();
        out.push_str(&format!("  {:>3} {}\n", frame, row));
    }

    out.push_str("\nTie-up (frame x treadle):\n");
    for frame in 0..loom.num_frames() {
        let row: String = (0..loom.num_treadles())
            .map(|t| if loom.tieup().get(frame, t) { UP } else { DOWN })
            .collect();
        out.push_str(&format!("  {:>3} {}\n", frame, row));
    }

    out.push_str("\nTreadling (pick x treadle):\n");
    for (pick, treadle) in loom.treadling().iter().enumerate() {
        let row: String = (0..loom.num_treadles())
            .map(|t| if *treadle == Some(t) { UP } else { DOWN })
            .collect();
        out.push_str(&format!("  {:>3} {}\n", pick, row));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Count", "In use", "Minimum"]);
    table.add_row(vec![
        "Frames".to_string(),
        loom.num_frames().to_string(),
        loom.in_use(Axis::Frames).to_string(),
        loom.min_frames().to_string(),
    ]);
    table.add_row(vec![
        "Treadles".to_string(),
        loom.num_treadles().to_string(),
        loom.in_use(Axis::Treadles).to_string(),
        loom.min_treadles().to_string(),
    ]);
    table.add_row(vec![
        "Warps".to_string(),
        loom.warps().to_string(),
        assigned(loom.threading()).to_string(),
        "-".to_string(),
    ]);
    table.add_row(vec![
        "Picks".to_string(),
        loom.wefts().to_string(),
        assigned(loom.treadling()).to_string(),
        "-".to_string(),
    ]);
    out.push('\n');
    out.push_str(&table.to_string());
    out
}

pub fn format_check_text(report: &CheckReport) -> String {
    if report.is_clean() {
        return "Check passed: the mechanization weaves the drawdown".to_string();
    }

    let mut s = "Check found issues:".to_string();
    if !report.conflicts.is_empty() {
        s.push_str(&format!("\n\nConflicts ({}):", report.conflicts.len()));
        for conflict in &report.conflicts {
            let line = match conflict {
                Conflict::Frame { frame, warps } => format!(
                    "warps {} and {} share frame {} but differ",
                    warps.0, warps.1, frame
                ),
                Conflict::Treadle { treadle, picks } => format!(
                    "picks {} and {} share treadle {} but differ",
                    picks.0, picks.1, treadle
                ),
            };
            s.push_str(&format!("\n  - {}", line));
        }
    }
    if !report.mismatches.is_empty() {
        s.push_str(&format!("\n\nMismatched cells ({}):", report.mismatches.len()));
        for (pick, warp) in &report.mismatches {
            s.push_str(&format!("\n  - pick {}, warp {}", pick, warp));
        }
    }
    s
}

fn assigned(assignments: &[Option<usize>]) -> usize {
    assignments.iter().filter(|a| a.is_some()).count()
}
