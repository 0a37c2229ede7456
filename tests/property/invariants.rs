//! Property-based tests for loom engine invariants

use loomwright::{Axis, Drawdown, Grid, Loom, MechanismEdit};
use proptest::prelude::*;

/// A drawdown of 1..=6 picks by 1..=6 warps with arbitrary cells.
fn drawdown() -> impl Strategy<Value = Grid> {
    (1usize..=6, 1usize..=6).prop_flat_map(|(wefts, warps)| {
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), warps), wefts)
            .prop_map(|rows| Grid::from_rows(rows).unwrap())
    })
}

/// Grid size plus a sequence of `(pick, warp, value)` cell edits.
fn edit_sequence() -> impl Strategy<Value = (usize, usize, Vec<(usize, usize, bool)>)> {
    (1usize..=5, 1usize..=5).prop_flat_map(|(wefts, warps)| {
        (
            Just(wefts),
            Just(warps),
            proptest::collection::vec((0..wefts, 0..warps, any::<bool>()), 0..30),
        )
    })
}

/// Mechanizing a whole drawdown never puts differing positions together
/// and weaves the drawdown back exactly.
#[test]
fn test_recompute_is_exclusive_and_exact() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(drawdown(), 1usize..=4, 1usize..=4), |(grid, min_frames, min_treadles)| {
            let mut loom = Loom::new(0, 0, min_frames, min_treadles);
            loom.recompute_from_drawdown(&grid);

            prop_assert!(loom.conflicts(&grid).is_empty());
            prop_assert_eq!(loom.derive_drawdown(), grid.clone());
            prop_assert!(loom.num_frames() >= min_frames);
            prop_assert!(loom.num_treadles() >= min_treadles);
            prop_assert!(loom.validate().is_ok());
            Ok(())
        })
        .unwrap();
}

/// Incremental editing keeps the mechanization in step with the drawdown
/// after every single edit, and the edited cell is always reported back.
#[test]
fn test_incremental_edits_stay_consistent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&edit_sequence(), |(wefts, warps, edits)| {
            let mut grid = Grid::new(wefts, warps);
            let mut loom = Loom::new(wefts, warps, 2, 2);

            for (row, col, value) in edits {
                grid.set(row, col, Some(value));
                let placement = loom.infer_config(row, col, &grid).unwrap();
                loom.apply_config(placement, row, col, &grid);

                prop_assert!(loom.conflicts(&grid).is_empty());
                prop_assert_eq!(loom.derive_drawdown(), grid.clone());

                let cells = loom.affected_cells(MechanismEdit::TieUp {
                    frame: placement.frame,
                    treadle: placement.treadle,
                });
                prop_assert!(cells.contains(row, col));
            }
            Ok(())
        })
        .unwrap();
}

/// Compaction is idempotent, respects the minimums and leaves the woven
/// drawdown unchanged.
#[test]
fn test_compaction_idempotent_and_lossless() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(drawdown(), 0usize..4, 0usize..4, proptest::collection::vec(any::<bool>(), 6)),
            |(grid, extra_frames, extra_treadles, unthread)| {
                let mut loom = Loom::new(0, 0, 2, 2);
                loom.recompute_from_drawdown(&grid);
                loom.ensure_frames(loom.num_frames() + extra_frames);
                loom.ensure_treadles(loom.num_treadles() + extra_treadles);

                for (warp, drop) in unthread.into_iter().enumerate().take(grid.col_count()) {
                    if let (true, Some(frame)) = (drop, loom.frame_of(warp)) {
                        loom.edit_threading(frame, warp, false);
                    }
                }
                let before = loom.derive_drawdown();
                let in_use = (loom.in_use(Axis::Frames), loom.in_use(Axis::Treadles));

                loom.compact_all();
                prop_assert!(!loom.compact_all());
                prop_assert_eq!(loom.derive_drawdown(), before);
                prop_assert_eq!(loom.num_frames(), in_use.0.max(2));
                prop_assert_eq!(loom.num_treadles(), in_use.1.max(2));
                prop_assert!(loom.validate().is_ok());
                Ok(())
            },
        )
        .unwrap();
}

/// Out-of-range edits never change the loom.
#[test]
fn test_out_of_range_edits_are_noops() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(drawdown(), 0usize..4, any::<bool>()), |(grid, offset, value)| {
            let mut loom = Loom::new(0, 0, 2, 2);
            loom.recompute_from_drawdown(&grid);
            let before = loom.clone();

            let frames = loom.num_frames();
            let treadles = loom.num_treadles();
            prop_assert!(loom.edit_tieup(frames + offset, 0, value).is_empty());
            prop_assert!(loom.edit_tieup(0, treadles + offset, value).is_empty());
            prop_assert!(loom.edit_threading(frames + offset, 0, value).is_empty());
            prop_assert!(loom.edit_treadling(grid.row_count() + offset, 0, value).is_empty());
            prop_assert!(loom
                .update_from_drawdown(grid.row_count() + offset, 0, &grid)
                .is_empty());
            prop_assert_eq!(loom, before);
            Ok(())
        })
        .unwrap();
}
