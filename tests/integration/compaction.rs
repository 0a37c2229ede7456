//! Growth past the minimum and compaction back down to it

use loomwright::{Axis, Grid, Loom};

/// Five pairwise-distinct warp columns over three picks.
fn five_columns() -> Grid {
    Grid::parse(
        "x..x.\n\
         .x.xx\n\
         ..x.x\n",
    )
    .unwrap()
}

#[test]
fn test_fifth_frame_grows_then_compacts_to_minimum() {
    let grid = five_columns();
    let mut loom = Loom::new(3, 5, 4, 4);
    loom.recompute_from_drawdown(&grid);

    assert_eq!(loom.num_frames(), 5);
    assert_eq!(loom.frame_of(4), Some(4));

    assert_eq!(loom.edit_threading(4, 4, false).len(), 1);
    assert!(loom.compact(Axis::Frames));
    assert_eq!(loom.num_frames(), 4);

    // Idempotent once compact.
    assert!(!loom.compact(Axis::Frames));
    assert_eq!(loom.num_frames(), 4);
}

#[test]
fn test_compaction_never_drops_below_minimum() {
    let grid = five_columns();
    let mut loom = Loom::new(3, 5, 4, 4);
    loom.recompute_from_drawdown(&grid);

    for warp in 0..5 {
        let frame = loom.frame_of(warp).unwrap();
        loom.edit_threading(frame, warp, false);
    }
    assert!(loom.compact(Axis::Frames));
    assert_eq!(loom.num_frames(), 4);
    assert!(!loom.compact(Axis::Frames));
}

#[test]
fn test_compaction_preserves_the_woven_drawdown() {
    let grid = five_columns();
    let mut loom = Loom::new(3, 5, 1, 1);
    loom.recompute_from_drawdown(&grid);
    loom.ensure_frames(8);
    loom.ensure_treadles(6);

    // Open a gap in the middle of the frames.
    let frame = loom.frame_of(1).unwrap();
    loom.edit_threading(frame, 1, false);
    let before = loom.derive_drawdown();

    assert!(loom.compact_all());
    assert_eq!(loom.num_frames(), 4);
    assert_eq!(loom.num_treadles(), 3);
    assert_eq!(loom.derive_drawdown(), before);
    assert!(loom.validate().is_ok());
}

#[test]
fn test_edit_tieup_past_frames_is_noop() {
    let mut loom = Loom::new(2, 2, 2, 2);
    let changes = loom.edit_tieup(2, 0, true);
    assert!(changes.is_empty());
    assert_eq!(loom.num_frames(), 2);
    assert!(!loom.tieup().get(2, 0));
}
