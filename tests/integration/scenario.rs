//! End-to-end inference over whole drawdowns

use loomwright::{Axis, Drawdown, Grid, Loom};

/// Picks 0/2 and 1/3 are identical; warps 0/2 and 1/3 are identical.
fn paired_rows() -> Grid {
    Grid::parse(
        "x.x.\n\
         .x.x\n\
         x.x.\n\
         .x.x\n",
    )
    .unwrap()
}

#[test]
fn test_paired_rows_converge_to_two_treadles() {
    let grid = paired_rows();
    let mut loom = Loom::new(4, 4, 2, 2);

    for row in 0..grid.row_count() {
        for col in 0..grid.col_count() {
            loom.update_from_drawdown(row, col, &grid);
        }
    }

    assert_eq!(
        loom.treadling(),
        &[Some(0), Some(1), Some(0), Some(1)]
    );
    assert_eq!(loom.num_treadles(), 2);
    assert_eq!(loom.in_use(Axis::Treadles), 2);
    assert_eq!(loom.threading(), &[Some(0), Some(1), Some(0), Some(1)]);
    assert_eq!(loom.num_frames(), 2);
    assert_eq!(loom.derive_drawdown(), grid);
}

#[test]
fn test_recompute_matches_cell_by_cell_inference() {
    let grid = paired_rows();
    let mut incremental = Loom::new(4, 4, 2, 2);
    for row in 0..4 {
        for col in 0..4 {
            incremental.update_from_drawdown(row, col, &grid);
        }
    }

    let mut whole = Loom::new(0, 0, 2, 2);
    whole.recompute_from_drawdown(&grid);
    assert_eq!(whole, incremental);
}

#[test]
fn test_editing_a_pick_moves_it_off_a_shared_treadle() {
    let mut grid = paired_rows();
    let mut loom = Loom::new(4, 4, 2, 2);
    loom.recompute_from_drawdown(&grid);
    assert_eq!(loom.treadle_of(2), Some(0));

    grid.set(2, 1, Some(true));
    let changes = loom.update_from_drawdown(2, 1, &grid);

    assert_eq!(loom.treadle_of(2), Some(2));
    assert_eq!(changes.treadles_added, 1);
    assert!(changes.resized());
    assert!(loom.conflicts(&grid).is_empty());
    assert_eq!(loom.derive_drawdown(), grid);
}

#[test]
fn test_edit_restoring_a_pick_rejoins_its_twin() {
    let mut grid = paired_rows();
    let mut loom = Loom::new(4, 4, 2, 2);
    loom.recompute_from_drawdown(&grid);

    grid.set(2, 1, Some(true));
    loom.update_from_drawdown(2, 1, &grid);
    grid.set(2, 1, Some(false));
    loom.update_from_drawdown(2, 1, &grid);

    assert_eq!(loom.treadle_of(2), loom.treadle_of(0));
    assert_eq!(loom.in_use(Axis::Treadles), 2);

    assert!(loom.compact(Axis::Treadles));
    assert_eq!(loom.num_treadles(), 2);
    assert_eq!(loom.derive_drawdown(), grid);
}

#[test]
fn test_unset_cells_weave_down() {
    let grid = Grid::parse("x?\n?x\n").unwrap();
    let mut loom = Loom::new(0, 0, 1, 1);
    loom.recompute_from_drawdown(&grid);

    let woven = loom.derive_drawdown();
    assert_eq!(woven.cell(0, 0), Some(true));
    assert_eq!(woven.cell(0, 1), Some(false));
    assert!(loom.conflicts(&grid).is_empty());
}
