//! Mechanization edits and the drawdown cells they report

use loomwright::{Grid, Loom, MechanismEdit};

#[test]
fn test_inferred_placement_is_reported_back() {
    let mut grid = Grid::new(3, 4);
    let mut loom = Loom::new(3, 4, 2, 2);
    let edits = [(0, 0), (1, 1), (2, 3), (0, 2), (1, 3)];

    for (row, col) in edits {
        grid.set(row, col, Some(true));
        let placement = loom.infer_config(row, col, &grid).unwrap();
        loom.apply_config(placement, row, col, &grid);

        let cells = loom.affected_cells(MechanismEdit::TieUp {
            frame: placement.frame,
            treadle: placement.treadle,
        });
        assert!(cells.contains(row, col), "({row}, {col}) not in {cells:?}");
    }
}

#[test]
fn test_tieup_edit_changes_exactly_the_affected_cells() {
    let grid = Grid::parse("x..\n.x.\n..x\nx..\n").unwrap();
    let mut loom = Loom::new(0, 0, 1, 1);
    loom.recompute_from_drawdown(&grid);
    let before = loom.derive_drawdown();

    let frame = loom.frame_of(2).unwrap();
    let treadle = loom.treadle_of(0).unwrap();
    assert_eq!(loom.edit_tieup(frame, treadle, true).len(), 1);
    let after = loom.derive_drawdown();

    let cells = loom.affected_cells(MechanismEdit::TieUp { frame, treadle });
    let changed = after.diff(&before);
    assert_eq!(changed, cells.cells().collect::<Vec<_>>());
    assert_eq!(changed, vec![(0, 2), (3, 2)]);
}

#[test]
fn test_threading_edit_affects_its_column_only() {
    let grid = Grid::parse("x.\n.x\n").unwrap();
    let mut loom = Loom::new(0, 0, 2, 2);
    loom.recompute_from_drawdown(&grid);

    loom.edit_threading(1, 0, true);
    let cells = loom.affected_cells(MechanismEdit::Threading { frame: 1, warp: 0 });
    assert_eq!(cells.warps, vec![0]);
    assert_eq!(cells.wefts, vec![1]);
    assert_eq!(loom.derive_drawdown().to_string(), "..\nxx\n");
}

#[test]
fn test_direct_edits_can_create_conflicts() {
    let grid = Grid::parse("x.\n.x\n").unwrap();
    let mut loom = Loom::new(0, 0, 2, 2);
    loom.recompute_from_drawdown(&grid);
    assert!(loom.conflicts(&grid).is_empty());

    loom.edit_treadling(1, 0, true);
    assert_eq!(loom.conflicts(&grid).len(), 1);
}
