//! Grid scenarios - falling, locking, clearing, blocked moves

use blockfall::core::{Grid, CATALOG};
use blockfall::types::{Intent, PieceKind};

fn fill_row_except(grid: &mut Grid, y: i32, gap: Option<i32>) {
    for x in 0..grid.width() as i32 {
        if Some(x) != gap {
            grid.set(x, y, Some(PieceKind::J));
        }
    }
}

#[test]
fn test_square_falls_to_floor() {
    let mut grid = Grid::new(10, 20, 1);
    assert!(grid.spawn(PieceKind::O));
    let p = *grid.active().unwrap();
    assert_eq!((p.x(), p.y()), (4, 0));

    for i in 0..18 {
        let ev = grid.step();
        assert!(ev.moved, "step {} should fall", i);
        assert!(ev.locked.is_none());
    }

    let p = *grid.active().unwrap();
    assert_eq!(p.y(), 18);
    assert!(!grid.can_move_down(&p));

    // The next step locks it in place.
    let ev = grid.step();
    assert_eq!(ev.locked, Some(PieceKind::O));
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(grid.get(x, y), Some(Some(PieceKind::O)));
    }
}

#[test]
fn test_can_move_down_false_on_last_row_for_every_shape() {
    for record in CATALOG.iter() {
        let mut grid = Grid::new(10, 20, 1);
        grid.spawn(record.kind);
        while grid.step().moved {}

        // The step that failed to move locked the piece; its cells touch row 19.
        assert!(
            (0..10).any(|x| grid.get(x, 19) == Some(Some(record.kind))),
            "{:?} should rest on the floor",
            record.kind
        );

        // Any piece whose cells reach the last row cannot fall.
        let mut grid = Grid::new(10, 20, 1);
        grid.spawn(record.kind);
        while grid.active().map_or(false, |p| grid.can_move_down(p)) {
            grid.step();
        }
        let p = grid.active().unwrap();
        assert_eq!(p.y() + p.height(), 20);
    }
}

#[test]
fn test_vertical_i_completes_bottom_row() {
    let mut grid = Grid::new(10, 20, 1);
    fill_row_except(&mut grid, 19, Some(3));
    fill_row_except(&mut grid, 18, Some(0));
    grid.set(3, 18, None);
    grid.set(7, 17, Some(PieceKind::T));

    assert!(grid.spawn(PieceKind::I));
    assert!(grid.apply_intent(Intent::Rotate));
    assert_eq!(grid.active().unwrap().x(), 5);
    assert!(grid.apply_intent(Intent::MoveLeft));
    assert!(grid.apply_intent(Intent::MoveLeft));
    assert_eq!(grid.active().unwrap().x(), 3);

    // Fall until it rests: rows 16..=19 in column 3.
    let mut steps = 0;
    while grid.active().map_or(false, |p| grid.can_move_down(p)) {
        grid.step();
        steps += 1;
    }
    assert_eq!(steps, 16);
    assert!(!grid.is_row_full(19));

    let ev = grid.step();
    assert_eq!(ev.locked, Some(PieceKind::I));
    assert_eq!(ev.lines_cleared, 1);

    // The old second-to-last row is now the last, its gap at column 3 filled by the I.
    assert_eq!(grid.get(0, 19), Some(None));
    assert_eq!(grid.get(3, 19), Some(Some(PieceKind::I)));
    for x in [1, 2, 4, 5, 9] {
        assert_eq!(grid.get(x, 19), Some(Some(PieceKind::J)));
    }
    assert_eq!(grid.get(7, 18), Some(Some(PieceKind::T)));
    assert_eq!(grid.get(3, 18), Some(Some(PieceKind::I)));
    assert_eq!(grid.get(3, 17), Some(Some(PieceKind::I)));
    assert_eq!(grid.get(3, 16), Some(None));

    // Swap in a known active piece so the counts only see settled cells.
    assert!(grid.spawn(PieceKind::O));
    let snap = grid.snapshot();
    assert_eq!(snap.count_kind(PieceKind::I), 3);
    assert_eq!(snap.count_kind(PieceKind::J), 8);
    assert_eq!(snap.count_kind(PieceKind::T), 1);
}

#[test]
fn test_move_left_at_boundary_leaves_grid_unchanged() {
    let mut grid = Grid::new(10, 20, 1);
    grid.spawn(PieceKind::L);
    while grid.apply_intent(Intent::MoveLeft) {}

    let p = *grid.active().unwrap();
    assert_eq!(p.x(), 0);
    assert!(!grid.can_move_left(&p));

    let before = grid.snapshot();
    assert!(!grid.apply_intent(Intent::MoveLeft));
    assert_eq!(grid.snapshot(), before);
    assert_eq!(*grid.active().unwrap(), p);
}

#[test]
fn test_move_right_at_boundary_is_rejected() {
    let mut grid = Grid::new(10, 20, 1);
    grid.spawn(PieceKind::Z);
    while grid.apply_intent(Intent::MoveRight) {}
    let p = *grid.active().unwrap();
    assert_eq!(p.x() + p.width(), 10);
    assert!(!grid.can_move_right(&p));
}

#[test]
fn test_clear_empty_row_is_noop() {
    let mut grid = Grid::new(10, 20, 1);
    fill_row_except(&mut grid, 19, Some(5));
    let before = grid.snapshot();
    grid.clear_row(10);
    assert_eq!(grid.snapshot(), before);
}

#[test]
fn test_no_full_rows_leaves_grid_unchanged() {
    let mut grid = Grid::new(10, 20, 1);
    fill_row_except(&mut grid, 19, Some(5));
    fill_row_except(&mut grid, 18, Some(6));
    grid.set(2, 12, Some(PieceKind::S));
    grid.spawn(PieceKind::T);

    let before = grid.snapshot();
    assert_eq!(grid.clear_full_rows(), 0);
    assert_eq!(grid.snapshot(), before);
}

#[test]
fn test_spawned_piece_never_overlaps_settled_cells() {
    let mut grid = Grid::new(10, 20, 77);
    grid.start();

    for _ in 0..2000 {
        let ev = grid.step();
        if ev.game_over {
            assert!(grid.active().is_none());
            break;
        }
        if ev.spawned.is_some() {
            let p = *grid.active().unwrap();
            for y in p.y()..p.y() + p.height() {
                for x in p.x()..p.x() + p.width() {
                    assert!(!grid.is_occupied(x, y), "spawn box overlaps ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn test_stacking_in_one_column_ends_the_game() {
    let mut grid = Grid::new(10, 20, 9);
    grid.start();

    let mut over = false;
    for _ in 0..5000 {
        if grid.step().game_over {
            over = true;
            break;
        }
    }
    assert!(over, "pieces dropped straight down must eventually top out");
    assert!(grid.is_game_over());
    assert!(grid.snapshot().game_over);
}

#[test]
fn test_two_rows_cleared_by_one_lock() {
    let mut grid = Grid::new(10, 20, 1);
    fill_row_except(&mut grid, 19, Some(8));
    fill_row_except(&mut grid, 18, Some(8));
    grid.set(8, 19, None);
    grid.set(9, 19, None);
    grid.set(8, 18, None);
    grid.set(9, 18, None);
    grid.set(0, 17, Some(PieceKind::Z));

    grid.spawn(PieceKind::O);
    for _ in 0..4 {
        assert!(grid.apply_intent(Intent::MoveRight));
    }
    assert_eq!(grid.active().unwrap().x(), 8);

    let mut ev = grid.step();
    while ev.locked.is_none() {
        ev = grid.step();
    }
    assert_eq!(ev.lines_cleared, 2);
    assert_eq!(grid.get(0, 19), Some(Some(PieceKind::Z)));
    assert!((1..10).all(|x| grid.get(x, 19) == Some(None)));
    assert!((0..10).all(|x| grid.get(x, 18) == Some(None)));

    assert!(grid.spawn(PieceKind::T));
    let snap = grid.snapshot();
    assert_eq!(snap.count_kind(PieceKind::J), 0);
    assert_eq!(snap.count_kind(PieceKind::O), 0);
    assert_eq!(snap.count_kind(PieceKind::Z), 1);
}
