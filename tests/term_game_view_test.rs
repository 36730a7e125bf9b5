use blockfall::core::Grid;
use blockfall::term::{piece_color, piece_glyph, GameView, Viewport};
use blockfall::types::PieceKind;

#[test]
fn term_view_renders_border_corners() {
    let snap = Grid::new(10, 20, 1).snapshot();
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide, 20 rows + border = 22 tall.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_settled_cell_two_chars_wide() {
    let mut grid = Grid::new(10, 20, 1);
    grid.set(0, 19, Some(PieceKind::I));

    let fb = GameView::default().render(&grid.snapshot(), Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    let left = fb.get(x0, y0).unwrap();
    let right = fb.get(x0 + 1, y0).unwrap();
    assert_eq!(left.ch, piece_glyph(PieceKind::I));
    assert_eq!(right.ch, piece_glyph(PieceKind::I));
    assert_eq!(left.style.fg, piece_color(PieceKind::I));

    // Neighbouring cell is empty.
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_over_settled_cells() {
    let mut grid = Grid::new(10, 20, 1);
    grid.spawn(PieceKind::O);

    let fb = GameView::default().render(&grid.snapshot(), Viewport::new(22, 22));

    // O spawns at x = 4, rows 0 and 1.
    for (x, y) in [(4u16, 0u16), (5, 0), (4, 1), (5, 1)] {
        let cell = fb.get(1 + x * 2, 1 + y).unwrap();
        assert_eq!(cell.ch, piece_glyph(PieceKind::O));
        assert_eq!(cell.style.fg, piece_color(PieceKind::O));
    }
}

#[test]
fn term_view_kinds_differ_without_color() {
    let mut grid = Grid::new(10, 20, 1);
    for (x, kind) in PieceKind::ALL.iter().enumerate() {
        grid.set(x as i32, 19, Some(*kind));
    }

    let fb = GameView::default().render(&grid.snapshot(), Viewport::new(22, 22));
    let mut glyphs: Vec<char> = (0..7u16).map(|x| fb.get(1 + x * 2, 20).unwrap().ch).collect();
    glyphs.sort_unstable();
    glyphs.dedup();
    assert_eq!(glyphs.len(), 7);
}

#[test]
fn term_view_draws_legend_when_wide_enough() {
    let snap = Grid::new(10, 20, 1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 22));

    let all: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(all.contains("rotate"));
    assert!(all.contains("quit"));

    let narrow = GameView::default().render(&snap, Viewport::new(22, 22));
    let all: String = (0..narrow.height()).map(|y| narrow.row_text(y)).collect();
    assert!(!all.contains("rotate"));
}

#[test]
fn term_view_shows_game_over() {
    let mut snap = Grid::new(10, 20, 1).snapshot();
    snap.game_over = true;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let all: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(all.contains("GAME OVER"));
}

#[test]
fn term_view_survives_tiny_viewport() {
    let snap = Grid::new(10, 20, 1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
