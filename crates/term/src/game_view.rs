//! GameView: maps a `GridSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GridSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::PieceKind;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Lays out the bordered board and a key legend.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GridSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);

        // Oversized grids clip at the viewport edge.
        let board_w = snap.width.saturating_mul(self.cell_w);
        let frame_w = board_w.saturating_add(2);
        let frame_h = snap.height.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, start_x, start_y, frame_w, frame_h);

        for y in 0..snap.height {
            let py = start_y.saturating_add(1 + y);
            if py >= viewport.height {
                break;
            }
            for x in 0..snap.width {
                let (ch, style) = match snap.get(x as i32, y as i32).flatten() {
                    Some(kind) => (
                        piece_glyph(kind),
                        CellStyle::new(piece_color(kind), PLAY_BG).bold(),
                    ),
                    None => ('·', CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG)),
                };
                let px = start_x
                    .saturating_add(1)
                    .saturating_add(x.saturating_mul(self.cell_w));
                if px >= viewport.width {
                    break;
                }
                fb.fill_rect(px, py, self.cell_w, 1, ch, style);
            }
        }

        self.draw_legend(fb, viewport, start_x.saturating_add(frame_w).saturating_add(2), start_y);

        if snap.game_over {
            let text = "GAME OVER";
            let text_w = text.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, start_y.saturating_add(frame_h / 2), text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GridSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_legend(&self, fb: &mut FrameBuffer, viewport: Viewport, x: u16, y: u16) {
        const LINES: [&str; 4] = ["←/→  move", "↑    rotate", "", "q    quit"];
        if x.saturating_add(12) > viewport.width {
            return;
        }
        let style = CellStyle::default();
        for (i, line) in LINES.iter().enumerate() {
            fb.put_str(x, y.saturating_add(i as u16), line, style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    // Writes past the framebuffer are dropped, so stop at its edge.
    for dx in 1..(w - 1).min(fb.width()) {
        fb.put_char(x.saturating_add(dx), y, '─', style);
        fb.put_char(x.saturating_add(dx), bottom, '─', style);
    }
    for dy in 1..(h - 1).min(fb.height()) {
        fb.put_char(x, y.saturating_add(dy), '│', style);
        fb.put_char(right, y.saturating_add(dy), '│', style);
    }
}

/// One fixed glyph per piece kind, so kinds stay apart without color.
pub fn piece_glyph(kind: PieceKind) -> char {
    match kind {
        PieceKind::I => '█',
        PieceKind::O => '▓',
        PieceKind::T => '▒',
        PieceKind::S => '░',
        PieceKind::Z => '▚',
        PieceKind::J => '▞',
        PieceKind::L => '■',
    }
}

/// One fixed color per piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}
