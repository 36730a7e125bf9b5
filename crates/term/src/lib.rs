//! Terminal rendering for the grid.
//!
//! [`GameView`] lays a [`blockfall_core::GridSnapshot`] out into a
//! [`FrameBuffer`] without touching the terminal; [`TerminalRenderer`] owns
//! raw mode and the alternate screen and flushes whole frames.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, piece_glyph, GameView, Viewport};
pub use renderer::{encode_full_into, TerminalRenderer};
