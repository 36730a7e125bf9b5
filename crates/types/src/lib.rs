//! Core types module - shared data structures and constants
//!
//! Pure data shared by the simulation, the input decoders and the renderer.
//! Nothing here performs I/O.
//!
//! # Grid Dimensions
//!
//! The default playfield is 10 columns by 20 rows, row 0 at the top. Grids can
//! be built with other sizes as long as both sides are at least
//! [`MIN_GRID_SIDE`], which keeps every shape placeable in either orientation.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Interval between simulation steps |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
//!
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert_eq!(Intent::Rotate.as_str(), "rotate");
//!
//! assert_eq!(DEFAULT_GRID_WIDTH, 10);
//! assert_eq!(DEFAULT_GRID_HEIGHT, 20);
//! ```

/// Default grid width in cells (10 columns)
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Smallest accepted grid side; the longest shape is 4 cells.
pub const MIN_GRID_SIDE: u16 = 4;

/// Interval between simulation steps in milliseconds.
pub const TICK_MS: u64 = 500;

/// The seven piece kinds.
///
/// A kind is also the color identity of the cells it leaves behind:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Lowercase single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Occupied, colored by the kind that settled there
pub type Cell = Option<PieceKind>;

/// Player intents decoded from keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Rotate the active piece 90° clockwise
    Rotate,
}

impl Intent {
    /// Name used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::Rotate => "rotate",
        }
    }
}

/// Side of a piece used for edge-cell classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Bottom,
    Left,
    Right,
}
