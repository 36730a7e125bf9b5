//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the board simulation and collision model. It has no
//! dependencies on terminals, clocks, or threads: callers drive it by calling
//! [`Grid::step`] once per tick and [`Grid::apply_intent`] for each decoded
//! key.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven shape matrices and random selection
//! - [`piece`]: the falling piece, edge cells, rotation geometry
//! - [`grid`]: settled cells, collision predicates, line clearing, the step
//! - [`rng`]: seedable LCG so games replay from a seed
//! - [`snapshot`]: owned copy of the visible grid for renderers
//!
//! # Game Over
//!
//! When a freshly spawned piece's bounding box overlaps a settled cell the
//! grid is over: the piece is dropped and further steps and intents do nothing.
//!
//! # Example
//!
//! ```
//! use blockfall_core::Grid;
//! use blockfall_types::{Intent, PieceKind};
//!
//! let mut grid = Grid::new(10, 20, 12345);
//! grid.spawn(PieceKind::O);
//!
//! assert!(grid.apply_intent(Intent::MoveLeft));
//! let event = grid.step();
//! assert!(event.moved);
//! assert_eq!(grid.active().unwrap().y(), 1);
//! ```

pub mod grid;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use grid::{Grid, StepEvent};
pub use piece::Piece;
pub use rng::SimpleRng;
pub use shapes::{random_shape, shape_of, ShapeMatrix, ShapeRecord, CATALOG};
pub use snapshot::GridSnapshot;
