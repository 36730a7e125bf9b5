//! Session runtime: configuration, the grid-owning loop, and the input reader.
//!
//! # Concurrency
//!
//! The grid has exactly one owner, the [`Session`]. The clock and the input
//! reader never touch it; they only produce [`SessionEvent`]s (ticks are
//! produced inside the session's own `select!`). This gives a single
//! serialization point without any lock:
//!
//! ```text
//! input source ──spawn_blocking──► mpsc::Sender<SessionEvent> ─┐
//!                                                               ▼
//!                    tokio::time::interval ──► Session::run (owns Grid) ──► Renderer
//! ```

pub mod config;
pub mod reader;
pub mod session;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use config::{InputMode, SessionConfig};
pub use reader::spawn_input_reader;
pub use session::{Renderer, Session, SessionEvent, SessionStats};
