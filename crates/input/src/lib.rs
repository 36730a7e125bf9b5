//! Terminal input module.
//!
//! Turns keyboard input into [`InputEvent`]s. Two paths exist: crossterm key
//! events ([`TerminalEvents`]) and raw bytes decoded by [`SequenceDecoder`]
//! ([`ByteStream`]). Both recognize the left, right and up arrows plus the
//! quit keys; everything else is ignored.

pub mod decoder;
pub mod map;
pub mod source;

pub use blockfall_types as types;

pub use decoder::SequenceDecoder;
pub use map::{map_key_event, should_quit};
pub use source::{ByteStream, InputSource, TerminalEvents};

use types::Intent;

/// A decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Intent(Intent),
    /// Interrupt key or `q`: end the session.
    Quit,
}
