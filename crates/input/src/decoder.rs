//! Byte-level decoder for raw terminal input.
//!
//! In raw mode the terminal hands over arrow keys as escape sequences
//! (`ESC [ A` for up, or `ESC O A` in application cursor mode) and the
//! interrupt key as a plain `0x03` byte. The decoder is fed one byte at a time
//! and yields an event whenever a recognized sequence completes. Anything else
//! is dropped without error.

use arrayvec::ArrayVec;

use crate::types::Intent;
use crate::InputEvent;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Sequence,
}

#[derive(Debug, Clone)]
pub struct SequenceDecoder {
    state: State,
    /// Parameter and intermediate bytes of the current sequence.
    params: ArrayVec<u8, 8>,
}

impl SequenceDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            params: ArrayVec::new(),
        }
    }

    /// Feed one byte. Returns an event when a recognized sequence completes.
    pub fn feed(&mut self, byte: u8) -> Option<InputEvent> {
        if byte == CTRL_C {
            self.state = State::Ground;
            return Some(InputEvent::Quit);
        }

        match self.state {
            State::Ground => match byte {
                ESC => {
                    self.state = State::Escape;
                    None
                }
                b'q' | b'Q' => Some(InputEvent::Quit),
                _ => None,
            },
            State::Escape => match byte {
                b'[' | b'O' => {
                    self.params.clear();
                    self.state = State::Sequence;
                    None
                }
                ESC => None,
                _ => {
                    self.state = State::Ground;
                    None
                }
            },
            State::Sequence => match byte {
                0x20..=0x3f => {
                    // Overlong sequences keep a non-empty buffer and are ignored below.
                    let _ = self.params.try_push(byte);
                    None
                }
                0x40..=0x7e => {
                    self.state = State::Ground;
                    if !self.params.is_empty() {
                        return None;
                    }
                    final_byte_intent(byte).map(InputEvent::Intent)
                }
                ESC => {
                    self.state = State::Escape;
                    None
                }
                _ => {
                    self.state = State::Ground;
                    None
                }
            },
        }
    }

    /// Decode a whole buffer, collecting every event in order.
    pub fn feed_all(&mut self, bytes: &[u8]) -> Vec<InputEvent> {
        bytes.iter().filter_map(|b| self.feed(*b)).collect()
    }
}

impl Default for SequenceDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn final_byte_intent(byte: u8) -> Option<Intent> {
    match byte {
        b'A' => Some(Intent::Rotate),
        b'C' => Some(Intent::MoveRight),
        b'D' => Some(Intent::MoveLeft),
        _ => None,
    }
}
