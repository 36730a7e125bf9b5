//! Blocking input sources.

use std::io::{self, Read};

use crossterm::event::{self, Event};

use crate::decoder::SequenceDecoder;
use crate::map::map_key_event;
use crate::InputEvent;

/// A blocking stream of decoded input events.
pub trait InputSource: Send {
    /// Block until the next recognized event. `Ok(None)` means the input ended.
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Reads crossterm key events from the terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl InputSource for TerminalEvents {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(ev) = map_key_event(key) {
                    return Ok(Some(ev));
                }
            }
        }
    }
}

/// Decodes raw bytes from any reader, typically stdin in raw mode.
pub struct ByteStream<R> {
    reader: R,
    decoder: SequenceDecoder,
}

impl<R: Read + Send> ByteStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: SequenceDecoder::new(),
        }
    }
}

impl<R: Read + Send> InputSource for ByteStream<R> {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    if let Some(ev) = self.decoder.feed(byte[0]) {
                        return Ok(Some(ev));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
