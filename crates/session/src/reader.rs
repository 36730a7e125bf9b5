//! Input reader task.
//!
//! Input sources block, so the reader runs on tokio's blocking pool and hands
//! each decoded event to the session through the channel. A quit key, the end
//! of the input, or a read error all end the reader and tell the session to
//! stop.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::input::{InputEvent, InputSource};
use crate::session::SessionEvent;

pub fn spawn_input_reader<S>(mut source: S, tx: mpsc::Sender<SessionEvent>) -> JoinHandle<()>
where
    S: InputSource + 'static,
{
    tokio::task::spawn_blocking(move || loop {
        let event = match source.next_event() {
            Ok(Some(InputEvent::Intent(intent))) => SessionEvent::Intent(intent),
            Ok(Some(InputEvent::Quit)) => {
                debug!("quit key");
                SessionEvent::Quit
            }
            Ok(None) => {
                debug!("input closed");
                SessionEvent::Quit
            }
            Err(e) => {
                warn!(error = %e, "input read failed");
                SessionEvent::Quit
            }
        };

        let quit = event == SessionEvent::Quit;
        if tx.blocking_send(event).is_err() || quit {
            break;
        }
    })
}
