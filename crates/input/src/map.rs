//! Key mapping from crossterm events to input events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Intent;
use crate::InputEvent;

/// Map a key event. Only presses of the arrow keys and the quit keys count.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if should_quit(key) {
        return Some(InputEvent::Quit);
    }
    match key.code {
        KeyCode::Left => Some(InputEvent::Intent(Intent::MoveLeft)),
        KeyCode::Right => Some(InputEvent::Intent(Intent::MoveRight)),
        KeyCode::Up => Some(InputEvent::Intent(Intent::Rotate)),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
