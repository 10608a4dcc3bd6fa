//! Key mapping from terminal events to viewer actions.

use crate::types::ViewerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Display toggles handled by the presenter, not the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewToggle {
    Minimap,
    Hud,
}

/// Map a key to the movement it drives while held.
pub fn action_for_key(code: KeyCode) -> Option<ViewerAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(ViewerAction::TurnLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(ViewerAction::TurnRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(ViewerAction::MoveForward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(ViewerAction::MoveBackward)
        }
        _ => None,
    }
}

/// Map a key press to a display toggle.
pub fn toggle_for_key(key: KeyEvent) -> Option<ViewToggle> {
    match key.code {
        KeyCode::Char('m') | KeyCode::Char('M') => Some(ViewToggle::Minimap),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(ViewToggle::Hud),
        _ => None,
    }
}

/// Check if key should quit the renderer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
