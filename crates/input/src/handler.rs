//! Held-key tracker for terminal environments.
//!
//! Movement is driven by how long keys are held, but many terminals only send
//! key presses (and auto-repeat presses), never releases. Each movement key is
//! therefore treated as held until either its release event arrives or no
//! press for it has been seen for `key_release_timeout_ms`. Once the terminal
//! has delivered a real release event the timeout is no longer applied.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::map::action_for_key;
use crate::types::{MoveInput, ViewerAction};

// Longer than a typical auto-repeat interval (~30ms) so a held key does not
// flicker, short enough that a tap does not walk for long.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks which movement keys are held.
///
/// Time is advanced explicitly with [`InputHandler::update`], so behavior is
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct InputHandler {
    clock_ms: u64,
    /// Clock value of the last press per action, `None` when released.
    last_press_ms: [Option<u64>; 4],
    key_release_timeout_ms: u32,
    release_events_seen: bool,
}

fn slot(action: ViewerAction) -> usize {
    match action {
        ViewerAction::TurnLeft => 0,
        ViewerAction::TurnRight => 1,
        ViewerAction::MoveForward => 2,
        ViewerAction::MoveBackward => 3,
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            clock_ms: 0,
            last_press_ms: [None; 4],
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events_seen: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// True once a release event has been received from the terminal.
    pub fn has_release_events(&self) -> bool {
        self.release_events_seen
    }

    /// Record a press (or auto-repeat) of `code`.
    ///
    /// Returns the action if the key was not already held.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<ViewerAction> {
        let action = action_for_key(code)?;
        let entry = &mut self.last_press_ms[slot(action)];
        let newly = entry.is_none();
        *entry = Some(self.clock_ms);
        newly.then_some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.release_events_seen = true;
        if let Some(action) = action_for_key(code) {
            self.last_press_ms[slot(action)] = None;
        }
    }

    /// Advance the clock by `elapsed_ms` and auto-release stale keys.
    ///
    /// Returns the actions released by the timeout during this call.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<ViewerAction, 4> {
        let mut released = ArrayVec::<ViewerAction, 4>::new();
        self.clock_ms += elapsed_ms as u64;
        if self.release_events_seen {
            return released;
        }

        for action in ViewerAction::ALL {
            let entry = &mut self.last_press_ms[slot(action)];
            if let Some(at) = *entry {
                if self.clock_ms.saturating_sub(at) > self.key_release_timeout_ms as u64 {
                    *entry = None;
                    released.push(action);
                }
            }
        }
        released
    }

    pub fn is_held(&self, action: ViewerAction) -> bool {
        self.last_press_ms[slot(action)].is_some()
    }

    /// Actions currently held, in [`ViewerAction::ALL`] order.
    pub fn held(&self) -> ArrayVec<ViewerAction, 4> {
        ViewerAction::ALL
            .into_iter()
            .filter(|a| self.is_held(*a))
            .collect()
    }

    /// Snapshot of the held keys as per-frame movement commands.
    pub fn move_input(&self) -> MoveInput {
        let mut input = MoveInput::default();
        for action in ViewerAction::ALL {
            input.set(action, self.is_held(action));
        }
        input
    }

    /// Release everything (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.last_press_ms = [None; 4];
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_reports_only_new_holds() {
        let mut ih = InputHandler::new();
        assert_eq!(
            ih.handle_key_press(KeyCode::Char('w')),
            Some(ViewerAction::MoveForward)
        );
        assert_eq!(ih.handle_key_press(KeyCode::Up), None);
        assert_eq!(ih.handle_key_press(KeyCode::Char('x')), None);
        assert!(ih.move_input().forward);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Left);

        assert!(ih.update(50).is_empty());
        assert!(ih.is_held(ViewerAction::TurnLeft));

        let released = ih.update(1);
        assert_eq!(released.as_slice(), &[ViewerAction::TurnLeft]);
        assert!(ih.move_input().is_idle());
    }

    #[test]
    fn test_repeat_presses_keep_key_held() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Up);
        for _ in 0..10 {
            assert!(ih.update(30).is_empty());
            ih.handle_key_press(KeyCode::Up);
        }
        assert!(ih.is_held(ViewerAction::MoveForward));
    }

    #[test]
    fn test_non_movement_key_does_not_extend_hold() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Right);
        ih.update(40);
        ih.handle_key_press(KeyCode::Char('m'));
        assert_eq!(ih.update(20).as_slice(), &[ViewerAction::TurnRight]);
    }

    #[test]
    fn test_release_events_disable_timeout() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(50);
        ih.handle_key_press(KeyCode::Char('a'));
        ih.handle_key_press(KeyCode::Char('s'));
        ih.handle_key_release(KeyCode::Char('a'));
        assert!(ih.has_release_events());

        assert!(ih.update(1_000).is_empty());
        assert_eq!(ih.held().as_slice(), &[ViewerAction::MoveBackward]);
    }

    #[test]
    fn test_default_key_release_timeout_is_non_zero() {
        let ih = InputHandler::new();
        assert!(ih.key_release_timeout_ms() > 0);
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ih = InputHandler::new();
        ih.handle_key_press(KeyCode::Left);
        ih.handle_key_press(KeyCode::Up);
        assert_eq!(ih.held().len(), 2);
        ih.reset();
        assert!(ih.held().is_empty());
        assert!(ih.move_input().is_idle());
    }
}
