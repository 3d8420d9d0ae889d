use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, KeyState};
use super::Key;

/// Current input state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies `ev` to the held-key state and records transitions into `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    #[test]
    fn press_is_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::P, KeyState::Pressed, false));
        assert!(state.key_down(Key::P));
        assert!(frame.pressed(Key::P));

        // Auto-repeat does not produce a second transition.
        frame.clear();
        state.apply_event(&mut frame, key(Key::P, KeyState::Pressed, true));
        assert!(!frame.pressed(Key::P));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn release_clears_held_key() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::Escape, KeyState::Released, false));

        assert!(!state.key_down(Key::Escape));
        assert!(frame.keys_released.contains(&Key::Escape));
    }

    #[test]
    fn stray_release_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Released, false));
        assert!(frame.keys_released.is_empty());
    }

    #[test]
    fn focus_loss_drops_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::Focused(true));
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed, false));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.focused);
        assert!(state.keys_down.is_empty());
    }
}
