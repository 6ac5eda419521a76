use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState, PointerButtonEvent};

/// Current input state for the window.
///
/// Updated by the runtime from translated platform events before the app's
/// `on_input` callback sees the same event.
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            // Releases that happen while unfocused never arrive.
            InputEvent::Focused(false) => self.keys_down.clear(),
            InputEvent::Focused(true) => {}

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(*key);
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                }
            },

            InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState};

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    #[test]
    fn key_press_and_release_track_held_set() {
        let mut s = InputState::default();
        s.apply_event(&key(Key::Escape, KeyState::Pressed));
        assert!(s.key_down(Key::Escape));
        s.apply_event(&key(Key::Escape, KeyState::Released));
        assert!(!s.key_down(Key::Escape));
    }

    #[test]
    fn button_press_updates_pointer_position() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButton::Left, 12.0, 34.0));
        assert_eq!(s.pointer_pos, Some((12.0, 34.0)));
    }

    #[test]
    fn pointer_leave_clears_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved { x: 1.0, y: 2.0 });
        assert_eq!(s.pointer_pos, Some((1.0, 2.0)));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&key(Key::Escape, KeyState::Pressed));
        s.apply_event(&key(Key::Unknown(7), KeyState::Pressed));

        s.apply_event(&InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
    }

    #[test]
    fn as_press_ignores_releases() {
        let release = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Released,
            x: 0.0,
            y: 0.0,
        });
        assert!(release.as_press().is_none());
        assert!(press(MouseButton::Left, 0.0, 0.0).as_press().is_some());
    }
}
