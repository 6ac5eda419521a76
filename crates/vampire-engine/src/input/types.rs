/// Keyboard key identifier.
///
/// Only keys the game reacts to get a variant. Everything else maps to
/// `Key::Unknown` carrying the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Button transition at a pointer position (logical px, top-left origin).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Focused(bool),
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    PointerButton(PointerButtonEvent),
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },
}

impl InputEvent {
    /// Returns the button event if this is a press, the trigger for click
    /// handling.
    pub fn as_press(&self) -> Option<&PointerButtonEvent> {
        match self {
            InputEvent::PointerButton(ev) if ev.state == MouseButtonState::Pressed => Some(ev),
            _ => None,
        }
    }
}
