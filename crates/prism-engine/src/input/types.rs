use std::fmt;

/// Keyboard key identifier.
///
/// Covers the keys the engine binds. Anything else maps to
/// `Key::Unknown(code)` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// `=`/`+` on the main row.
    Equal,
    Minus,
    NumpadAdd,
    NumpadSubtract,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    Unknown(u32),
}

impl Key {
    /// Numeric value of a main-row digit key.
    pub fn digit(self) -> Option<u8> {
        Some(match self {
            Key::Digit0 => 0,
            Key::Digit1 => 1,
            Key::Digit2 => 2,
            Key::Digit3 => 3,
            Key::Digit4 => 4,
            Key::Digit5 => 5,
            Key::Digit6 => 6,
            Key::Digit7 => 7,
            Key::Digit8 => 8,
            Key::Digit9 => 9,
            _ => return None,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Scroll delta. `Line` is notched wheel input; `Pixel` is touchpad precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScrollDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

/// Platform-agnostic input events. Positions are physical pixels,
/// origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        /// True for auto-repeat presses.
        repeat: bool,
        modifiers: Modifiers,
    },

    PointerMoved { x: f32, y: f32 },

    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
        x: f32,
        y: f32,
    },

    Scroll(ScrollDelta),

    /// Committed characters, from key events or IME.
    Text(String),

    PointerLeft,

    Focused(bool),
}

impl InputEvent {
    /// Press or auto-repeat of `key`.
    pub fn is_press_of(&self, key: Key) -> bool {
        matches!(self, InputEvent::Key { key: k, state: KeyState::Pressed, .. } if *k == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_values() {
        assert_eq!(Key::Digit0.digit(), Some(0));
        assert_eq!(Key::Digit7.digit(), Some(7));
        assert_eq!(Key::A.digit(), None);
        assert_eq!(Key::NumpadAdd.digit(), None);
    }

    #[test]
    fn repeat_counts_as_press() {
        let ev = InputEvent::Key {
            key: Key::W,
            state: KeyState::Pressed,
            repeat: true,
            modifiers: Modifiers::default(),
        };
        assert!(ev.is_press_of(Key::W));
        assert!(!ev.is_press_of(Key::S));
    }
}
