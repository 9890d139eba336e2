// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Backend-agnostic input events.
//!
//! A platform layer translates whatever its window system produces into
//! [`InputEvent`]s. Input devices consume them; nothing else in the engine
//! sees raw platform input.

/// A physical keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    Escape,
    Space,
    Enter,
    Tab,
    Backspace,
    Comma,
    Period,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The first extended button (typically "back" on the side).
    X1,
}

impl MouseButton {
    /// Every button, in slot order.
    pub const ALL: [MouseButton; 4] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::X1,
    ];

    /// Index of the button in a fixed-size button table.
    pub const fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::X1 => 3,
        }
    }
}

/// A raw user input action.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down.
    KeyPressed {
        /// The key.
        key: KeyCode,
    },
    /// A key went up.
    KeyReleased {
        /// The key.
        key: KeyCode,
    },
    /// A mouse button went down.
    MouseButtonPressed {
        /// The button.
        button: MouseButton,
    },
    /// A mouse button went up.
    MouseButtonReleased {
        /// The button.
        button: MouseButton,
    },
    /// The mouse moved by a relative amount since the previous event.
    MouseMoved {
        /// Horizontal movement.
        delta_x: f32,
        /// Vertical movement.
        delta_y: f32,
    },
    /// The wheel was scrolled.
    MouseWheelScrolled {
        /// Wheel movement, positive away from the user.
        delta: f32,
    },
}

impl InputEvent {
    /// Whether the event belongs to the keyboard.
    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            InputEvent::KeyPressed { .. } | InputEvent::KeyReleased { .. }
        )
    }

    /// Whether the event belongs to the mouse.
    pub fn is_mouse(&self) -> bool {
        !self.is_keyboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_device_routing() {
        assert!(InputEvent::KeyPressed { key: KeyCode::Escape }.is_keyboard());
        assert!(InputEvent::MouseWheelScrolled { delta: 1.0 }.is_mouse());
        assert!(!InputEvent::MouseButtonPressed {
            button: MouseButton::Left
        }
        .is_keyboard());
    }

    #[test]
    fn test_mouse_button_indices_are_unique() {
        for (slot, button) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), slot);
        }
    }
}
