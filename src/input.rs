//! Host-independent input events.
//!
//! Render backends translate their native pointer, keyboard and gesture
//! events into these types before handing them to a
//! [`Plotter`](crate::plotter::Plotter).

use std::ops::{BitOr, BitOrAssign};

/// A pointer button, including the two wheel directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Middle button.
    Middle,
    /// Secondary button.
    Right,
    /// One wheel notch away from the user.
    WheelUp,
    /// One wheel notch toward the user.
    WheelDown,
}

/// Bitmask of held pointer buttons and keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonState(u32);

impl ButtonState {
    /// Nothing held.
    pub const NONE: Self = Self(0);
    /// Primary button held.
    pub const LEFT: Self = Self(1 << 0);
    /// Middle button held.
    pub const MIDDLE: Self = Self(1 << 1);
    /// Secondary button held.
    pub const RIGHT: Self = Self(1 << 2);
    /// Wheel moved up.
    pub const WHEEL_UP: Self = Self(1 << 3);
    /// Wheel moved down.
    pub const WHEEL_DOWN: Self = Self(1 << 4);
    /// Shift held.
    pub const SHIFT: Self = Self(1 << 16);
    /// Control held.
    pub const CTRL: Self = Self(1 << 17);
    /// Alt / option held.
    pub const ALT: Self = Self(1 << 18);
    /// Command / super held. Switches pinch zoom to the Y axis.
    pub const CMD: Self = Self(1 << 19);

    const BUTTON_MASK: u32 = 0xffff;

    /// Raw bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Check whether every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Only the pointer-button bits.
    pub fn buttons(self) -> Self {
        Self(self.0 & Self::BUTTON_MASK)
    }

    /// Only the keyboard-modifier bits.
    pub fn modifiers(self) -> Self {
        Self(self.0 & !Self::BUTTON_MASK)
    }

    /// Set or clear the bits of `other`.
    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for ButtonState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<MouseButton> for ButtonState {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Middle => Self::MIDDLE,
            MouseButton::Right => Self::RIGHT,
            MouseButton::WheelUp => Self::WHEEL_UP,
            MouseButton::WheelDown => Self::WHEEL_DOWN,
        }
    }
}

/// Generalised gesture input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialInput {
    /// Two-axis scroll. `p1`/`p2` carry the horizontal/vertical pixel deltas.
    Scroll,
    /// Pinch zoom. `p1` carries the magnification delta.
    Zoom,
    /// Rotation. Ignored by the plotter.
    Rotate,
}
