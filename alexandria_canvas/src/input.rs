// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as delivered by the host.
//!
//! Positions are always in global (host window) coordinates. Components that
//! need local coordinates convert them with their own transforms.

use kurbo::Point;

/// A pointer button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary (usually left) button.
    Primary,
    /// The secondary (usually right) button.
    Secondary,
    /// The auxiliary (usually middle) button.
    Auxiliary,
}

bitflags::bitflags! {
    /// Set of pointer buttons held during a move.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary button held.
        const PRIMARY   = 0b0000_0001;
        /// Secondary button held.
        const SECONDARY = 0b0000_0010;
        /// Auxiliary button held.
        const AUXILIARY = 0b0000_0100;
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::PRIMARY,
            PointerButton::Secondary => Self::SECONDARY,
            PointerButton::Auxiliary => Self::AUXILIARY,
        }
    }
}

/// What happened to the pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerKind {
    /// A button was pressed.
    Down(PointerButton),
    /// A button was released.
    Up(PointerButton),
    /// The pointer moved.
    Move,
}

/// A single pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Pointer position in global coordinates.
    pub position: Point,
    /// Buttons held after this event was applied.
    pub buttons: PointerButtons,
}

impl PointerEvent {
    /// A press of `button` at `position`.
    pub fn down(button: PointerButton, position: impl Into<Point>) -> Self {
        Self {
            kind: PointerKind::Down(button),
            position: position.into(),
            buttons: button.into(),
        }
    }

    /// A release of `button` at `position`.
    pub fn up(button: PointerButton, position: impl Into<Point>) -> Self {
        Self {
            kind: PointerKind::Up(button),
            position: position.into(),
            buttons: PointerButtons::empty(),
        }
    }

    /// A move to `position` with `buttons` held.
    pub fn moved(position: impl Into<Point>, buttons: PointerButtons) -> Self {
        Self {
            kind: PointerKind::Move,
            position: position.into(),
            buttons,
        }
    }

    /// Primary press shorthand.
    pub fn press(position: impl Into<Point>) -> Self {
        Self::down(PointerButton::Primary, position)
    }

    /// Primary release shorthand.
    pub fn release(position: impl Into<Point>) -> Self {
        Self::up(PointerButton::Primary, position)
    }

    /// Move with the primary button held.
    pub fn drag_to(position: impl Into<Point>) -> Self {
        Self::moved(position, PointerButtons::PRIMARY)
    }

    /// Returns true for a primary-button press.
    pub fn is_primary_down(&self) -> bool {
        self.kind == PointerKind::Down(PointerButton::Primary)
    }

    /// Returns true for a primary-button release.
    pub fn is_primary_up(&self) -> bool {
        self.kind == PointerKind::Up(PointerButton::Primary)
    }
}
