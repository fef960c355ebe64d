// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connection handles: the role-tagged anchor points on a card.
//!
//! A [`Handle`] is a stateless event source plus a geometry query. It reports a
//! primary-button press on itself as `ConnectionStarted` and the matching
//! release as `ConnectionEnded`. The release is reported by the handle that
//! received the press, not by whatever lies under the pointer at release time;
//! the card routes the release back to that handle.

use kurbo::{Point, Rect};

use crate::input::PointerButton;
use crate::registry::CardId;
use crate::signal::Signal;

/// Which side of a link a handle can be.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandleRole {
    /// Left side of a card; receives links.
    Input,
    /// Right side of a card; emits links.
    Output,
}

impl HandleRole {
    /// Returns true for [`HandleRole::Input`].
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    /// The other role.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }
}

impl core::fmt::Display for HandleRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}

/// Identity of a handle: its owning card plus its role.
///
/// Every card owns exactly one handle per role, so this pair is unique and the
/// owning card is always recoverable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandleId {
    /// The card owning the handle.
    pub card: CardId,
    /// The handle's role on that card.
    pub role: HandleRole,
}

impl HandleId {
    /// Creates a handle id.
    pub const fn new(card: CardId, role: HandleRole) -> Self {
        Self { card, role }
    }

    /// Shorthand for `self.role.is_input()`.
    pub const fn is_input(self) -> bool {
        self.role.is_input()
    }
}

/// An interactive anchor region on a card.
#[derive(Debug)]
pub struct Handle {
    id: Option<HandleId>,
    role: HandleRole,
    rect: Rect,
    connection_started: Signal<HandleId>,
    connection_ended: Signal<HandleId>,
}

impl Handle {
    /// Creates a handle with `rect` given in card-local coordinates.
    pub fn new(role: HandleRole, rect: Rect) -> Self {
        Self {
            id: None,
            role,
            rect,
            connection_started: Signal::new(),
            connection_ended: Signal::new(),
        }
    }

    /// Creates an input handle.
    pub fn input(rect: Rect) -> Self {
        Self::new(HandleRole::Input, rect)
    }

    /// Creates an output handle.
    pub fn output(rect: Rect) -> Self {
        Self::new(HandleRole::Output, rect)
    }

    pub(crate) fn bind(&mut self, card: CardId) -> HandleId {
        let id = HandleId::new(card, self.role);
        self.id = Some(id);
        id
    }

    pub(crate) fn unbind(&mut self) {
        self.id = None;
    }

    /// The handle's id, once its card has been registered.
    pub fn id(&self) -> Option<HandleId> {
        self.id
    }

    /// The handle's role.
    pub fn role(&self) -> HandleRole {
        self.role
    }

    /// Shorthand for `self.role().is_input()`.
    pub fn is_input(&self) -> bool {
        self.role.is_input()
    }

    /// Region in card-local coordinates.
    pub fn local_rect(&self) -> Rect {
        self.rect
    }

    /// Region in global coordinates for a card whose origin is at `card_origin`.
    pub fn global_rect(&self, card_origin: Point) -> Rect {
        self.rect + card_origin.to_vec2()
    }

    /// Visual center in global coordinates. Computed from the current layout
    /// on every call.
    pub fn connection_position(&self, card_origin: Point) -> Point {
        self.global_rect(card_origin).center()
    }

    /// Fired with this handle's id when a drag starts on it.
    pub fn connection_started(&self) -> &Signal<HandleId> {
        &self.connection_started
    }

    /// Fired with this handle's id when the drag it started is released.
    pub fn connection_ended(&self) -> &Signal<HandleId> {
        &self.connection_ended
    }

    /// Feeds a button transition that the card has routed to this handle.
    ///
    /// Returns `true` when the event is consumed (a primary press), so that it
    /// does not also start a drag of the card body underneath.
    pub fn pointer_button(&self, button: PointerButton, pressed: bool) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        let Some(id) = self.id else {
            return false;
        };
        if pressed {
            self.connection_started.emit(&id);
            true
        } else {
            self.connection_ended.emit(&id);
            false
        }
    }
}
