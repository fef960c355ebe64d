// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Story cards: draggable units owning one input and one output handle.
//!
//! A card forwards its handles' notifications unchanged through its own
//! signals, so observers subscribe once per card instead of once per handle.
//! The forwarded payload is the [`HandleId`] of the handle that fired.

use std::rc::Rc;

use alexandria_story::StoryData;
use kurbo::{Point, Rect, Size};

use crate::drag::GrabState;
use crate::error::CardError;
use crate::handle::{Handle, HandleId, HandleRole};
use crate::input::{PointerButton, PointerEvent, PointerKind};
use crate::registry::CardId;
use crate::signal::{Signal, SubscriptionId};

/// The notifications a card publishes.
#[derive(Debug, Default)]
pub struct CardSignals {
    /// A link drag started on one of the card's handles.
    pub connection_started: Signal<HandleId>,
    /// A link drag started on one of the card's handles was released.
    pub connection_ended: Signal<HandleId>,
    /// The card's position changed.
    pub moved: Signal<CardId>,
}

#[derive(Debug)]
struct Forwarding {
    role: HandleRole,
    started: SubscriptionId,
    ended: SubscriptionId,
}

/// A draggable story card.
#[derive(Debug)]
pub struct Card {
    id: Option<CardId>,
    name: String,
    position: Point,
    size: Size,
    input: Option<Handle>,
    output: Option<Handle>,
    story: Option<Rc<StoryData>>,
    title: Option<String>,
    summary: Option<String>,
    grab: GrabState,
    pressed: Option<HandleRole>,
    connectable: bool,
    forwarding: Vec<Forwarding>,
    signals: Rc<CardSignals>,
}

impl Card {
    /// Creates a card with no handles at the origin.
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            id: None,
            name: name.into(),
            position: Point::ZERO,
            size,
            input: None,
            output: None,
            story: None,
            title: None,
            summary: None,
            grab: GrabState::default(),
            pressed: None,
            connectable: false,
            forwarding: Vec::new(),
            signals: Rc::default(),
        }
    }

    /// Sets the input handle. A handle built with the other role is rebuilt as
    /// an input over the same region.
    #[must_use]
    pub fn with_input(mut self, handle: Handle) -> Self {
        self.input = Some(with_role(handle, HandleRole::Input));
        self
    }

    /// Sets the output handle. A handle built with the other role is rebuilt as
    /// an output over the same region.
    #[must_use]
    pub fn with_output(mut self, handle: Handle) -> Self {
        self.output = Some(with_role(handle, HandleRole::Output));
        self
    }

    /// Sets the initial global position.
    #[must_use]
    pub fn at(mut self, position: impl Into<Point>) -> Self {
        self.position = position.into();
        self
    }

    /// Wires the card up after it enters the canvas.
    ///
    /// Binds both handles to `id` and forwards their notifications through
    /// [`Card::signals`]. If either handle is missing the card stays usable as a
    /// draggable body but never takes part in links.
    pub fn ready(&mut self, id: CardId) -> Result<(), CardError> {
        self.detach();
        self.id = Some(id);

        let (Some(input), Some(output)) = (self.input.as_mut(), self.output.as_mut()) else {
            tracing::error!(card = %self.name, "CRITICAL: handles are missing on card");
            return Err(CardError::MissingHandles {
                card: self.name.clone(),
            });
        };

        for handle in [input, output] {
            handle.bind(id);
            let signals = Rc::clone(&self.signals);
            let started = handle
                .connection_started()
                .subscribe(move |h| signals.connection_started.emit(h));
            let signals = Rc::clone(&self.signals);
            let ended = handle
                .connection_ended()
                .subscribe(move |h| signals.connection_ended.emit(h));
            self.forwarding.push(Forwarding {
                role: handle.role(),
                started,
                ended,
            });
        }
        self.connectable = true;
        Ok(())
    }

    /// Undoes [`Card::ready`]: drops forwarding and forgets the id.
    pub fn detach(&mut self) {
        for fwd in self.forwarding.drain(..) {
            let handle = match fwd.role {
                HandleRole::Input => self.input.as_ref(),
                HandleRole::Output => self.output.as_ref(),
            };
            if let Some(handle) = handle {
                handle.connection_started().unsubscribe(fwd.started);
                handle.connection_ended().unsubscribe(fwd.ended);
            }
        }
        for handle in [self.input.as_mut(), self.output.as_mut()].into_iter().flatten() {
            handle.unbind();
        }
        self.id = None;
        self.connectable = false;
        self.cancel_gesture();
    }

    /// Drops the pressed handle and any body drag without notifying anyone.
    pub(crate) fn cancel_gesture(&mut self) {
        self.grab.end();
        self.pressed = None;
    }

    /// Binds the display labels to `story`.
    ///
    /// `None` leaves the labels as they are.
    pub fn initialize(&mut self, story: Option<Rc<StoryData>>) {
        self.story = story;
        if let Some(story) = &self.story {
            self.title = Some(story.title.clone());
            self.summary = Some(story.short_content.clone());
        }
    }

    /// Routes a pointer event to the card and returns whether it was consumed.
    ///
    /// - A primary press on a handle is handed to that handle, which captures
    ///   the gesture until release.
    /// - Any other primary press on the body starts dragging the card.
    /// - Moves while dragging reposition the card and fire `moved`.
    /// - A primary release is reported to the capturing handle, if any, and ends
    ///   any body drag.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down(button) => {
                if button == PointerButton::Primary {
                    // A release that never arrived leaves the previous gesture open.
                    self.cancel_gesture();
                }
                if let Some(role) = self.handle_at(event.position) {
                    let consumed = self
                        .handle(role)
                        .is_some_and(|h| h.pointer_button(button, true));
                    if consumed {
                        self.pressed = Some(role);
                        return true;
                    }
                }
                if button == PointerButton::Primary && self.body_rect().contains(event.position) {
                    self.grab.start(event.position, self.position);
                    tracing::debug!(card = %self.name, "card drag started");
                    return true;
                }
                false
            }
            PointerKind::Up(button) => {
                if button != PointerButton::Primary {
                    return false;
                }
                if let Some(role) = self.pressed.take() {
                    if let Some(handle) = self.handle(role) {
                        handle.pointer_button(button, false);
                    }
                }
                if self.grab.is_grabbing() {
                    self.grab.end();
                    tracing::debug!(card = %self.name, "card drag stopped");
                }
                false
            }
            PointerKind::Move => match self.grab.update(event.position) {
                Some(origin) => {
                    self.set_position(origin);
                    true
                }
                None => false,
            },
        }
    }

    /// Moves the card and fires `moved`.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        if let Some(id) = self.id {
            self.signals.moved.emit(&id);
        }
    }

    /// The id assigned at registration.
    pub fn id(&self) -> Option<CardId> {
        self.id
    }

    /// Debug name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Global position of the card's top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Body size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Body region in global coordinates.
    pub fn body_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Returns true if `point` lies on the body or on either handle.
    pub fn hit(&self, point: Point) -> bool {
        self.body_rect().contains(point) || self.handle_at(point).is_some()
    }

    /// The handle with `role`, if the card has one.
    pub fn handle(&self, role: HandleRole) -> Option<&Handle> {
        match role {
            HandleRole::Input => self.input.as_ref(),
            HandleRole::Output => self.output.as_ref(),
        }
    }

    /// The handle whose region contains `point`, input first.
    pub fn handle_at(&self, point: Point) -> Option<HandleRole> {
        [HandleRole::Input, HandleRole::Output]
            .into_iter()
            .find(|&role| self.handle_rect(role).is_some_and(|r| r.contains(point)))
    }

    /// Global region of the handle with `role`.
    pub fn handle_rect(&self, role: HandleRole) -> Option<Rect> {
        self.handle(role).map(|h| h.global_rect(self.position))
    }

    /// Global anchor of the handle with `role`.
    pub fn connection_position(&self, role: HandleRole) -> Option<Point> {
        self.handle(role).map(|h| h.connection_position(self.position))
    }

    /// Returns true once [`Card::ready`] succeeded.
    pub fn is_connectable(&self) -> bool {
        self.connectable
    }

    /// Returns true while the body is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.grab.is_grabbing()
    }

    /// The bound story, if any.
    pub fn story(&self) -> Option<&Rc<StoryData>> {
        self.story.as_ref()
    }

    /// Title label text.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Summary label text.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The card's notification channels.
    pub fn signals(&self) -> &CardSignals {
        &self.signals
    }
}

fn with_role(handle: Handle, role: HandleRole) -> Handle {
    if handle.role() == role {
        handle
    } else {
        Handle::new(role, handle.local_rect())
    }
}
