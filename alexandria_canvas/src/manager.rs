// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The connection manager: card registry, link drags, and link geometry.
//!
//! ## Drag lifecycle
//!
//! ```text
//!            ConnectionStarted(h)
//!   Idle ───────────────────────────▶ Dragging { source: h, line }
//!    ▲                                     │
//!    │  ConnectionEnded: commit or reject  │
//!    └─────────────────────────────────────┘
//!       unclaimed primary release: cancel
//! ```
//!
//! While dragging, [`ConnectionManager::process`] keeps the transient line's
//! free end on the pointer. On release the manager looks for a handle under the
//! pointer, scanning cards in registration order (input before output, first
//! match wins), and validates the pair:
//!
//! 1. the target must sit on a different card than the source;
//! 2. exactly one of the two handles must be an input.
//!
//! A valid pair becomes a [`Link`]; anything else cancels the drag and is
//! reported as [`DragResolution::Rejected`]. Either way the transient line is
//! destroyed.
//!
//! ## Geometry
//!
//! Line points live in the manager's local space: global anchors are mapped
//! through the inverse of [`ConnectionManager::transform`]. Every card move
//! rescans all links and refreshes those touching the moved card.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use hashbrown::HashMap;
use kurbo::{Affine, Point};
use peniko::Color;

use crate::card::Card;
use crate::error::ConnectError;
use crate::handle::HandleId;
use crate::input::{PointerButton, PointerEvent, PointerKind};
use crate::registry::{CardId, CardRegistry};
use crate::render::{LineId, LineRenderer, LineStyle};
use crate::signal::SubscriptionId;

/// Stroke settings for transient and committed link lines.
#[derive(Copy, Clone, Debug)]
pub struct LinkStyle {
    /// Stroke width of both kinds of line.
    pub thickness: f64,
    /// Color of the line following the pointer during a drag.
    pub active_color: Color,
    /// Color of committed links.
    pub permanent_color: Color,
}

impl LinkStyle {
    /// Style for the transient drag line.
    pub fn active(&self) -> LineStyle {
        LineStyle {
            width: self.thickness,
            color: self.active_color,
        }
    }

    /// Style for committed links.
    pub fn permanent(&self) -> LineStyle {
        LineStyle {
            width: self.thickness,
            color: self.permanent_color,
        }
    }
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            thickness: 4.0,
            active_color: Color::from_rgba8(0x8B, 0x00, 0x00, 0xFF),
            permanent_color: Color::from_rgba8(0xA9, 0xA9, 0xA9, 0xFF),
        }
    }
}

/// Identifier of a committed link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(u64);

/// A committed connection from `source` to `target`.
///
/// The two handles always sit on different cards and always have opposite
/// roles. `source` is the handle the drag started on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    id: LinkId,
    source: HandleId,
    target: HandleId,
    line: LineId,
}

impl Link {
    /// The link's id.
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Handle the drag started on.
    pub fn source(&self) -> HandleId {
        self.source
    }

    /// Handle the drag was released on.
    pub fn target(&self) -> HandleId {
        self.target
    }

    /// The rendered polyline.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns true if either end sits on `card`.
    pub fn touches(&self, card: CardId) -> bool {
        self.source.card == card || self.target.card == card
    }
}

/// How a link drag ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragResolution {
    /// A link was committed.
    Linked(LinkId),
    /// The drag was cancelled.
    Rejected(ConnectError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { source: HandleId, line: LineId },
}

#[derive(Copy, Clone, Debug)]
enum CardEvent {
    ConnectionStarted(HandleId),
    ConnectionEnded(HandleId),
    Moved(CardId),
}

impl CardEvent {
    fn card(self) -> CardId {
        match self {
            Self::ConnectionStarted(h) | Self::ConnectionEnded(h) => h.card,
            Self::Moved(card) => card,
        }
    }
}

#[derive(Debug)]
struct CardSubscriptions {
    started: SubscriptionId,
    ended: SubscriptionId,
    moved: SubscriptionId,
}

type Mailbox = Rc<RefCell<VecDeque<CardEvent>>>;

/// Orchestrates cards, the single in-flight link drag, and committed links.
///
/// The manager owns the line renderer and every line it creates.
#[derive(Debug)]
pub struct ConnectionManager<R> {
    renderer: R,
    style: LinkStyle,
    transform: Affine,
    cards: CardRegistry,
    stacking: Vec<CardId>,
    subscriptions: HashMap<CardId, CardSubscriptions>,
    mailbox: Mailbox,
    drag: DragState,
    links: Vec<Link>,
    next_link: u64,
    pointer: Point,
    capture: Option<CardId>,
}

impl<R: LineRenderer> ConnectionManager<R> {
    /// Creates a manager with the default [`LinkStyle`] and an identity transform.
    pub fn new(renderer: R) -> Self {
        Self::with_style(renderer, LinkStyle::default())
    }

    /// Creates a manager with the given line style.
    pub fn with_style(renderer: R, style: LinkStyle) -> Self {
        Self {
            renderer,
            style,
            transform: Affine::IDENTITY,
            cards: CardRegistry::new(),
            stacking: Vec::new(),
            subscriptions: HashMap::new(),
            mailbox: Mailbox::default(),
            drag: DragState::Idle,
            links: Vec::new(),
            next_link: 0,
            pointer: Point::ZERO,
            capture: None,
        }
    }

    /// Registers a card that entered the canvas.
    ///
    /// The card is readied (see [`Card::ready`]) and its notifications are
    /// subscribed. A card missing a handle is still registered and draggable,
    /// but never takes part in links.
    pub fn register_card(&mut self, card: Card) -> CardId {
        let id = self.cards.insert(card);
        if let Some(card) = self.cards.get_mut(id) {
            tracing::info!(card = %card.name(), "registering card");
            if let Err(err) = card.ready(id) {
                tracing::debug!(%err, card = %card.name(), "card registered without links");
            }

            let signals = card.signals();
            let mailbox = Rc::clone(&self.mailbox);
            let started = signals.connection_started.subscribe(move |h| {
                mailbox
                    .borrow_mut()
                    .push_back(CardEvent::ConnectionStarted(*h));
            });
            let mailbox = Rc::clone(&self.mailbox);
            let ended = signals.connection_ended.subscribe(move |h| {
                mailbox.borrow_mut().push_back(CardEvent::ConnectionEnded(*h));
            });
            let mailbox = Rc::clone(&self.mailbox);
            let moved = signals.moved.subscribe(move |c| {
                mailbox.borrow_mut().push_back(CardEvent::Moved(*c));
            });
            self.subscriptions.insert(
                id,
                CardSubscriptions {
                    started,
                    ended,
                    moved,
                },
            );
        }
        self.stacking.push(id);
        id
    }

    /// Unregisters a card that is leaving the canvas and hands it back.
    ///
    /// Subscriptions are dropped, a drag started on the card is cancelled, and
    /// every link touching the card is removed together with its line.
    pub fn unregister_card(&mut self, id: CardId) -> Option<Card> {
        let mut card = self.cards.remove(id)?;
        tracing::info!(card = %card.name(), "unregistering card");

        if let Some(subs) = self.subscriptions.remove(&id) {
            let signals = card.signals();
            signals.connection_started.unsubscribe(subs.started);
            signals.connection_ended.unsubscribe(subs.ended);
            signals.moved.unsubscribe(subs.moved);
        }
        card.detach();
        self.mailbox.borrow_mut().retain(|event| event.card() != id);
        self.stacking.retain(|&c| c != id);
        if self.capture == Some(id) {
            self.capture = None;
        }

        if matches!(self.drag, DragState::Dragging { source, .. } if source.card == id) {
            tracing::warn!(card = %card.name(), error = %ConnectError::SourceRemoved, "cancelling drag");
            self.cancel_connection();
        }

        let renderer = &mut self.renderer;
        self.links.retain(|link| {
            if link.touches(id) {
                renderer.destroy_line(link.line);
                false
            } else {
                true
            }
        });
        Some(card)
    }

    /// Feeds one pointer event from the host.
    ///
    /// A press goes to the topmost card under the pointer, which then captures
    /// the pointer; moves and the release go to the capturing card. Card
    /// notifications raised along the way are handled before this returns. A
    /// primary release nobody consumed cancels a drag that is still in flight.
    ///
    /// Returns how a link drag ended, if this event ended one.
    pub fn pointer_event(&mut self, event: PointerEvent) -> Option<DragResolution> {
        self.pointer = event.position;

        let consumed = match event.kind {
            PointerKind::Down(button) => {
                if button == PointerButton::Primary {
                    self.release_capture();
                }
                self.dispatch_press(&event)
            }
            PointerKind::Move => self.dispatch_captured(self.capture, &event),
            PointerKind::Up(button) => {
                let target = if button == PointerButton::Primary {
                    self.capture.take()
                } else {
                    self.capture
                };
                self.dispatch_captured(target, &event)
            }
        };

        let mut resolution = self.drain_events();

        if event.is_primary_up() && !consumed && self.is_dragging() {
            tracing::warn!(error = %ConnectError::Interrupted, "cancelling drag");
            self.cancel_connection();
            resolution = Some(DragResolution::Rejected(ConnectError::Interrupted));
        }
        resolution
    }

    /// Per-frame update: pins the transient line's free end to the pointer.
    pub fn process(&mut self) {
        if let DragState::Dragging { line, .. } = self.drag {
            if self.renderer.point_count(line) == 2 {
                let local = self.to_local(self.pointer);
                self.renderer.set_point(line, 1, local);
            }
        }
    }

    /// Starts a link drag from `source`.
    ///
    /// Ignored while another drag is in flight, and for handles whose card is
    /// not registered or not connectable.
    pub fn start_connection(&mut self, source: HandleId) {
        if let DragState::Dragging { source: current, .. } = self.drag {
            tracing::warn!(?current, ignored = ?source, "connection already in progress");
            return;
        }
        let Some(anchor) = anchor(&self.cards, source) else {
            tracing::warn!(?source, "connection start from unknown handle");
            return;
        };
        tracing::info!(?source, "starting line");

        let local = self.to_local(anchor);
        let line = self.renderer.create_line(self.style.active());
        self.renderer.add_point(line, local);
        self.renderer.add_point(line, local);
        self.drag = DragState::Dragging { source, line };
    }

    /// Resolves the in-flight drag against the handle under the pointer.
    ///
    /// `released` is the handle reporting the release, which is the one the
    /// drag started on; it does not take part in resolution. Returns `None`
    /// when no drag is in flight.
    pub fn end_connection(&mut self, released: HandleId) -> Option<DragResolution> {
        let DragState::Dragging { source, .. } = self.drag else {
            return None;
        };
        tracing::info!(?source, ?released, "ending line");

        Some(match self.resolve(source) {
            Ok(target) => DragResolution::Linked(self.create_link(source, target)),
            Err(err) => {
                tracing::error!(%err, ?source, "connection rejected");
                self.cancel_connection();
                DragResolution::Rejected(err)
            }
        })
    }

    /// Cancels the in-flight drag and destroys its line. A no-op when idle.
    pub fn cancel_connection(&mut self) {
        if let DragState::Dragging { line, .. } = core::mem::replace(&mut self.drag, DragState::Idle)
        {
            self.renderer.destroy_line(line);
        }
    }

    /// The first handle whose region contains the pointer, scanning cards in
    /// registration order and each card's input before its output.
    pub fn handle_under_pointer(&self) -> Option<HandleId> {
        self.cards
            .iter()
            .filter(|(_, card)| card.is_connectable())
            .find_map(|(id, card)| {
                card.handle_at(self.pointer)
                    .map(|role| HandleId::new(id, role))
            })
    }

    /// Refreshes the geometry of every link touching `card`.
    pub fn on_card_moved(&mut self, card: CardId) {
        let inverse = self.transform.inverse();
        for link in self.links.iter().filter(|l| l.touches(card)) {
            refresh_line(&self.cards, inverse, &mut self.renderer, link);
        }
    }

    /// Moves a card programmatically, with the same effects as dragging it.
    ///
    /// Returns `false` for unknown ids.
    pub fn move_card(&mut self, id: CardId, position: Point) -> bool {
        let Some(card) = self.cards.get_mut(id) else {
            return false;
        };
        card.set_position(position);
        self.drain_events();
        true
    }

    /// Sets the manager's global transform and re-projects every link.
    ///
    /// A transform that cannot be inverted is refused: the previous transform
    /// stays in place and `false` is returned.
    pub fn set_transform(&mut self, transform: Affine) -> bool {
        let det = transform.determinant();
        if !det.is_finite() || det == 0.0 {
            tracing::warn!(?transform, "ignoring non-invertible transform");
            return false;
        }
        self.transform = transform;
        let inverse = transform.inverse();
        for link in &self.links {
            refresh_line(&self.cards, inverse, &mut self.renderer, link);
        }
        true
    }

    /// The manager's global transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Maps a global point into the manager's local space.
    pub fn to_local(&self, global: Point) -> Point {
        self.transform.inverse() * global
    }

    /// Line style in use.
    pub fn style(&self) -> &LinkStyle {
        &self.style
    }

    /// Registered cards.
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    /// Borrows a registered card.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Paint order, bottom to top.
    pub fn stacking_order(&self) -> &[CardId] {
        &self.stacking
    }

    /// Committed links in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Looks up a committed link.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Links touching `card`.
    pub fn links_of(&self, card: CardId) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |l| l.touches(card))
    }

    /// Source handle of the in-flight drag.
    pub fn drag_source(&self) -> Option<HandleId> {
        match self.drag {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Line of the in-flight drag.
    pub fn transient_line(&self) -> Option<LineId> {
        match self.drag {
            DragState::Dragging { line, .. } => Some(line),
            DragState::Idle => None,
        }
    }

    /// Returns true while a link drag is in flight.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Last known pointer position, global.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// The line renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn dispatch_press(&mut self, event: &PointerEvent) -> bool {
        let hit = self
            .stacking
            .iter()
            .rev()
            .copied()
            .find(|&id| self.cards.get(id).is_some_and(|c| c.hit(event.position)));
        let Some(id) = hit else {
            return false;
        };
        let Some(card) = self.cards.get_mut(id) else {
            return false;
        };
        if !card.pointer_event(event) {
            return false;
        }
        if card.is_dragging() {
            self.stacking.retain(|&c| c != id);
            self.stacking.push(id);
        }
        self.capture = Some(id);
        true
    }

    /// Ends the gesture of the card holding the pointer, if any. A press
    /// arriving while capture is held means the matching release was lost.
    fn release_capture(&mut self) {
        if let Some(card) = self.capture.take().and_then(|id| self.cards.get_mut(id)) {
            tracing::debug!(card = %card.name(), "pointer capture lost its release");
            card.cancel_gesture();
        }
    }

    fn dispatch_captured(&mut self, target: Option<CardId>, event: &PointerEvent) -> bool {
        target
            .and_then(|id| self.cards.get_mut(id))
            .is_some_and(|card| card.pointer_event(event))
    }

    fn drain_events(&mut self) -> Option<DragResolution> {
        let mut resolution = None;
        while let Some(event) = self.next_event() {
            match event {
                CardEvent::ConnectionStarted(handle) => self.start_connection(handle),
                CardEvent::ConnectionEnded(handle) => {
                    if let Some(r) = self.end_connection(handle) {
                        resolution = Some(r);
                    }
                }
                CardEvent::Moved(card) => self.on_card_moved(card),
            }
        }
        resolution
    }

    fn next_event(&self) -> Option<CardEvent> {
        self.mailbox.borrow_mut().pop_front()
    }

    fn resolve(&self, source: HandleId) -> Result<HandleId, ConnectError> {
        let target = self.handle_under_pointer().ok_or(ConnectError::NoTarget)?;
        if target.card == source.card {
            return Err(ConnectError::SelfLoop);
        }
        tracing::debug!(
            source_input = source.is_input(),
            target_input = target.is_input(),
            "comparing handle roles"
        );
        if source.role == target.role {
            return Err(ConnectError::RoleMismatch { role: source.role });
        }
        Ok(target)
    }

    fn create_link(&mut self, source: HandleId, target: HandleId) -> LinkId {
        let line = self.renderer.create_line(self.style.permanent());
        let id = LinkId(self.next_link);
        self.next_link += 1;

        let link = Link {
            id,
            source,
            target,
            line,
        };
        self.links.push(link);
        self.cancel_connection();
        refresh_line(&self.cards, self.transform.inverse(), &mut self.renderer, &link);
        tracing::info!(?id, ?source, ?target, "link created");
        id
    }
}

fn anchor(cards: &CardRegistry, handle: HandleId) -> Option<Point> {
    cards
        .get(handle.card)
        .filter(|card| card.is_connectable())
        .and_then(|card| card.connection_position(handle.role))
}

fn refresh_line<R: LineRenderer>(
    cards: &CardRegistry,
    to_local: Affine,
    renderer: &mut R,
    link: &Link,
) {
    let (Some(start), Some(end)) = (anchor(cards, link.source), anchor(cards, link.target)) else {
        return;
    };
    let (start, end) = (to_local * start, to_local * end);
    if renderer.point_count(link.line) < 2 {
        renderer.add_point(link.line, start);
        renderer.add_point(link.line, end);
    } else {
        renderer.set_point(link.line, 0, start);
        renderer.set_point(link.line, 1, end);
    }
}
