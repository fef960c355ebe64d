// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alexandria Canvas: story cards and the links between them.
//!
//! ## Overview
//!
//! A canvas holds draggable [`Card`]s. Each card carries an input handle on its
//! left edge and an output handle on its right edge. Pressing a handle starts a
//! link drag: a transient line follows the pointer until release, and the
//! release either commits a [`Link`] between two cards or cancels.
//!
//! The [`ConnectionManager`] owns everything:
//!
//! - the [`CardRegistry`] of cards currently on the canvas;
//! - the single in-flight drag, if any;
//! - committed links and the polylines drawing them, through a [`LineRenderer`].
//!
//! ## Coordinates
//!
//! Card positions, handle regions and pointer positions are global. Line points
//! are in the manager's local space, derived from its [`kurbo::Affine`]
//! transform.
//!
//! ## Notifications
//!
//! Handles report presses and releases through [`Signal`]s; cards forward them
//! unchanged and add a `moved` notification. The manager subscribes to every
//! registered card and processes the notifications after each input event, in
//! the order they fired.
//!
//! ## Example
//!
//! ```rust
//! use alexandria_canvas::{
//!     Card, ConnectionManager, DragResolution, Handle, HeadlessRenderer, PointerEvent,
//! };
//! use kurbo::{Rect, Size};
//!
//! fn card(name: &str, x: f64) -> Card {
//!     Card::new(name, Size::new(100.0, 60.0))
//!         .with_input(Handle::input(Rect::new(-10.0, 20.0, 10.0, 40.0)))
//!         .with_output(Handle::output(Rect::new(90.0, 20.0, 110.0, 40.0)))
//!         .at((x, 20.0))
//! }
//!
//! let mut manager = ConnectionManager::new(HeadlessRenderer::new());
//! let x = manager.register_card(card("X", -50.0));
//! let y = manager.register_card(card("Y", 200.0));
//!
//! // Drag from X's output onto Y's input.
//! manager.pointer_event(PointerEvent::press((50.0, 50.0)));
//! manager.pointer_event(PointerEvent::drag_to((200.0, 50.0)));
//! manager.process();
//! let done = manager.pointer_event(PointerEvent::release((200.0, 50.0)));
//!
//! assert!(matches!(done, Some(DragResolution::Linked(_))));
//! let link = manager.links()[0];
//! assert_eq!((link.source().card, link.target().card), (x, y));
//! ```

mod card;
mod drag;
mod error;
mod handle;
mod input;
mod manager;
mod registry;
mod render;
mod signal;

pub use card::{Card, CardSignals};
pub use drag::GrabState;
pub use error::{CardError, ConnectError};
pub use handle::{Handle, HandleId, HandleRole};
pub use input::{PointerButton, PointerButtons, PointerEvent, PointerKind};
pub use manager::{ConnectionManager, DragResolution, Link, LinkId, LinkStyle};
pub use registry::{CardId, CardRegistry};
pub use render::{HeadlessRenderer, LineId, LineRenderer, LineStyle, Polyline};
pub use signal::{Signal, SubscriptionId};
