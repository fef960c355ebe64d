// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Log events emitted by the manager and its cards.
//!
//! A capturing layer records every event raised while a closure runs, so the
//! tests can check levels and messages without a global subscriber.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alexandria_canvas::{
    Card, ConnectError, ConnectionManager, DragResolution, Handle, HandleId, HandleRole,
    HeadlessRenderer, PointerEvent,
};
use kurbo::{Rect, Size};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A layer that records events.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

/// Runs `f` under a capturing subscriber and returns its result with the
/// events it raised.
fn with_captured_events<T>(f: impl FnOnce() -> T) -> (T, Vec<CapturedEvent>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    let out = tracing::subscriber::with_default(subscriber, f);
    let events = events.lock().unwrap().clone();
    (out, events)
}

fn at_level(events: &[CapturedEvent], level: Level) -> Vec<&CapturedEvent> {
    events.iter().filter(|e| e.level == level).collect()
}

fn card(name: &str, origin: (f64, f64)) -> Card {
    Card::new(name, Size::new(100.0, 60.0))
        .with_input(Handle::input(Rect::new(-10.0, 20.0, 10.0, 40.0)))
        .with_output(Handle::output(Rect::new(90.0, 20.0, 110.0, 40.0)))
        .at(origin)
}

/// X at (-50, 20), Y at (200, 20); X's output anchor is (50, 50).
fn board() -> ConnectionManager<HeadlessRenderer> {
    let mut manager = ConnectionManager::new(HeadlessRenderer::new());
    manager.register_card(card("X", (-50.0, 20.0)));
    manager.register_card(card("Y", (200.0, 20.0)));
    manager
}

fn drag_from_x_output(to: (f64, f64)) -> (Option<DragResolution>, Vec<CapturedEvent>) {
    let mut manager = board();
    with_captured_events(|| {
        manager.pointer_event(PointerEvent::press((50.0, 50.0)));
        manager.pointer_event(PointerEvent::drag_to(to));
        manager.process();
        manager.pointer_event(PointerEvent::release(to))
    })
}

fn assert_single_rejection(events: &[CapturedEvent], err: ConnectError) {
    let errors = at_level(events, Level::ERROR);
    assert_eq!(errors.len(), 1, "one error per rejection, got {events:#?}");
    assert_eq!(errors[0].message, "connection rejected");
    assert_eq!(
        errors[0].fields.get("err").map(String::as_str),
        Some(err.to_string().as_str())
    );
}

#[test]
fn drop_on_empty_canvas_logs_one_error() {
    let (done, events) = drag_from_x_output((120.0, 300.0));
    assert_eq!(done, Some(DragResolution::Rejected(ConnectError::NoTarget)));
    assert_single_rejection(&events, ConnectError::NoTarget);
}

#[test]
fn self_loop_logs_one_error() {
    let (done, events) = drag_from_x_output((-50.0, 50.0));
    assert_eq!(done, Some(DragResolution::Rejected(ConnectError::SelfLoop)));
    assert_single_rejection(&events, ConnectError::SelfLoop);
}

#[test]
fn role_mismatch_logs_one_error() {
    let (done, events) = drag_from_x_output((300.0, 50.0));
    let err = ConnectError::RoleMismatch {
        role: HandleRole::Output,
    };
    assert_eq!(done, Some(DragResolution::Rejected(err)));
    assert_single_rejection(&events, err);
}

#[test]
fn successful_link_logs_no_errors_or_warnings() {
    let (done, events) = drag_from_x_output((200.0, 50.0));
    assert!(matches!(done, Some(DragResolution::Linked(_))));
    assert!(at_level(&events, Level::ERROR).is_empty());
    assert!(at_level(&events, Level::WARN).is_empty());
    let infos: Vec<_> = at_level(&events, Level::INFO)
        .into_iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(infos, ["starting line", "ending line", "link created"]);
}

#[test]
fn card_missing_handles_logs_one_error() {
    let mut manager = ConnectionManager::new(HeadlessRenderer::new());
    let (id, events) = with_captured_events(|| {
        manager.register_card(
            Card::new("bare", Size::new(100.0, 60.0))
                .with_input(Handle::input(Rect::new(-10.0, 20.0, 10.0, 40.0))),
        )
    });
    assert!(!manager.card(id).unwrap().is_connectable());

    let errors = at_level(&events, Level::ERROR);
    assert_eq!(errors.len(), 1, "one error for the bare card, got {events:#?}");
    assert_eq!(errors[0].message, "CRITICAL: handles are missing on card");
    assert_eq!(errors[0].fields.get("card").map(String::as_str), Some("bare"));
}

#[test]
fn second_start_logs_a_warning() {
    let mut manager = ConnectionManager::new(HeadlessRenderer::new());
    let x = manager.register_card(card("X", (-50.0, 20.0)));
    let y = manager.register_card(card("Y", (200.0, 20.0)));

    let ((), events) = with_captured_events(|| {
        manager.start_connection(HandleId::new(x, HandleRole::Output));
        manager.start_connection(HandleId::new(y, HandleRole::Input));
    });

    let warnings = at_level(&events, Level::WARN);
    assert_eq!(warnings.len(), 1, "one warning, got {events:#?}");
    assert_eq!(warnings[0].message, "connection already in progress");
    assert!(at_level(&events, Level::ERROR).is_empty());
    assert_eq!(
        manager.drag_source(),
        Some(HandleId::new(x, HandleRole::Output))
    );
}

#[test]
fn singular_transform_logs_a_warning() {
    let mut manager = board();
    let (accepted, events) =
        with_captured_events(|| manager.set_transform(kurbo::Affine::scale(0.0)));
    assert!(!accepted);
    let warnings = at_level(&events, Level::WARN);
    assert_eq!(warnings.len(), 1, "one warning, got {events:#?}");
    assert_eq!(warnings[0].message, "ignoring non-invertible transform");
}
