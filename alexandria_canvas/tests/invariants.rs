// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over arbitrary pointer sessions on a three-card board.
//!
//! After every step:
//!
//! 1. Every link joins one input handle and one output handle.
//! 2. Every link joins two different cards.
//! 3. Every link's polyline endpoints sit on its handles' current anchors.
//! 4. The renderer holds exactly one line per link plus the transient line.

use alexandria_canvas::{
    Card, CardId, ConnectionManager, Handle, HandleId, HandleRole, HeadlessRenderer, PointerEvent,
};
use kurbo::{Point, Rect, Size, Vec2};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    /// Press on a named spot of a card.
    Press(usize, Spot),
    /// Move with the primary button held.
    DragTo(usize, Spot),
    /// Release on a named spot of a card.
    Release(usize, Spot),
    /// Move and release far away from every card.
    ReleaseOnEmpty,
    /// Programmatic card move.
    Nudge(usize, f64, f64),
    /// Cancel whatever is in flight.
    Cancel,
}

#[derive(Clone, Copy, Debug)]
enum Spot {
    Input,
    Output,
    Body,
}

fn spot_strategy() -> impl Strategy<Value = Spot> {
    prop_oneof![Just(Spot::Input), Just(Spot::Output), Just(Spot::Body)]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..3usize, spot_strategy()).prop_map(|(c, s)| Step::Press(c, s)),
        (0..3usize, spot_strategy()).prop_map(|(c, s)| Step::DragTo(c, s)),
        (0..3usize, spot_strategy()).prop_map(|(c, s)| Step::Release(c, s)),
        Just(Step::ReleaseOnEmpty),
        (0..3usize, -80.0..80.0f64, -80.0..80.0f64).prop_map(|(c, dx, dy)| Step::Nudge(c, dx, dy)),
        Just(Step::Cancel),
    ]
}

fn stock(name: &str, origin: (f64, f64)) -> Card {
    Card::new(name, Size::new(100.0, 60.0))
        .with_input(Handle::input(Rect::new(-10.0, 20.0, 10.0, 40.0)))
        .with_output(Handle::output(Rect::new(90.0, 20.0, 110.0, 40.0)))
        .at(origin)
}

fn spot(manager: &ConnectionManager<HeadlessRenderer>, card: CardId, spot: Spot) -> Point {
    let card = manager.card(card).unwrap();
    match spot {
        Spot::Input => card.connection_position(HandleRole::Input).unwrap(),
        Spot::Output => card.connection_position(HandleRole::Output).unwrap(),
        Spot::Body => card.body_rect().center(),
    }
}

fn check(manager: &ConnectionManager<HeadlessRenderer>) -> Result<(), TestCaseError> {
    for link in manager.links() {
        prop_assert_ne!(link.source().is_input(), link.target().is_input());
        prop_assert_ne!(link.source().card, link.target().card);

        let anchor = |h: HandleId| {
            manager
                .card(h.card)
                .and_then(|c| c.connection_position(h.role))
                .map(|p| manager.to_local(p))
        };
        let points = manager.renderer().points(link.line());
        prop_assert_eq!(points.len(), 2);
        prop_assert_eq!(Some(points[0]), anchor(link.source()));
        prop_assert_eq!(Some(points[1]), anchor(link.target()));
    }
    let transient = usize::from(manager.is_dragging());
    prop_assert_eq!(
        manager.renderer().live_lines(),
        manager.links().len() + transient
    );
    Ok(())
}

proptest! {
    #[test]
    fn links_stay_valid_and_in_sync(steps in prop::collection::vec(step_strategy(), 1..40)) {
        let mut manager = ConnectionManager::new(HeadlessRenderer::new());
        let cards = [
            manager.register_card(stock("A", (0.0, 0.0))),
            manager.register_card(stock("B", (250.0, 0.0))),
            manager.register_card(stock("C", (0.0, 250.0))),
        ];

        for step in steps {
            match step {
                Step::Press(c, s) => {
                    let at = spot(&manager, cards[c], s);
                    manager.pointer_event(PointerEvent::press(at));
                }
                Step::DragTo(c, s) => {
                    let at = spot(&manager, cards[c], s);
                    manager.pointer_event(PointerEvent::drag_to(at));
                }
                Step::Release(c, s) => {
                    let at = spot(&manager, cards[c], s);
                    manager.pointer_event(PointerEvent::release(at));
                }
                Step::ReleaseOnEmpty => {
                    let far = Point::new(-5000.0, -5000.0);
                    manager.pointer_event(PointerEvent::drag_to(far));
                    manager.pointer_event(PointerEvent::release(far));
                    prop_assert!(!manager.is_dragging());
                }
                Step::Nudge(c, dx, dy) => {
                    let origin = manager.card(cards[c]).unwrap().position();
                    manager.move_card(cards[c], origin + Vec2::new(dx, dy));
                }
                Step::Cancel => manager.cancel_connection(),
            }
            manager.process();
            check(&manager)?;
        }
    }

    #[test]
    fn cancel_is_idempotent(presses in prop::collection::vec(spot_strategy(), 0..4)) {
        let mut manager = ConnectionManager::new(HeadlessRenderer::new());
        let a = manager.register_card(stock("A", (0.0, 0.0)));
        for s in presses {
            let at = spot(&manager, a, s);
            manager.pointer_event(PointerEvent::press(at));
            manager.pointer_event(PointerEvent::release(at));
        }
        manager.cancel_connection();
        let lines = manager.renderer().live_lines();
        let links = manager.links().len();
        manager.cancel_connection();
        prop_assert!(!manager.is_dragging());
        prop_assert_eq!(manager.renderer().live_lines(), lines);
        prop_assert_eq!(manager.links().len(), links);
    }
}
