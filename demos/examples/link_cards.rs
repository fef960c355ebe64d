// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless link session.
//!
//! Spawns the stock "Beginning"/"Ending" board plus a third card, then replays
//! a scripted pointer session: one valid link, one self-loop, one dropped on
//! empty canvas, and a card drag that pulls its link along.
//!
//! Run:
//! - `cargo run -p alexandria_demos --example link_cards`
//! - `RUST_LOG=debug cargo run -p alexandria_demos --example link_cards`

use alexandria_canvas::{CardId, ConnectionManager, HandleRole, HeadlessRenderer, PointerEvent};
use alexandria_demos::{dump_links, init_tracing};
use alexandria_story::StoryLibrary;
use alexandria_timeline::{BoardConfig, Timeline};
use kurbo::{Point, Vec2};

const BOARD: &str = r##"
[links]
thickness = 3.0

[[cards]]
name = "Beginning"
position = [100.0, 100.0]
story = "opening"

[[cards]]
name = "Ending"
position = [400.0, 100.0]

[[cards]]
name = "Epilogue"
position = [700.0, 100.0]
"##;

const LIBRARY: &str = r##"
[[stories]]
id = "opening"
title = "The Library Burns"
short_content = "Smoke over the harbor."
"##;

fn gesture(manager: &mut ConnectionManager<HeadlessRenderer>, from: Point, to: Point) {
    manager.pointer_event(PointerEvent::press(from));
    manager.process();
    manager.pointer_event(PointerEvent::drag_to(from.midpoint(to)));
    manager.process();
    manager.pointer_event(PointerEvent::drag_to(to));
    manager.process();
    let outcome = manager.pointer_event(PointerEvent::release(to));
    println!("{from:?} -> {to:?}: {outcome:?}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let library = StoryLibrary::from_toml_str(LIBRARY)?;
    let config = BoardConfig::from_toml_str(BOARD)?;
    let mut manager = ConnectionManager::with_style(HeadlessRenderer::new(), config.links);
    let ids = Timeline::new(config.template).populate(&mut manager, &config, &library)?;
    let [beginning, ending, epilogue] = ids[..] else {
        return Err("expected three cards".into());
    };

    let anchor = |manager: &ConnectionManager<HeadlessRenderer>, card: CardId, role: HandleRole| {
        manager
            .card(card)
            .and_then(|c| c.connection_position(role))
            .unwrap_or_default()
    };

    // Beginning.output -> Ending.input: linked.
    let from = anchor(&manager, beginning, HandleRole::Output);
    let to = anchor(&manager, ending, HandleRole::Input);
    gesture(&mut manager, from, to);

    // Ending.output -> Ending.input: self-loop.
    let from = anchor(&manager, ending, HandleRole::Output);
    let to = anchor(&manager, ending, HandleRole::Input);
    gesture(&mut manager, from, to);

    // Epilogue.input -> nowhere.
    let from = anchor(&manager, epilogue, HandleRole::Input);
    gesture(&mut manager, from, Point::new(650.0, 400.0));

    dump_links(&manager);

    // Drag Beginning down by its body; its link follows.
    let body = manager
        .card(beginning)
        .map(|c| c.body_rect().center())
        .unwrap_or_default();
    gesture(&mut manager, body, body + Vec2::new(0.0, 80.0));

    dump_links(&manager);
    Ok(())
}
