// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Alexandria demos.

use alexandria_canvas::{ConnectionManager, HeadlessRenderer};
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Prints every committed link with its polyline points.
pub fn dump_links(manager: &ConnectionManager<HeadlessRenderer>) {
    for link in manager.links() {
        let name = |card| manager.card(card).map_or("?", |c| c.name());
        println!(
            "{:?}: {}.{} -> {}.{} {:?}",
            link.id(),
            name(link.source().card),
            link.source().role,
            name(link.target().card),
            link.target().role,
            manager.renderer().points(link.line()),
        );
    }
}
