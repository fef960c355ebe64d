// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signal helper: a single-threaded observer list with explicit subscriptions.
//!
//! ## Usage
//!
//! 1) Own a [`Signal`] on the component that produces notifications.
//! 2) Observers call [`Signal::subscribe`] and keep the returned [`SubscriptionId`].
//! 3) The producer calls [`Signal::emit`]; listeners run in subscription order.
//! 4) Observers call [`Signal::unsubscribe`] before they go away.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use alexandria_canvas::Signal;
//!
//! let moved: Signal<u32> = Signal::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! let sub = moved.subscribe(move |v| sink.set(*v));
//! moved.emit(&7);
//! assert_eq!(seen.get(), 7);
//!
//! assert!(moved.unsubscribe(sub));
//! moved.emit(&9);
//! assert_eq!(seen.get(), 7);
//! ```
//!
//! Listeners must not subscribe to, unsubscribe from, or emit on the signal
//! that is currently invoking them; the listener list is borrowed for the
//! duration of [`Signal::emit`]. Chaining into a *different* signal is fine and
//! is how cards forward their handles' notifications.

use core::cell::{Cell, RefCell};
use core::fmt;

/// Token identifying one listener on one [`Signal`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// An observer list for notifications carrying an `E` payload.
pub struct Signal<E> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<E>)>>,
}

impl<E> Signal<E> {
    /// Creates a signal with no listeners.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Adds a listener and returns its subscription token.
    pub fn subscribe(&self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if the token was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        listeners.len() != before
    }

    /// Invokes every listener with `payload`, in subscription order.
    pub fn emit(&self, payload: &E) {
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(payload);
        }
    }

    /// Number of live listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Removes every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_subscription_order() {
        let signal: Signal<u8> = Signal::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = Rc::clone(&log);
        signal.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&log);
        signal.subscribe(move |v| b.borrow_mut().push(("b", *v)));

        signal.emit(&1);
        signal.emit(&2);

        assert_eq!(*log.borrow(), vec![("a", 1), ("b", 1), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn unsubscribe_removes_only_that_listener() {
        let signal: Signal<()> = Signal::new();
        let hits = Rc::new(Cell::new(0));

        let h = Rc::clone(&hits);
        let first = signal.subscribe(move |()| h.set(h.get() + 1));
        let h = Rc::clone(&hits);
        signal.subscribe(move |()| h.set(h.get() + 10));
        assert_eq!(signal.subscriber_count(), 2);

        assert!(signal.unsubscribe(first));
        assert!(!signal.unsubscribe(first));
        signal.emit(&());

        assert_eq!(hits.get(), 10);
        assert_eq!(signal.subscriber_count(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let signal: Signal<()> = Signal::new();
        let a = signal.subscribe(|()| {});
        signal.unsubscribe(a);
        let b = signal.subscribe(|()| {});
        assert_ne!(a, b);
    }

    #[test]
    fn forwarding_into_another_signal() {
        let inner: Signal<u32> = Signal::new();
        let outer: Rc<Signal<u32>> = Rc::new(Signal::new());
        let seen = Rc::new(Cell::new(0));

        let fwd = Rc::clone(&outer);
        inner.subscribe(move |v| fwd.emit(v));
        let s = Rc::clone(&seen);
        outer.subscribe(move |v| s.set(*v));

        inner.emit(&42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn clear_drops_everything() {
        let signal: Signal<()> = Signal::new();
        signal.subscribe(|()| {});
        signal.subscribe(|()| {});
        signal.clear();
        assert_eq!(signal.subscriber_count(), 0);
    }
}
