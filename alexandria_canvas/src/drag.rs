// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grab state helper: keep a dragged item at a fixed offset from the pointer.
//!
//! ## Usage
//!
//! 1) On press, call [`GrabState::start`] with the pointer position and the item's current origin.
//! 2) On each move, call [`GrabState::update`] to get the item's new origin.
//! 3) End the grab with [`GrabState::end`].
//!
//! The offset between pointer and origin is captured once at press time and held
//! fixed until the grab ends.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use alexandria_canvas::GrabState;
//!
//! let mut grab = GrabState::default();
//!
//! // Grab an item whose origin is (100, 100) at pointer (110, 105).
//! grab.start(Point::new(110.0, 105.0), Point::new(100.0, 100.0));
//! assert!(grab.is_grabbing());
//!
//! // Pointer moves to (150, 125): the item origin follows at the same offset.
//! assert_eq!(grab.update(Point::new(150.0, 125.0)), Some(Point::new(140.0, 120.0)));
//! ```

use kurbo::{Point, Vec2};

/// Tracks a grab for move event processing.
#[derive(Debug, Clone, Default, Copy)]
pub struct GrabState {
    /// Pointer minus item origin, captured at press time.
    pub offset: Option<Vec2>,
}

impl GrabState {
    /// Start a grab at `pointer` on an item whose origin is `origin`.
    pub fn start(&mut self, pointer: Point, origin: Point) {
        self.offset = Some(pointer - origin);
    }

    /// New item origin for the pointer at `pointer`, or `None` if not grabbing.
    pub fn update(&self, pointer: Point) -> Option<Point> {
        self.offset.map(|offset| pointer - offset)
    }

    /// End the current grab.
    pub fn end(&mut self) {
        self.offset = None;
    }

    /// Returns `true` while a grab is active
    pub fn is_grabbing(&self) -> bool {
        self.offset.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grab_state_is_idle() {
        let grab = GrabState::default();
        assert!(!grab.is_grabbing());
        assert_eq!(grab.update(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn offset_is_held_fixed() {
        let mut grab = GrabState::default();
        grab.start(Point::new(10.0, 20.0), Point::new(0.0, 0.0));

        assert_eq!(grab.update(Point::new(15.0, 25.0)), Some(Point::new(5.0, 5.0)));
        assert_eq!(grab.update(Point::new(10.0, 20.0)), Some(Point::new(0.0, 0.0)));
        assert_eq!(grab.offset, Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn end_resets_and_is_safe_when_idle() {
        let mut grab = GrabState::default();
        grab.end();
        assert!(!grab.is_grabbing());

        grab.start(Point::new(1.0, 1.0), Point::ZERO);
        grab.end();
        assert!(grab.offset.is_none());
    }

    #[test]
    fn restart_recaptures_offset() {
        let mut grab = GrabState::default();
        grab.start(Point::new(5.0, 5.0), Point::ZERO);
        grab.start(Point::new(50.0, 60.0), Point::new(40.0, 40.0));
        assert_eq!(grab.update(Point::new(55.0, 65.0)), Some(Point::new(45.0, 45.0)));
    }

    #[test]
    fn negative_offsets() {
        let mut grab = GrabState::default();
        grab.start(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(grab.update(Point::new(-10.0, 5.0)), Some(Point::new(90.0, 105.0)));
    }
}
