// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stock card layout.

use alexandria_canvas::{Card, Handle};
use kurbo::{Point, Rect, Size};

/// Layout every spawned card shares: a body plus two equally sized handles
/// centered on its left and right edges.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardTemplate {
    /// Card body size.
    pub size: Size,
    /// Size of each handle region.
    pub handle_size: Size,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self {
            size: Size::new(200.0, 120.0),
            handle_size: Size::new(20.0, 20.0),
        }
    }
}

impl CardTemplate {
    /// Card-local region of the input handle.
    pub fn input_rect(&self) -> Rect {
        Rect::from_center_size(Point::new(0.0, self.size.height / 2.0), self.handle_size)
    }

    /// Card-local region of the output handle.
    pub fn output_rect(&self) -> Rect {
        Rect::from_center_size(
            Point::new(self.size.width, self.size.height / 2.0),
            self.handle_size,
        )
    }

    /// Builds a fresh card at the origin.
    pub fn instantiate(&self, name: impl Into<String>) -> Card {
        Card::new(name, self.size)
            .with_input(Handle::input(self.input_rect()))
            .with_output(Handle::output(self.output_rect()))
    }
}
