// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The polyline seam between the connection manager and the host renderer.
//!
//! The manager never draws anything itself. It asks a [`LineRenderer`] to
//! create, extend, update, and destroy polylines, and owns every [`LineId`] it
//! receives until it destroys it.
//!
//! [`HeadlessRenderer`] keeps the lines in memory. It is what tests and the
//! headless demo use, and a convenient reference when writing a backend.

use hashbrown::HashMap;
use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

/// Handle to a polyline owned by a [`LineRenderer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineId(pub u64);

/// Stroke parameters for a polyline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineStyle {
    /// Stroke width in local units.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
}

/// Host polyline primitive.
pub trait LineRenderer {
    /// Creates an empty polyline.
    fn create_line(&mut self, style: LineStyle) -> LineId;
    /// Appends a point.
    fn add_point(&mut self, line: LineId, point: Point);
    /// Replaces the point at `index`. Out-of-range indices are ignored.
    fn set_point(&mut self, line: LineId, index: usize, point: Point);
    /// Number of points; `0` for unknown lines.
    fn point_count(&self, line: LineId) -> usize;
    /// Releases the polyline.
    fn destroy_line(&mut self, line: LineId);
}

/// A polyline held by [`HeadlessRenderer`].
#[derive(Clone, Debug)]
pub struct Polyline {
    /// Stroke parameters given at creation.
    pub style: LineStyle,
    /// Points in local coordinates.
    pub points: SmallVec<[Point; 2]>,
}

/// In-memory [`LineRenderer`].
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next: u64,
    lines: HashMap<LineId, Polyline>,
}

impl HeadlessRenderer {
    /// Creates a renderer with no lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live line.
    pub fn line(&self, id: LineId) -> Option<&Polyline> {
        self.lines.get(&id)
    }

    /// Points of a live line, or an empty slice.
    pub fn points(&self, id: LineId) -> &[Point] {
        self.lines.get(&id).map(|l| l.points.as_slice()).unwrap_or(&[])
    }

    /// Number of lines not yet destroyed.
    pub fn live_lines(&self) -> usize {
        self.lines.len()
    }
}

impl LineRenderer for HeadlessRenderer {
    fn create_line(&mut self, style: LineStyle) -> LineId {
        let id = LineId(self.next);
        self.next += 1;
        self.lines.insert(
            id,
            Polyline {
                style,
                points: SmallVec::new(),
            },
        );
        id
    }

    fn add_point(&mut self, line: LineId, point: Point) {
        if let Some(l) = self.lines.get_mut(&line) {
            l.points.push(point);
        }
    }

    fn set_point(&mut self, line: LineId, index: usize, point: Point) {
        if let Some(p) = self.lines.get_mut(&line).and_then(|l| l.points.get_mut(index)) {
            *p = point;
        }
    }

    fn point_count(&self, line: LineId) -> usize {
        self.lines.get(&line).map_or(0, |l| l.points.len())
    }

    fn destroy_line(&mut self, line: LineId) {
        self.lines.remove(&line);
    }
}
