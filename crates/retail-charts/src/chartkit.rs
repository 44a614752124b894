//! # chartkit
//!
//! Core chart primitives: scales, normalization helpers, drawable shapes and
//! an SVG path builder. Implements Strategy pattern for scale behavior.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return r_min;
        }

        let mut normalized = (finite_or_zero(value) - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return d_min;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Largest value, floored at 1 so all-zero series never divide by zero
pub fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().map(finite_or_zero).fold(1.0, f64::max)
}

/// `value / max` clamped into `[0, 1]`
pub fn normalize(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return 0.0;
    }
    (finite_or_zero(value) / max).clamp(0.0, 1.0)
}

/// Min-max domain of a series; a flat series gets a range of 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl MinMax {
    pub fn from_values(values: &[f64]) -> Self {
        let mut finite = values.iter().copied().filter(|v| v.is_finite()).peekable();
        if finite.peek().is_none() {
            return Self {
                min: 0.0,
                max: 0.0,
                range: 1.0,
            };
        }

        let (min, max) = finite.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let spread = max - min;
        let range = if spread > 0.0 { spread } else { 1.0 };

        Self { min, max, range }
    }

    /// Raise `max` to at least `floor`, widening the range to match
    pub fn with_max_floor(self, floor: f64) -> Self {
        let max = self.max.max(floor);
        let spread = max - self.min;
        let range = if spread > 0.0 { spread } else { 1.0 };

        Self {
            min: self.min,
            max,
            range,
        }
    }

    /// `(value - min) / range` clamped into `[0, 1]`
    pub fn normalize(&self, value: f64) -> f64 {
        ((finite_or_zero(value) - self.min) / self.range).clamp(0.0, 1.0)
    }

    /// Linear scale over this domain
    pub fn scale(&self) -> LinearScale {
        LinearScale::new().domain(self.min, self.min + self.range)
    }
}

/// Clamp negative (and non-finite) values to zero for share-based charts
pub fn non_negative(values: &[f64]) -> Vec<f64> {
    let clamped = values.iter().filter(|v| **v < 0.0 || !v.is_finite()).count();
    if clamped > 0 {
        tracing::warn!(clamped, "negative or non-finite chart values clamped to zero");
    }

    values
        .iter()
        .map(|&v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect()
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Point in logical chart space (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from this center along `angle_deg` (0° = 3 o'clock, clockwise)
    pub fn polar(&self, radius: f64, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Circle (point markers, donut rings)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    pub const fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }
}

/// Line drawn as a rectangle of `length` rotated by `angle` degrees about `origin`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    pub origin: Point,
    pub length: f64,
    pub angle: f64,
}

impl LineSegment {
    /// Segment from `from` to `to`: `length = hypot(dx, dy)`, `angle = atan2(dy, dx)`
    pub fn between(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        Self {
            origin: from,
            length: (dx * dx + dy * dy).sqrt(),
            angle: dy.atan2(dx).to_degrees(),
        }
    }

    /// End point reached by rotating the segment about its origin
    pub fn end(&self) -> Point {
        self.origin.polar(self.length, self.angle)
    }

    /// SVG transform rotating a rect placed at `origin`
    pub fn svg_transform(&self) -> String {
        format!(
            "rotate({:.2} {:.2} {:.2})",
            self.angle, self.origin.x, self.origin.y
        )
    }
}

/// Text label anchored at a point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(128),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        let _ = write!(
            self.commands,
            "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
            rx, ry, rotation, large_arc as u8, sweep as u8, x, y
        );
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// TESTS
// ============================================================================
