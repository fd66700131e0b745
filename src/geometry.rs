//! # Geometry
//! Pure map-space primitives: signed point-to-line distance, Euclidean
//! distance and strict radius containment.
//!
//! Lines are expressed as `gradient·x + bias·y + intercept = 0`.

use serde::{Deserialize, Serialize};

/// A point on the map (game units, origin bottom-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Signed perpendicular distance of `(x, y)` from the line
/// `gradient·x + bias·y + intercept = 0`.
///
/// The sign tells which side of the line the point lies on; the magnitude is
/// the true Euclidean distance to the line.
pub fn distance(x: f64, y: f64, gradient: f64, intercept: f64, bias: f64) -> f64 {
    let norm = (gradient * gradient + bias * bias).sqrt();
    (gradient * x + bias * y + intercept) / norm
}

/// Euclidean distance between two points.
pub fn euclidean(a: Position, b: Position) -> f64 {
    squared(a, b).sqrt()
}

/// `true` if `p` lies strictly inside the circle. Points on the boundary are
/// outside.
pub fn circle_contains(p: Position, center: Position, radius: f64) -> bool {
    squared(p, center) < radius * radius
}

fn squared(a: Position, b: Position) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
