//! Touch geometry: points plus the distance and angle between two touches.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas-local space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between the first two points.
///
/// Returns `0.0` when fewer than two points are supplied.
#[must_use]
pub fn distance(points: &[Point]) -> f64 {
    let [p0, p1, ..] = points else {
        return 0.0;
    };
    (p1.x - p0.x).hypot(p1.y - p0.y)
}

/// Angle in degrees of the vector from the first point to the second.
///
/// The result lies in `(-180, 180]`. Returns `0.0` when fewer than two points
/// are supplied or when both points coincide.
#[must_use]
pub fn angle_degrees(points: &[Point]) -> f64 {
    let [p0, p1, ..] = points else {
        return 0.0;
    };
    let dy = p1.y - p0.y;
    let dx = p1.x - p0.x;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let deg = dy.atan2(dx).to_degrees();
    // atan2 yields -180 for (-0.0, negative dx); fold onto +180.
    if deg <= -180.0 { deg + 360.0 } else { deg }
}
