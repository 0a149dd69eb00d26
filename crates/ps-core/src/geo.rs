//! 2D geometry on top of `nalgebra`.
//!
//! Scene coordinates are planar metres in `f64`.  Directions are angles in
//! radians measured counter-clockwise from the positive x axis.

use nalgebra::Vector2;

/// A planar position or displacement.
pub type Vec2 = Vector2<f64>;

/// Shorthand constructor.
#[inline]
pub fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

/// Cartesian vector of length `radius` pointing along `angle` (radians).
#[inline]
pub fn from_polar(angle: f64, radius: f64) -> Vec2 {
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (a - b).norm()
}
