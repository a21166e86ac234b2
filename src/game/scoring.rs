//! Distance based scoring.
//!
//! Scores decay exponentially with pixel distance, normalised by half of
//! the map's diagonal so that maps of very different resolutions score
//! alike. Any submitted guess earns at least [`MIN_SCORE`].

use super::models::Point;

/// Score for a guess that lands exactly on the answer
pub const MAX_SCORE: u32 = 1000;

/// Floor awarded to every submitted guess
pub const MIN_SCORE: u32 = 1;

/// Euclidean distance between two points in pixels
///
/// Coordinates are unbounded, so the difference is taken in `i128`.
pub fn pixel_distance(a: Point, b: Point) -> f64 {
    let dx = (i128::from(a.x) - i128::from(b.x)) as f64;
    let dy = (i128::from(a.y) - i128::from(b.y)) as f64;
    dx.hypot(dy)
}

/// Converts a pixel distance on a `width` x `height` map into points
pub fn score(distance: f64, width: u32, height: u32) -> u32 {
    let distance = distance.max(0.0);
    let diagonal = f64::from(width).hypot(f64::from(height));
    let scale = (diagonal / 2.0).max(1.0);
    let raw = f64::from(MAX_SCORE) * (-distance / scale).exp();

    (raw.round_ties_even() as u32).max(MIN_SCORE)
}
