//! Freehand stroke to closed Bezier spline.

use kurbo::{Point, Vec2};

use super::{Knot, Spline};
use crate::error::{MeshError, Result};

/// Turn angle (degrees) at which handles start to shorten.
const SMOOTH_ANGLE: f64 = 30.0;
/// Turn angle (degrees) at which handles reach their shortest.
const SHARP_ANGLE: f64 = 90.0;
/// Handle divisor on gentle turns.
const SMOOTH_DIVISOR: f64 = 6.0;
/// Handle divisor on sharp turns.
const SHARP_DIVISOR: f64 = 36.0;

/// Fit a closed spline through a simplified stroke.
///
/// Every point becomes a knot. Handles follow the Catmull-Rom direction
/// `p[i+1] - p[i-1]`, divided by a factor that grows with the turn angle at
/// the segment's start so sharp corners get short handles.
///
/// Consecutive duplicate points (and a closing copy of the first point) are
/// ignored.
///
/// # Errors
///
/// - [`MeshError::DegeneratePath`] if fewer than 3 distinct points remain
/// - [`MeshError::NonFinite`] if a coordinate is NaN or infinite
pub fn sketch_to_spline(points: &[Point]) -> Result<Spline> {
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(MeshError::NonFinite {
            what: "sketch points",
        });
    }

    let mut pts: Vec<Point> = points.to_vec();
    pts.dedup();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    let n = pts.len();
    if n < 3 {
        return Err(MeshError::too_few_points(0, n));
    }

    let at = |i: usize| pts[i % n];
    // Divisor for the segment starting at knot i.
    let divisors: Vec<f64> = (0..n)
        .map(|i| handle_divisor(at(i + n - 1), at(i), at(i + 1)))
        .collect();

    let knots = (0..n)
        .map(|i| {
            let chord = at(i + 1) - at(i + n - 1);
            let tangent_out = chord / divisors[i];
            let tangent_in = -chord / divisors[(i + n - 1) % n];
            Knot::new(at(i), tangent_in, tangent_out)
        })
        .collect();

    Ok(Spline::new(knots, true))
}

fn handle_divisor(p0: Point, p1: Point, p2: Point) -> f64 {
    let t = inverse_lerp(SMOOTH_ANGLE, SHARP_ANGLE, turn_angle(p1 - p0, p2 - p1));
    SMOOTH_DIVISOR + (SHARP_DIVISOR - SMOOTH_DIVISOR) * t
}

/// Unsigned angle between two vectors in degrees, 0 if either is zero.
fn turn_angle(a: Vec2, b: Vec2) -> f64 {
    let denom = a.hypot() * b.hypot();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}
