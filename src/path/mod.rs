//! Tessellated paths.
//!
//! A [`Polyline`] is the output of flattening one Bezier contour: an ordered
//! run of 2D points plus the contour's `closed` flag. Closed polylines do not
//! store a duplicate of their first point; the closing edge is implicit.
//!
//! Tessellators emit repeated points where segments meet, so polylines are
//! usually passed through [`Polyline::collapse_duplicates`] (or
//! [`normalize`](normalize::normalize)) before meshing.

pub mod normalize;

use nalgebra::Point2;

pub use normalize::{normalize, normalize_polylines, Center, NormalizeOptions, ScaleAxis};

/// An ordered sequence of 2D points, open or closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<Point2<f64>>,
    closed: bool,
}

impl Polyline {
    /// Create a polyline from points.
    pub fn new(points: Vec<Point2<f64>>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Create an open polyline.
    pub fn open(points: Vec<Point2<f64>>) -> Self {
        Self::new(points, false)
    }

    /// Create a closed polyline.
    pub fn closed(points: Vec<Point2<f64>>) -> Self {
        Self::new(points, true)
    }

    /// Build a polyline from `(x, y)` pairs.
    pub fn from_xy(coords: &[(f64, f64)], closed: bool) -> Self {
        Self::new(
            coords.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            closed,
        )
    }

    /// The points of the polyline.
    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Mutable access to the points.
    #[inline]
    pub fn points_mut(&mut self) -> &mut Vec<Point2<f64>> {
        &mut self.points
    }

    /// Consume the polyline, returning its points.
    pub fn into_points(self) -> Vec<Point2<f64>> {
        self.points
    }

    /// Whether the polyline wraps from its last point back to the first.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polyline has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of strokes this polyline contributes to a UV budget (`len - 1`).
    ///
    /// The closing edge of a closed polyline is not counted.
    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Check that every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Remove every point equal to its immediate predecessor.
    ///
    /// For closed polylines a trailing copy of the first point is dropped as
    /// well, since the wrap edge already connects them.
    pub fn collapse_duplicates(&mut self) {
        self.points.dedup();
        if self.closed && self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
    }

    /// Return a copy with duplicates collapsed.
    pub fn deduplicated(&self) -> Self {
        let mut copy = self.clone();
        copy.collapse_duplicates();
        copy
    }

    /// Total length of all edges, including the closing edge if closed.
    pub fn arc_length(&self) -> f64 {
        let open: f64 = self
            .points
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum();
        match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + (first - last).norm(),
            _ => open,
        }
    }

    /// Arithmetic mean of the points, or `None` if empty.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        centroid(&self.points)
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` if empty.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        bounding_box(self.points.iter())
    }
}

/// Arithmetic mean of a point set.
pub(crate) fn centroid(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(nalgebra::Vector2::zeros(), |acc, p| acc + p.coords);
    Some(Point2::from(sum / points.len() as f64))
}

/// Axis-aligned bounds of a point set.
pub(crate) fn bounding_box<'a>(
    points: impl Iterator<Item = &'a Point2<f64>>,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let mut iter = points.peekable();
    let first = **iter.peek()?;
    let (mut min, mut max) = (first, first);
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_consecutive_duplicates() {
        let mut p = Polyline::from_xy(
            &[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)],
            false,
        );
        p.collapse_duplicates();
        // Non-adjacent repeats survive on open polylines.
        assert_eq!(p.len(), 4);
        assert_eq!(p.points()[3], Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_collapse_drops_closing_copy() {
        let mut p = Polyline::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)], true);
        p.collapse_duplicates();
        assert_eq!(p.len(), 3);
        assert_eq!(p.stroke_count(), 2);
    }

    #[test]
    fn test_single_point_after_collapse() {
        let p = Polyline::from_xy(&[(2.0, 2.0), (2.0, 2.0), (2.0, 2.0)], true).deduplicated();
        assert_eq!(p.len(), 1);
        assert_eq!(p.stroke_count(), 0);
    }

    #[test]
    fn test_arc_length() {
        let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let open = Polyline::from_xy(&square, false);
        let closed = Polyline::from_xy(&square, true);
        assert!((open.arc_length() - 3.0).abs() < 1e-12);
        assert!((closed.arc_length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_and_bounds() {
        let p = Polyline::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0)], false);
        let c = p.centroid().unwrap();
        assert!((c.x - 8.0 / 3.0).abs() < 1e-12);
        assert!((c.y - 2.0 / 3.0).abs() < 1e-12);

        let (min, max) = p.bounding_box().unwrap();
        assert_eq!(min, Point2::new(0.0, 0.0));
        assert_eq!(max, Point2::new(4.0, 2.0));

        assert!(Polyline::open(vec![]).centroid().is_none());
    }
}
