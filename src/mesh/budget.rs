//! Shared UV budget for a batch of polylines.
//!
//! All polylines of a fan mesh share one UV strip along x. Each polyline gets
//! a contiguous slice proportional to its stroke count (`len - 1`) relative to
//! the batch total, laid out in input order so the slices tile [0, 1] exactly.
//!
//! Slice boundaries are computed from integer prefix sums, so the last slice
//! ends at exactly 1.0 regardless of how many polylines precede it.

use crate::error::{MeshError, Result};
use crate::path::Polyline;

/// The slice of UV x assigned to one polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRange {
    /// Start of the slice.
    pub start: f64,
    /// End of the slice.
    pub end: f64,
    /// Strokes (edges) the slice is divided into.
    pub strokes: usize,
}

impl UvRange {
    /// Width of the slice.
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// UV x of point `k` within the polyline.
    #[inline]
    pub fn u_at(&self, k: usize) -> f64 {
        if self.strokes == 0 {
            return self.start;
        }
        // Two-sided lerp so both endpoints are reproduced exactly.
        let t = k as f64 / self.strokes as f64;
        self.start * (1.0 - t) + self.end * t
    }
}

/// UV slices for a batch of polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct PathBudget {
    stroke_count: usize,
    ranges: Vec<UvRange>,
}

impl PathBudget {
    /// Compute the budget for a batch of polylines.
    ///
    /// # Errors
    ///
    /// - [`MeshError::EmptyInput`] if `polylines` is empty
    /// - [`MeshError::InvalidBudget`] if the total stroke count is zero
    pub fn new(polylines: &[Polyline]) -> Result<Self> {
        Self::from_point_counts(polylines.iter().map(Polyline::len))
    }

    /// Compute the budget from per-polyline point counts.
    pub fn from_point_counts<T: IntoIterator<Item = usize>>(counts: T) -> Result<Self> {
        let strokes: Vec<usize> = counts.into_iter().map(|n| n.saturating_sub(1)).collect();
        if strokes.is_empty() {
            return Err(MeshError::EmptyInput { what: "polylines" });
        }

        let stroke_count: usize = strokes.iter().sum();
        if stroke_count == 0 {
            return Err(MeshError::InvalidBudget);
        }

        let total = stroke_count as f64;
        let mut before = 0usize;
        let ranges = strokes
            .iter()
            .map(|&s| {
                let range = UvRange {
                    start: before as f64 / total,
                    end: (before + s) as f64 / total,
                    strokes: s,
                };
                before += s;
                range
            })
            .collect();

        Ok(Self {
            stroke_count,
            ranges,
        })
    }

    /// Total number of strokes across the batch.
    #[inline]
    pub fn stroke_count(&self) -> usize {
        self.stroke_count
    }

    /// One slice per polyline, in input order.
    #[inline]
    pub fn ranges(&self) -> &[UvRange] {
        &self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_paths_partition() {
        // 3 and 5 points -> 2 and 4 strokes.
        let budget = PathBudget::from_point_counts([3, 5]).unwrap();
        assert_eq!(budget.stroke_count(), 6);

        let r = budget.ranges();
        assert_eq!(r[0].start, 0.0);
        assert!((r[0].end - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(r[0].end, r[1].start);
        assert_eq!(r[1].end, 1.0);
    }

    #[test]
    fn test_partition_is_contiguous() {
        let counts = [7, 2, 13, 4, 4, 101, 3];
        let budget = PathBudget::from_point_counts(counts).unwrap();
        let ranges = budget.ranges();

        assert_eq!(ranges[0].start, 0.0);
        assert_eq!(ranges.last().unwrap().end, 1.0);
        for w in ranges.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
        let widths: f64 = ranges.iter().map(UvRange::width).sum();
        assert!((widths - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_u_at_endpoints() {
        let budget = PathBudget::from_point_counts([3, 5]).unwrap();
        let second = budget.ranges()[1];
        assert_eq!(second.u_at(0), second.start);
        assert_eq!(second.u_at(4), 1.0);
        assert!((second.u_at(2) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_budget() {
        assert!(matches!(
            PathBudget::from_point_counts([1, 1, 0]),
            Err(MeshError::InvalidBudget)
        ));
        assert!(matches!(
            PathBudget::from_point_counts(std::iter::empty()),
            Err(MeshError::EmptyInput { .. })
        ));
    }
}
