//! Arclength lookup tables for Bezier chains.
//!
//! Sampling a chain of cubic segments at a uniform parameter step crowds
//! samples into short segments. [`ArclengthLut`] fixes this by mapping a
//! normalized arclength `s` in [0, 1] to a *segment coordinate*: the integer
//! part selects the segment, the fractional part is the parameter inside it.
//!
//! # Construction
//!
//! 1. Measure every segment with [`ParamCurveArclen`]; drop zero-length ones
//! 2. Sum the lengths; a zero total is an error
//! 3. `start[i]` = length of all earlier segments / total
//! 4. Key `(start[i], i)` per segment plus a terminal key `(1, count)`.
//!    Each key's tangents are the reciprocals of the neighbouring fraction
//!    gaps; the first incoming and the last outgoing tangent are 0
//!
//! The keys form a [`LookupCurve`] evaluated with cubic Hermite interpolation.

use kurbo::{CubicBez, ParamCurve, ParamCurveArclen, Point};

use super::Spline;
use crate::error::{Degeneracy, MeshError, Result};

/// Options for building an [`ArclengthLut`].
#[derive(Debug, Clone)]
pub struct LutOptions {
    /// Accuracy passed to the arclength estimator, in path units.
    pub accuracy: f64,
}

impl Default for LutOptions {
    fn default() -> Self {
        Self { accuracy: 1e-6 }
    }
}

impl LutOptions {
    /// Set the arclength accuracy.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }
}

/// A curve key with explicit tangents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Input parameter of the key.
    pub time: f64,
    /// Output value at `time`.
    pub value: f64,
    /// Slope arriving at the key.
    pub in_tangent: f64,
    /// Slope leaving the key.
    pub out_tangent: f64,
}

impl Keyframe {
    /// Create a key.
    pub fn new(time: f64, value: f64, in_tangent: f64, out_tangent: f64) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// A piecewise cubic Hermite curve through [`Keyframe`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupCurve {
    keys: Vec<Keyframe>,
}

impl LookupCurve {
    /// Create a curve from keys sorted by time.
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    /// The keys.
    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the curve has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluate the curve at `t`.
    ///
    /// Outside the key range the curve holds the first or last value. An
    /// empty curve evaluates to 0, and NaN evaluates to the first value.
    pub fn evaluate(&self, t: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t is inside the key range so 1 <= i < len.
        let i = self.keys.partition_point(|k| k.time <= t);
        let k0 = &self.keys[i - 1];
        let k1 = &self.keys[i];

        let dt = k1.time - k0.time;
        if dt <= 0.0 {
            return k1.value;
        }
        let s = (t - k0.time) / dt;
        let m0 = k0.out_tangent * dt;
        let m1 = k1.in_tangent * dt;

        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * k0.value + h10 * m0 + h01 * k1.value + h11 * m1
    }
}

/// One segment of the chain with its arclength bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRecord {
    /// The segment's control points.
    pub curve: CubicBez,
    /// Arclength of the segment.
    pub length: f64,
    /// Arclength of all earlier segments divided by `total_length`.
    pub start_fraction: f64,
    /// Arclength of the whole chain.
    pub total_length: f64,
}

impl SegmentRecord {
    /// This segment's share of the chain length.
    #[inline]
    pub fn share(&self) -> f64 {
        self.length / self.total_length
    }

    /// Reciprocal of [`share`](Self::share): scales a fraction delta into a
    /// parameter delta within this segment.
    #[inline]
    pub fn inverse_share(&self) -> f64 {
        self.total_length / self.length
    }

    /// Normalized arclength at the segment's end.
    #[inline]
    pub fn end_fraction(&self) -> f64 {
        self.start_fraction + self.share()
    }
}

/// Lookup curve from normalized arclength to segment coordinate.
#[derive(Debug, Clone)]
pub struct ArclengthLut {
    curve: LookupCurve,
    segments: Vec<SegmentRecord>,
    total_length: f64,
}

impl ArclengthLut {
    /// Build a table over the segments of several splines, concatenated in order.
    pub fn build(splines: &[Spline], options: &LutOptions) -> Result<Self> {
        Self::from_curves(splines.iter().flat_map(Spline::curves), options)
    }

    /// Build a table over an explicit segment sequence.
    ///
    /// # Errors
    ///
    /// - [`MeshError::EmptyInput`] if there are no segments
    /// - [`MeshError::DegeneratePath`] if every segment has zero length
    /// - [`MeshError::NonFinite`] if a control point or length is not finite
    /// - [`MeshError::InvalidParameter`] if the accuracy is not positive
    pub fn from_curves<T>(curves: T, options: &LutOptions) -> Result<Self>
    where
        T: IntoIterator<Item = CubicBez>,
    {
        if !(options.accuracy.is_finite() && options.accuracy > 0.0) {
            return Err(MeshError::invalid_param(
                "accuracy",
                options.accuracy,
                "must be positive and finite",
            ));
        }

        let curves: Vec<CubicBez> = curves.into_iter().collect();
        if curves.is_empty() {
            return Err(MeshError::EmptyInput {
                what: "curve segments",
            });
        }

        let mut measured: Vec<(CubicBez, f64)> = Vec::with_capacity(curves.len());
        for curve in &curves {
            if ![curve.p0, curve.p1, curve.p2, curve.p3].iter().all(is_finite) {
                return Err(MeshError::NonFinite {
                    what: "curve control points",
                });
            }
            let length = curve.arclen(options.accuracy);
            if !length.is_finite() {
                return Err(MeshError::NonFinite {
                    what: "curve length",
                });
            }
            if length > 0.0 {
                measured.push((*curve, length));
            }
        }

        if measured.is_empty() {
            return Err(MeshError::DegeneratePath(Degeneracy::ZeroLength {
                segments: curves.len(),
            }));
        }
        let dropped = curves.len() - measured.len();
        if dropped > 0 {
            log::warn!("dropped {} zero-length segment(s) from chain", dropped);
        }

        let total_length: f64 = measured.iter().map(|(_, len)| len).sum();
        let mut before = 0.0;
        let segments: Vec<SegmentRecord> = measured
            .iter()
            .map(|&(curve, length)| {
                let record = SegmentRecord {
                    curve,
                    length,
                    start_fraction: before / total_length,
                    total_length,
                };
                before += length;
                record
            })
            .collect();

        let curve = build_keys(&segments);

        log::debug!(
            "arclength table: {} segments, total length {:.4}",
            segments.len(),
            total_length
        );

        Ok(Self {
            curve,
            segments,
            total_length,
        })
    }

    /// The lookup curve.
    #[inline]
    pub fn curve(&self) -> &LookupCurve {
        &self.curve
    }

    /// Per-segment records, in chain order.
    #[inline]
    pub fn segments(&self) -> &[SegmentRecord] {
        &self.segments
    }

    /// Arclength of the whole chain.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a table has at least one segment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Normalized start of each segment.
    pub fn start_fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments.iter().map(|s| s.start_fraction)
    }

    /// Map a normalized arclength to a segment coordinate.
    ///
    /// `s` is clamped to [0, 1]; the result lies in [0, len].
    pub fn segment_coordinate(&self, s: f64) -> f64 {
        self.curve.evaluate(s.clamp(0.0, 1.0))
    }

    /// Point on the chain at normalized arclength `s`.
    pub fn sample(&self, s: f64) -> Point {
        let coord = self.segment_coordinate(s).max(0.0);
        let last = self.segments.len() - 1;
        let index = (coord.floor() as usize).min(last);
        let t = (coord - index as f64).clamp(0.0, 1.0);
        self.segments[index].curve.eval(t)
    }
}

fn is_finite(p: &Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Slope across a fraction gap, 0 when the gap vanished in rounding.
fn reciprocal_gap(gap: f64) -> f64 {
    // Subnormal gaps would overflow to an infinite tangent.
    if gap >= f64::MIN_POSITIVE {
        1.0 / gap
    } else {
        0.0
    }
}

fn build_keys(segments: &[SegmentRecord]) -> LookupCurve {
    let count = segments.len();
    let starts: Vec<f64> = segments.iter().map(|s| s.start_fraction).collect();

    let mut keys: Vec<Keyframe> = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let in_tangent = if i > 0 {
                reciprocal_gap(start - starts[i - 1])
            } else {
                0.0
            };
            let next = if i + 1 < count { starts[i + 1] } else { 1.0 };
            Keyframe::new(start, i as f64, in_tangent, reciprocal_gap(next - start))
        })
        .collect();

    let last_start = starts[count - 1];
    keys.push(Keyframe::new(
        1.0,
        count as f64,
        reciprocal_gap(1.0 - last_start),
        0.0,
    ));

    LookupCurve::new(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::Knot;

    fn line(x0: f64, x1: f64) -> CubicBez {
        CubicBez::new(
            (x0, 0.0),
            (x0 + (x1 - x0) / 3.0, 0.0),
            (x0 + 2.0 * (x1 - x0) / 3.0, 0.0),
            (x1, 0.0),
        )
    }

    #[test]
    fn test_uneven_segments() {
        // Lengths 1, 3, 6.
        let lut = ArclengthLut::from_curves(
            [line(0.0, 1.0), line(1.0, 4.0), line(4.0, 10.0)],
            &LutOptions::default(),
        )
        .unwrap();

        assert_eq!(lut.len(), 3);
        assert!((lut.total_length() - 10.0).abs() < 1e-6);

        let starts: Vec<f64> = lut.start_fractions().collect();
        assert_eq!(starts[0], 0.0);
        assert!((starts[1] - 0.1).abs() < 1e-6);
        assert!((starts[2] - 0.4).abs() < 1e-6);
        for w in starts.windows(2) {
            assert!(w[0] <= w[1]);
        }

        let shares: f64 = lut.segments().iter().map(SegmentRecord::share).sum();
        assert!((shares - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_keys_and_tangents() {
        let lut = ArclengthLut::from_curves(
            [line(0.0, 1.0), line(1.0, 4.0), line(4.0, 10.0)],
            &LutOptions::default(),
        )
        .unwrap();
        let keys = lut.curve().keys();
        assert_eq!(keys.len(), 4);

        assert_eq!(keys[0].in_tangent, 0.0);
        assert!((keys[0].out_tangent - 10.0).abs() < 1e-4);
        assert!((keys[1].in_tangent - 10.0).abs() < 1e-4);
        assert!((keys[1].out_tangent - 1.0 / 0.3).abs() < 1e-4);
        assert!((keys[2].out_tangent - 1.0 / 0.6).abs() < 1e-4);

        let end = keys[3];
        assert_eq!((end.time, end.value), (1.0, 3.0));
        assert_eq!(end.out_tangent, 0.0);
        assert_eq!(end.in_tangent, keys[2].out_tangent);
    }

    #[test]
    fn test_segment_coordinate_hits_breakpoints() {
        let lut = ArclengthLut::from_curves(
            [line(0.0, 1.0), line(1.0, 4.0), line(4.0, 10.0)],
            &LutOptions::default(),
        )
        .unwrap();

        for (i, start) in lut.start_fractions().enumerate() {
            assert!((lut.segment_coordinate(start) - i as f64).abs() < 1e-9);
        }
        assert_eq!(lut.segment_coordinate(1.0), 3.0);
        assert_eq!(lut.segment_coordinate(-2.0), 0.0);
        assert_eq!(lut.segment_coordinate(7.0), 3.0);

        // Halfway along the arclength is inside the last segment (4..10 spans 0.4..1.0).
        let c = lut.segment_coordinate(0.7);
        assert!((c - 2.5).abs() < 1e-6, "coordinate {}", c);
    }

    #[test]
    fn test_coordinate_is_monotone() {
        let lut = ArclengthLut::from_curves(
            [line(0.0, 0.5), line(0.5, 8.0), line(8.0, 8.25), line(8.25, 9.0)],
            &LutOptions::default(),
        )
        .unwrap();
        let mut prev = f64::NEG_INFINITY;
        for i in 0..=200 {
            let c = lut.segment_coordinate(i as f64 / 200.0);
            assert!(c >= prev - 1e-12);
            prev = c;
        }
    }

    #[test]
    fn test_single_segment() {
        let lut = ArclengthLut::from_curves([line(0.0, 2.0)], &LutOptions::default()).unwrap();
        let keys = lut.curve().keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], Keyframe::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(keys[1], Keyframe::new(1.0, 1.0, 1.0, 0.0));
        assert!((lut.segment_coordinate(0.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_sample_walks_by_arclength() {
        let lut = ArclengthLut::from_curves(
            [line(0.0, 1.0), line(1.0, 4.0), line(4.0, 10.0)],
            &LutOptions::default(),
        )
        .unwrap();
        assert!((lut.sample(0.0) - Point::new(0.0, 0.0)).hypot() < 1e-9);
        assert!((lut.sample(0.1) - Point::new(1.0, 0.0)).hypot() < 1e-6);
        assert!((lut.sample(0.7) - Point::new(7.0, 0.0)).hypot() < 1e-6);
        assert!((lut.sample(1.0) - Point::new(10.0, 0.0)).hypot() < 1e-9);
    }

    #[test]
    fn test_zero_length_segments_dropped() {
        let point = CubicBez::new((3.0, 3.0), (3.0, 3.0), (3.0, 3.0), (3.0, 3.0));
        let lut = ArclengthLut::from_curves(
            [line(0.0, 1.0), point, line(1.0, 2.0)],
            &LutOptions::default(),
        )
        .unwrap();
        assert_eq!(lut.len(), 2);
        assert!((lut.segments()[1].start_fraction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_length_is_degenerate() {
        let point = CubicBez::new((1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0));
        let err = ArclengthLut::from_curves([point, point], &LutOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::DegeneratePath(Degeneracy::ZeroLength { segments: 2 })
        ));
    }

    #[test]
    fn test_empty_and_bad_accuracy() {
        assert!(matches!(
            ArclengthLut::from_curves(Vec::new(), &LutOptions::default()),
            Err(MeshError::EmptyInput { .. })
        ));
        assert!(matches!(
            ArclengthLut::from_curves([line(0.0, 1.0)], &LutOptions::default().with_accuracy(0.0)),
            Err(MeshError::InvalidParameter { name: "accuracy", .. })
        ));
    }

    #[test]
    fn test_build_concatenates_splines() {
        let open = Spline::new(
            vec![
                Knot::corner(Point::new(0.0, 0.0)),
                Knot::corner(Point::new(4.0, 0.0)),
            ],
            false,
        );
        let square = Spline::new(
            vec![
                Knot::corner(Point::new(0.0, 0.0)),
                Knot::corner(Point::new(1.0, 0.0)),
                Knot::corner(Point::new(1.0, 1.0)),
                Knot::corner(Point::new(0.0, 1.0)),
            ],
            true,
        );
        let lut = ArclengthLut::build(&[open, square], &LutOptions::default()).unwrap();
        assert_eq!(lut.len(), 5);
        assert!((lut.total_length() - 8.0).abs() < 1e-6);
        assert!((lut.segments()[1].start_fraction - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_lookup_curve_edges() {
        assert_eq!(LookupCurve::default().evaluate(0.5), 0.0);
        let single = LookupCurve::new(vec![Keyframe::new(0.3, 7.0, 0.0, 0.0)]);
        assert_eq!(single.evaluate(0.0), 7.0);
        assert_eq!(single.evaluate(1.0), 7.0);
    }

    #[test]
    fn test_nan_maps_to_chain_start() {
        let lut = ArclengthLut::from_curves([line(0.0, 1.0), line(1.0, 3.0)], &LutOptions::default())
            .unwrap();

        assert_eq!(lut.curve().evaluate(f64::NAN), 0.0);
        assert_eq!(lut.segment_coordinate(f64::NAN), 0.0);
        let p = lut.sample(f64::NAN);
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
    }

    #[test]
    fn test_subnormal_gap_has_flat_tangent() {
        let tiny = f64::MIN_POSITIVE / 4.0;
        assert_eq!(reciprocal_gap(tiny), 0.0);
        assert_eq!(reciprocal_gap(0.0), 0.0);
        assert_eq!(reciprocal_gap(0.25), 4.0);

        let curve = LookupCurve::new(vec![
            Keyframe::new(0.0, 0.0, 0.0, reciprocal_gap(tiny)),
            Keyframe::new(tiny, 1.0, reciprocal_gap(tiny), reciprocal_gap(1.0 - tiny)),
            Keyframe::new(1.0, 2.0, reciprocal_gap(1.0 - tiny), 0.0),
        ]);
        let mid = curve.evaluate(tiny * 0.5);
        assert!(mid.is_finite() && (0.0..=1.0).contains(&mid));
        for i in 0..=10 {
            assert!(curve.evaluate(i as f64 / 10.0).is_finite());
        }
    }
}
