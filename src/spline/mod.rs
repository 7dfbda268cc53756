//! Cubic splines and arclength lookup tables.
//!
//! A [`Spline`] is a chain of [`Knot`]s, each carrying a position and two
//! handle offsets. Consecutive knots define one cubic Bezier segment
//! (`P0 = a.position`, `P1 = a.position + a.tangent_out`,
//! `P2 = b.position + b.tangent_in`, `P3 = b.position`); closed splines add a
//! segment from the last knot back to the first.
//!
//! Splines come from vector contours ([`Spline::from_bez_path`]) or from
//! freehand strokes ([`sketch_to_spline`]) and feed the arclength lookup
//! table builder ([`ArclengthLut`]).
//!
//! # Example
//!
//! ```
//! use svgmesh::kurbo::BezPath;
//! use svgmesh::spline::{ArclengthLut, LutOptions, Spline};
//!
//! let path = BezPath::from_svg("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
//! let splines = Spline::from_bez_path(&path);
//! assert_eq!(splines[0].num_segments(), 4);
//!
//! let lut = ArclengthLut::build(&splines, &LutOptions::default()).unwrap();
//! assert_eq!(lut.len(), 4);
//! // Equal sides: halfway round the square is the start of the third side.
//! assert!((lut.segment_coordinate(0.5) - 2.0).abs() < 1e-6);
//! ```

mod lut;
mod sketch;
mod texture;

pub use lut::{ArclengthLut, Keyframe, LookupCurve, LutOptions, SegmentRecord};
pub use sketch::sketch_to_spline;
pub use texture::{SplineMap, Texel};

use kurbo::{Affine, BezPath, CubicBez, PathEl, PathSeg, Point, Vec2};

use crate::scene::split_subpaths;

/// A spline control point with its two Bezier handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knot {
    /// Position on the curve.
    pub position: Point,
    /// Offset of the incoming handle from `position`.
    pub tangent_in: Vec2,
    /// Offset of the outgoing handle from `position`.
    pub tangent_out: Vec2,
}

impl Knot {
    /// Create a knot.
    pub fn new(position: Point, tangent_in: Vec2, tangent_out: Vec2) -> Self {
        Self {
            position,
            tangent_in,
            tangent_out,
        }
    }

    /// A knot with no handles (a polyline corner).
    pub fn corner(position: Point) -> Self {
        Self::new(position, Vec2::ZERO, Vec2::ZERO)
    }
}

/// An open or closed chain of cubic Bezier segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spline {
    knots: Vec<Knot>,
    closed: bool,
}

impl Spline {
    /// Create a spline from knots.
    pub fn new(knots: Vec<Knot>, closed: bool) -> Self {
        Self { knots, closed }
    }

    /// Convert every subpath of a `BezPath` into a spline.
    ///
    /// Lines and quadratic segments are raised to cubics. Knot `i` sits at the
    /// start of segment `i`; open subpaths get one more knot at their end
    /// point. Subpaths without segments are skipped.
    pub fn from_bez_path(path: &BezPath) -> Vec<Spline> {
        split_subpaths(path)
            .iter()
            .filter_map(Self::from_contour)
            .collect()
    }

    /// Convert a single contour (one subpath) into a spline.
    pub fn from_contour(contour: &BezPath) -> Option<Spline> {
        let closed = matches!(contour.elements().last(), Some(PathEl::ClosePath));
        let cubics: Vec<CubicBez> = contour.segments().map(to_cubic).collect();
        let last = *cubics.last()?;

        let n = cubics.len();
        let mut knots: Vec<Knot> = cubics
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let tangent_in = if i > 0 {
                    cubics[i - 1].p2 - c.p0
                } else if closed {
                    cubics[n - 1].p2 - c.p0
                } else {
                    Vec2::ZERO
                };
                Knot::new(c.p0, tangent_in, c.p1 - c.p0)
            })
            .collect();

        if !closed {
            knots.push(Knot::new(last.p3, last.p2 - last.p3, Vec2::ZERO));
        }

        Some(Spline::new(knots, closed))
    }

    /// The knots.
    #[inline]
    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    /// Whether the last knot connects back to the first.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of Bezier segments.
    pub fn num_segments(&self) -> usize {
        match (self.closed, self.knots.len()) {
            (_, 0) => 0,
            (true, n) => n,
            (false, n) => n - 1,
        }
    }

    /// The Bezier segments, in order.
    ///
    /// Closed splines include the wrap segment from the last knot to the first.
    pub fn curves(&self) -> impl Iterator<Item = CubicBez> + '_ {
        let n = self.knots.len();
        (0..self.num_segments()).map(move |i| {
            let a = &self.knots[i];
            let b = &self.knots[(i + 1) % n];
            CubicBez::new(
                a.position,
                a.position + a.tangent_out,
                b.position + b.tangent_in,
                b.position,
            )
        })
    }

    /// Apply an affine transform to positions and handles.
    pub fn transformed(&self, affine: Affine) -> Spline {
        let knots = self
            .knots
            .iter()
            .map(|k| {
                let position = affine * k.position;
                Knot::new(
                    position,
                    affine * (k.position + k.tangent_in) - position,
                    affine * (k.position + k.tangent_out) - position,
                )
            })
            .collect();
        Spline::new(knots, self.closed)
    }
}

/// Raise any path segment to a cubic.
pub(crate) fn to_cubic(seg: PathSeg) -> CubicBez {
    match seg {
        PathSeg::Line(line) => CubicBez::new(
            line.p0,
            line.p0.lerp(line.p1, 1.0 / 3.0),
            line.p0.lerp(line.p1, 2.0 / 3.0),
            line.p1,
        ),
        PathSeg::Quad(quad) => quad.raise(),
        PathSeg::Cubic(cubic) => cubic,
    }
}
