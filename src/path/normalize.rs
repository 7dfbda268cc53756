//! Geometry normalization applied before meshing.
//!
//! Each step is independently toggleable through [`NormalizeOptions`] and
//! runs in a fixed order:
//!
//! 1. Centre: subtract the centroid or the bounding-box centre
//! 2. Rescale uniformly so the extent along an axis equals a target size
//! 3. Flip: negate y (source art is y-down, meshes are y-up)
//! 4. Collapse consecutive duplicate points
//!
//! Duplicate collapse runs last and compares the transformed coordinates
//! exactly; duplicates come from tessellation, not floating-point noise.
//!
//! # Example
//!
//! ```
//! use svgmesh::path::{normalize, NormalizeOptions};
//! use nalgebra::Point2;
//!
//! let points = vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(2.0, 2.0)];
//! let out = normalize(&points, &NormalizeOptions::default().with_flip_y(false)).unwrap();
//!
//! let mean_x: f64 = out.iter().map(|p| p.x).sum::<f64>() / out.len() as f64;
//! assert!(mean_x.abs() < 1e-12);
//! ```

use nalgebra::{Point2, Vector2};

use super::Polyline;
use crate::error::{MeshError, Result};

/// Which point to move to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    /// Leave positions where they are.
    None,
    /// Arithmetic mean of all points.
    Centroid,
    /// Centre of the axis-aligned bounding box.
    BoundsCenter,
}

/// Axis whose extent is matched to the target size when rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    /// Horizontal extent.
    X,
    /// Vertical extent.
    Y,
    /// The larger of the two extents.
    Max,
}

impl ScaleAxis {
    fn name(self) -> &'static str {
        match self {
            ScaleAxis::X => "x",
            ScaleAxis::Y => "y",
            ScaleAxis::Max => "max(x, y)",
        }
    }

    fn extent(self, size: Vector2<f64>) -> f64 {
        match self {
            ScaleAxis::X => size.x,
            ScaleAxis::Y => size.y,
            ScaleAxis::Max => size.x.max(size.y),
        }
    }
}

/// Options for [`normalize`] and [`normalize_polylines`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Which point becomes the origin.
    pub center: Center,

    /// Negate the y component.
    pub flip_y: bool,

    /// Rescale so the extent along `scale_axis` equals this size.
    /// `None` keeps the original scale.
    pub target_size: Option<f64>,

    /// Axis measured for `target_size`.
    pub scale_axis: ScaleAxis,

    /// Remove points equal to their predecessor after transforming.
    pub collapse_duplicates: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            center: Center::Centroid,
            flip_y: true,
            target_size: None,
            scale_axis: ScaleAxis::Y,
            collapse_duplicates: true,
        }
    }
}

impl NormalizeOptions {
    /// Options that leave points untouched.
    pub fn identity() -> Self {
        Self {
            center: Center::None,
            flip_y: false,
            target_size: None,
            scale_axis: ScaleAxis::Y,
            collapse_duplicates: false,
        }
    }

    /// Set the centring mode.
    pub fn with_center(mut self, center: Center) -> Self {
        self.center = center;
        self
    }

    /// Set whether y is negated.
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Rescale so the extent along `axis` equals `size`.
    pub fn with_target_size(mut self, size: f64, axis: ScaleAxis) -> Self {
        self.target_size = Some(size);
        self.scale_axis = axis;
        self
    }

    /// Set whether consecutive duplicates are collapsed.
    pub fn with_collapse_duplicates(mut self, collapse: bool) -> Self {
        self.collapse_duplicates = collapse;
        self
    }
}

/// A similarity transform fitted to a point set.
#[derive(Debug, Clone, Copy)]
struct Frame {
    origin: Vector2<f64>,
    scale: f64,
    flip_y: bool,
}

impl Frame {
    fn fit(points: &[&Point2<f64>], options: &NormalizeOptions) -> Result<Self> {
        if points.is_empty() {
            return Err(MeshError::EmptyInput { what: "points" });
        }
        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(MeshError::NonFinite { what: "path points" });
        }

        let bounds = super::bounding_box(points.iter().copied());
        let (min, max) = match bounds {
            Some(b) => b,
            None => return Err(MeshError::EmptyInput { what: "points" }),
        };

        let origin = match options.center {
            Center::None => Vector2::zeros(),
            Center::Centroid => {
                let sum = points
                    .iter()
                    .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.coords);
                sum / points.len() as f64
            }
            Center::BoundsCenter => (min.coords + max.coords) / 2.0,
        };

        let scale = match options.target_size {
            None => 1.0,
            Some(size) => {
                if !(size.is_finite() && size > 0.0) {
                    return Err(MeshError::invalid_param(
                        "target_size",
                        size,
                        "must be positive and finite",
                    ));
                }
                let extent = options.scale_axis.extent(max - min);
                if extent <= 0.0 {
                    return Err(MeshError::ZeroExtent {
                        axis: options.scale_axis.name(),
                    });
                }
                size / extent
            }
        };

        Ok(Self {
            origin,
            scale,
            flip_y: options.flip_y,
        })
    }

    #[inline]
    fn apply(&self, p: &Point2<f64>) -> Point2<f64> {
        let mut v = (p.coords - self.origin) * self.scale;
        if self.flip_y {
            v.y = -v.y;
        }
        Point2::from(v)
    }
}

/// Normalize a single point sequence.
///
/// # Errors
///
/// - [`MeshError::EmptyInput`] if `points` is empty
/// - [`MeshError::NonFinite`] if any coordinate is NaN or infinite
/// - [`MeshError::ZeroExtent`] if a rescale is requested along a flat axis
pub fn normalize(points: &[Point2<f64>], options: &NormalizeOptions) -> Result<Vec<Point2<f64>>> {
    let refs: Vec<&Point2<f64>> = points.iter().collect();
    let frame = Frame::fit(&refs, options)?;

    let mut out: Vec<Point2<f64>> = points.iter().map(|p| frame.apply(p)).collect();
    if options.collapse_duplicates {
        out.dedup();
    }
    Ok(out)
}

/// Normalize a batch of polylines in one shared frame.
///
/// The centre and scale are fitted to the union of all points so relative
/// placement between polylines is preserved. Duplicate collapse then runs per
/// polyline (see [`Polyline::collapse_duplicates`]).
pub fn normalize_polylines(
    polylines: &[Polyline],
    options: &NormalizeOptions,
) -> Result<Vec<Polyline>> {
    if polylines.is_empty() {
        return Err(MeshError::EmptyInput { what: "polylines" });
    }
    let refs: Vec<&Point2<f64>> = polylines.iter().flat_map(|p| p.points()).collect();
    let frame = Frame::fit(&refs, options)?;

    let result = polylines
        .iter()
        .map(|polyline| {
            let points = polyline.points().iter().map(|p| frame.apply(p)).collect();
            let mut out = Polyline::new(points, polyline.is_closed());
            if options.collapse_duplicates {
                out.collapse_duplicates();
            }
            out
        })
        .collect();

    log::debug!(
        "normalized {} polylines (scale {:.4}, origin ({:.3}, {:.3}))",
        polylines.len(),
        frame.scale,
        frame.origin.x,
        frame.origin.y
    );

    Ok(result)
}
