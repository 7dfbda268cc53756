//! Vector scenes: transform trees of Bezier shapes and their tessellation.
//!
//! A [`SceneNode`] owns shapes (as [`BezPath`]s) and child nodes, each with a
//! local transform. [`flatten_scene`] walks the tree and yields one
//! [`PlacedContour`] per subpath with its accumulated world transform;
//! [`tessellate_scene`] flattens those contours into [`Polyline`]s ready for
//! normalization and meshing.
//!
//! # Example
//!
//! ```
//! use svgmesh::kurbo::{Affine, BezPath};
//! use svgmesh::scene::{flatten_scene, tessellate_scene, SceneNode, TessellationOptions};
//!
//! let square = BezPath::from_svg("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
//! let root = SceneNode::new()
//!     .with_transform(Affine::translate((5.0, 0.0)))
//!     .with_shape(square);
//!
//! let contours = flatten_scene(&root);
//! let polylines = tessellate_scene(&contours, &TessellationOptions::default()).unwrap();
//! assert_eq!(polylines.len(), 1);
//! assert!(polylines[0].is_closed());
//! assert_eq!(polylines[0].len(), 4);
//! ```

use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};
use nalgebra::Point2;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::path::Polyline;

/// Points per scene unit assumed when deriving a tessellation tolerance.
const POINTS_PER_UNIT: f64 = 100.0;
/// Smallest tolerance [`TessellationOptions::for_bounds`] will produce.
const MIN_TOLERANCE: f64 = 0.01;

/// A node in a vector scene tree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Transform from this node's space to its parent's.
    pub transform: Affine,
    /// Shapes drawn in this node's space.
    pub shapes: Vec<BezPath>,
    /// Child nodes, drawn after this node's shapes.
    pub children: Vec<SceneNode>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            shapes: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl SceneNode {
    /// Create an empty node with the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local transform.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Add a shape.
    pub fn with_shape(mut self, shape: BezPath) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(SceneNode::num_nodes).sum::<usize>()
    }
}

/// A single contour with its world transform.
#[derive(Debug, Clone)]
pub struct PlacedContour {
    /// One subpath in local coordinates.
    pub path: BezPath,
    /// Accumulated transform from local to world coordinates.
    pub transform: Affine,
}

impl PlacedContour {
    /// Whether the contour ends with a `ClosePath`.
    pub fn is_closed(&self) -> bool {
        matches!(self.path.elements().last(), Some(PathEl::ClosePath))
    }

    /// The contour in world coordinates.
    pub fn world_path(&self) -> BezPath {
        let mut path = self.path.clone();
        path.apply_affine(self.transform);
        path
    }

    /// World-space bounding box.
    pub fn bounds(&self) -> Rect {
        self.world_path().bounding_box()
    }
}

/// Split a path into its subpaths, each starting with a `MoveTo`.
pub fn split_subpaths(path: &BezPath) -> Vec<BezPath> {
    let mut subpaths = Vec::new();
    let mut current: Vec<PathEl> = Vec::new();
    for el in path.elements() {
        if matches!(el, PathEl::MoveTo(_)) && !current.is_empty() {
            subpaths.push(BezPath::from_vec(std::mem::take(&mut current)));
        }
        current.push(*el);
    }
    if !current.is_empty() {
        subpaths.push(BezPath::from_vec(current));
    }
    subpaths
}

/// Walk the tree depth-first and collect every contour with its world transform.
///
/// A node's own shapes come before its children's; shapes and children keep
/// their input order. Subpaths without any segment are skipped.
pub fn flatten_scene(root: &SceneNode) -> Vec<PlacedContour> {
    let mut out = Vec::new();
    collect_contours(root, Affine::IDENTITY, &mut out);
    out
}

fn collect_contours(node: &SceneNode, parent: Affine, out: &mut Vec<PlacedContour>) {
    let world = parent * node.transform;
    for shape in &node.shapes {
        for path in split_subpaths(shape) {
            if path.segments().next().is_none() {
                continue;
            }
            out.push(PlacedContour {
                path,
                transform: world,
            });
        }
    }
    for child in &node.children {
        collect_contours(child, world, out);
    }
}

/// Union of the world-space bounds of all contours, or `None` if there are none.
pub fn scene_bounds(contours: &[PlacedContour]) -> Option<Rect> {
    contours
        .iter()
        .map(PlacedContour::bounds)
        .reduce(|a, b| a.union(b))
}

/// Options for contour tessellation.
#[derive(Debug, Clone)]
pub struct TessellationOptions {
    /// Maximum distance between a curve and its polyline approximation.
    pub tolerance: f64,

    /// Whether to tessellate contours in parallel (default: true).
    pub parallel: bool,
}

impl Default for TessellationOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            parallel: true,
        }
    }
}

impl TessellationOptions {
    /// Derive a tolerance from the scene size and a target resolution.
    ///
    /// Scene units are converted at 100 per unit; the larger extent is
    /// divided by `target_resolution * multiplier` and doubled, with a floor
    /// of 0.01.
    pub fn for_bounds(bounds: Rect, target_resolution: f64, multiplier: f64) -> Self {
        let max_dim = bounds.width().max(bounds.height()) / POINTS_PER_UNIT;
        let ratio = max_dim / (target_resolution * multiplier);
        Self {
            tolerance: (2.0 * ratio).max(MIN_TOLERANCE),
            ..Self::default()
        }
    }

    /// Set the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MeshError::invalid_param(
                "tolerance",
                self.tolerance,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Flatten one contour into a world-space polyline.
///
/// The polyline is closed iff the contour ends with `ClosePath`. Consecutive
/// duplicate points are collapsed.
pub fn tessellate_contour(contour: &PlacedContour, options: &TessellationOptions) -> Result<Polyline> {
    options.validate()?;
    Ok(flatten_contour(contour, options.tolerance))
}

fn flatten_contour(contour: &PlacedContour, tolerance: f64) -> Polyline {
    let world = contour.world_path();
    let mut points: Vec<Point2<f64>> = Vec::new();
    kurbo::flatten(world.elements().iter().copied(), tolerance, |el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(to_point2(p)),
        _ => {}
    });

    let mut polyline = Polyline::new(points, contour.is_closed());
    polyline.collapse_duplicates();
    polyline
}

/// Tessellate every contour, preserving order.
///
/// Contours that flatten to fewer than two distinct points are dropped.
pub fn tessellate_scene(
    contours: &[PlacedContour],
    options: &TessellationOptions,
) -> Result<Vec<Polyline>> {
    options.validate()?;

    let flattened: Vec<Polyline> = if options.parallel {
        contours
            .par_iter()
            .map(|c| flatten_contour(c, options.tolerance))
            .collect()
    } else {
        contours
            .iter()
            .map(|c| flatten_contour(c, options.tolerance))
            .collect()
    };

    let total = flattened.len();
    let polylines: Vec<Polyline> = flattened.into_iter().filter(|p| p.len() >= 2).collect();
    if polylines.len() < total {
        log::debug!(
            "dropped {} degenerate contour(s) during tessellation",
            total - polylines.len()
        );
    }
    log::debug!(
        "tessellated {} contour(s) at tolerance {:.4} into {} points",
        polylines.len(),
        options.tolerance,
        polylines.iter().map(Polyline::len).sum::<usize>()
    );

    Ok(polylines)
}

fn to_point2(p: Point) -> Point2<f64> {
    Point2::new(p.x, p.y)
}
