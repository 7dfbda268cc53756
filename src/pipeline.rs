//! End-to-end conversion of a vector scene into a laser fan mesh.
//!
//! The pipeline chains the individual stages:
//!
//! 1. [`flatten_scene`]: collect contours with world transforms
//! 2. [`scene_bounds`] → [`TessellationOptions::for_bounds`]: pick a tolerance
//! 3. [`tessellate_scene`]: flatten contours to polylines
//! 4. [`normalize_polylines`]: centre, rescale and flip in one shared frame
//! 5. [`build_fan_mesh`]: fan every polyline around the apex
//!
//! # Example
//!
//! ```
//! use svgmesh::kurbo::BezPath;
//! use svgmesh::mesh::FanMesh;
//! use svgmesh::pipeline::{build_laser_mesh, PipelineOptions};
//! use svgmesh::scene::SceneNode;
//!
//! let star = BezPath::from_svg("M50,0 L61,35 L98,35 L68,57 L79,91 L50,70 L21,91 L32,57 L2,35 L39,35 Z").unwrap();
//! let root = SceneNode::new().with_shape(star);
//!
//! let mesh: FanMesh = build_laser_mesh(&root, &PipelineOptions::default()).unwrap();
//! assert_eq!(mesh.num_vertices(), 11);
//! assert_eq!(mesh.num_triangles(), 10);
//! assert!(mesh.is_valid());
//! ```

use crate::error::{MeshError, Result};
use crate::mesh::{build_fan_mesh, FanMesh, FanMeshOptions, MeshIndex};
use crate::path::{normalize_polylines, Center, NormalizeOptions, ScaleAxis};
use crate::scene::{flatten_scene, scene_bounds, tessellate_scene, SceneNode, TessellationOptions};

/// Options for [`build_laser_mesh`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Target output resolution used to derive the tessellation tolerance.
    pub target_resolution: f64,

    /// Resolution multiplier; larger values tessellate more finely.
    pub multiplier: f64,

    /// Explicit tessellation tolerance, overriding the derived one.
    pub tolerance: Option<f64>,

    /// Whether to tessellate contours in parallel (default: true).
    pub parallel: bool,

    /// Normalization applied to the tessellated polylines.
    pub normalize: NormalizeOptions,

    /// Fan mesh construction options.
    pub mesh: FanMeshOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            target_resolution: 400.0,
            multiplier: 1.0,
            tolerance: None,
            parallel: true,
            normalize: NormalizeOptions::default()
                .with_center(Center::BoundsCenter)
                .with_target_size(100.0, ScaleAxis::Y),
            mesh: FanMeshOptions::default(),
        }
    }
}

impl PipelineOptions {
    /// Set the target resolution.
    pub fn with_target_resolution(mut self, resolution: f64) -> Self {
        self.target_resolution = resolution;
        self
    }

    /// Set the resolution multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Use a fixed tessellation tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the fan mesh options.
    pub fn with_mesh(mut self, mesh: FanMeshOptions) -> Self {
        self.mesh = mesh;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.target_resolution.is_finite() && self.target_resolution > 0.0) {
            return Err(MeshError::invalid_param(
                "target_resolution",
                self.target_resolution,
                "must be positive and finite",
            ));
        }
        if !(self.multiplier.is_finite() && self.multiplier > 0.0) {
            return Err(MeshError::invalid_param(
                "multiplier",
                self.multiplier,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Convert a vector scene into a fan mesh.
///
/// # Errors
///
/// - [`MeshError::EmptyInput`] if the scene contains no drawable contour
/// - any error from tessellation, normalization or fan construction
pub fn build_laser_mesh<I: MeshIndex>(
    root: &SceneNode,
    options: &PipelineOptions,
) -> Result<FanMesh<I>> {
    options.validate()?;

    let contours = flatten_scene(root);
    let bounds = scene_bounds(&contours).ok_or(MeshError::EmptyInput { what: "contours" })?;

    let tessellation = match options.tolerance {
        Some(tolerance) => TessellationOptions::default().with_tolerance(tolerance),
        None => TessellationOptions::for_bounds(bounds, options.target_resolution, options.multiplier),
    }
    .with_parallel(options.parallel);

    let polylines = tessellate_scene(&contours, &tessellation)?;
    if polylines.is_empty() {
        return Err(MeshError::EmptyInput { what: "contours" });
    }

    let normalized = normalize_polylines(&polylines, &options.normalize)?;
    let mesh = build_fan_mesh(&normalized, &options.mesh)?;

    log::info!(
        "laser mesh: {} contours, {} vertices, {} triangles (tolerance {:.4})",
        normalized.len(),
        mesh.num_vertices(),
        mesh.num_triangles(),
        tessellation.tolerance
    );

    Ok(mesh)
}
