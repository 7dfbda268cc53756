//! # svgmesh
//!
//! Vector paths to renderable meshes and spline lookup data.
//!
//! svgmesh turns Bezier contours into triangle fan meshes whose UVs run along
//! the paths, and turns Bezier chains into arclength lookup tables that a
//! shader can sample at uniform speed.
//!
//! ## Features
//!
//! - **Fan meshes**: one shared apex, one fan per polyline, UV.x laid out over
//!   a shared stroke budget ([`mesh`])
//! - **Normalization**: centring, flipping, rescaling and duplicate removal in
//!   one shared frame ([`path`])
//! - **Arclength tables**: Bezier chain → normalized arclength → segment
//!   coordinate, with GPU texel packing ([`spline`])
//! - **Scenes**: transform trees of `kurbo` paths, flattened and tessellated
//!   in parallel ([`scene`], [`pipeline`])
//! - **File formats**: OBJ, PLY, STL meshes; CSV and raw spline maps ([`io`])
//!
//! ## Quick Start
//!
//! ```
//! use svgmesh::prelude::*;
//!
//! let a = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], false);
//! let mesh: FanMesh = build_fan_mesh(&[a], &FanMeshOptions::default()).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_triangles(), 2);
//! let u: Vec<f64> = mesh.uvs()[1..].iter().map(|uv| uv.x).collect();
//! assert_eq!(u, vec![0.0, 0.5, 1.0]);
//! ```
//!
//! ## From Path Data to Mesh
//!
//! ```
//! use svgmesh::prelude::*;
//!
//! let outline = BezPath::from_svg("M0,0 C0,40 60,40 60,0 Z").unwrap();
//! let scene = SceneNode::new().with_shape(outline);
//!
//! let mesh: FanMesh = build_laser_mesh(&scene, &PipelineOptions::default()).unwrap();
//! assert!(mesh.is_valid());
//! ```
//!
//! ## Arclength Lookup
//!
//! ```
//! use svgmesh::prelude::*;
//!
//! let path = BezPath::from_svg("M0,0 L30,0 L30,10").unwrap();
//! let splines = Spline::from_bez_path(&path);
//! let lut = ArclengthLut::build(&splines, &LutOptions::default()).unwrap();
//!
//! // The first segment covers three quarters of the length.
//! assert!((lut.segments()[1].start_fraction - 0.75).abs() < 1e-6);
//! let map = lut.spline_map();
//! assert_eq!(map.height(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;
pub mod path;
pub mod pipeline;
pub mod scene;
pub mod spline;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use svgmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Degeneracy, MeshError, Result};
    pub use crate::mesh::{
        build_fan_mesh, FanMesh, FanMeshOptions, MeshIndex, PathBudget, TriangleId, VertexId,
        Winding,
    };
    pub use crate::path::{normalize, normalize_polylines, Center, NormalizeOptions, Polyline, ScaleAxis};
    pub use crate::pipeline::{build_laser_mesh, PipelineOptions};
    pub use crate::scene::{
        flatten_scene, scene_bounds, tessellate_scene, SceneNode, TessellationOptions,
    };
    pub use crate::spline::{sketch_to_spline, ArclengthLut, Knot, LutOptions, Spline};
    pub use kurbo::{Affine, BezPath};
}

// Re-export geometry crates for convenience
pub use kurbo;
pub use nalgebra;
