//! Fan mesh data structures and construction.
//!
//! This module turns tessellated paths into renderable triangle fans.
//!
//! # Overview
//!
//! The primary type is [`FanMesh`], a flat triangle mesh in which every
//! triangle shares the apex vertex. It is built by [`build_fan_mesh`] from a
//! batch of [`Polyline`](crate::path::Polyline)s, with UV x laid out along the
//! concatenated stroke budget ([`PathBudget`]) and UV y fixed.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`TriangleId`] - Identifies a triangle
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use svgmesh::mesh::{build_fan_mesh, FanMesh, FanMeshOptions};
//! use svgmesh::path::Polyline;
//!
//! let a = Polyline::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], false);
//! let b = Polyline::from_xy(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0), (4.0, 1.0)], false);
//!
//! let mesh: FanMesh = build_fan_mesh(&[a, b], &FanMeshOptions::default()).unwrap();
//! assert_eq!(mesh.num_vertices(), 9);
//! assert_eq!(mesh.strips()[1].uv.end, 1.0);
//! ```

mod budget;
mod builder;
mod fan;
mod gpu;
mod index;

pub use budget::{PathBudget, UvRange};
pub use builder::{build_fan_mesh, FanMeshOptions, Winding};
pub use fan::{FanMesh, Strip};
pub use gpu::GpuVertex;
pub use index::{MeshIndex, TriangleId, VertexId};
