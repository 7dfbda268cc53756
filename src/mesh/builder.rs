//! Fan mesh construction.
//!
//! This module turns a batch of polylines into a single [`FanMesh`]: one
//! apex vertex at the local origin plus, per polyline, its points lifted to a
//! fixed depth and fanned from the apex.
//!
//! # UV layout
//!
//! - The apex has UV (0, 0).
//! - Every other vertex has UV y = 1.
//! - UV x runs from 0 to 1 across the whole batch. Polyline `j` gets the slice
//!   described by its [`UvRange`](super::UvRange) in the [`PathBudget`], and
//!   point `k` of it sits at `lerp(start, end, k / (len - 1))`.
//!
//! # Example
//!
//! ```
//! use svgmesh::mesh::{build_fan_mesh, FanMesh, FanMeshOptions};
//! use svgmesh::path::Polyline;
//!
//! let path = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], false);
//! let mesh: FanMesh = build_fan_mesh(&[path], &FanMeshOptions::default()).unwrap();
//!
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
//! ```

use nalgebra::{Point2, Point3};

use super::budget::PathBudget;
use super::fan::{FanMesh, Strip};
use super::index::MeshIndex;
use crate::error::{MeshError, Result};
use crate::path::Polyline;

/// Triangle orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// `(apex, k, k + 1)`: counter-clockwise for counter-clockwise paths in a
    /// y-up frame.
    #[default]
    CounterClockwise,
    /// `(apex, k + 1, k)`: the opposite orientation, for left-handed engines.
    Clockwise,
}

/// Options for [`build_fan_mesh`].
#[derive(Debug, Clone)]
pub struct FanMeshOptions {
    /// z coordinate of the apex vertex.
    pub apex_depth: f64,

    /// z coordinate given to every path vertex.
    pub depth: f64,

    /// Triangle orientation.
    pub winding: Winding,
}

impl Default for FanMeshOptions {
    fn default() -> Self {
        Self {
            apex_depth: 0.0,
            depth: 100.0,
            winding: Winding::CounterClockwise,
        }
    }
}

impl FanMeshOptions {
    /// Options producing a planar mesh at z = 0.
    pub fn flat() -> Self {
        Self {
            apex_depth: 0.0,
            depth: 0.0,
            winding: Winding::CounterClockwise,
        }
    }

    /// Set the depth of path vertices.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Set the depth of the apex.
    pub fn with_apex_depth(mut self, apex_depth: f64) -> Self {
        self.apex_depth = apex_depth;
        self
    }

    /// Set the triangle orientation.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.depth.is_finite() {
            return Err(MeshError::invalid_param("depth", self.depth, "must be finite"));
        }
        if !self.apex_depth.is_finite() {
            return Err(MeshError::invalid_param(
                "apex_depth",
                self.apex_depth,
                "must be finite",
            ));
        }
        Ok(())
    }
}

/// Build a fan mesh from a batch of polylines.
///
/// Consecutive duplicate points are collapsed first. Closed polylines get a
/// closing triangle from their last point back to their first; open polylines
/// do not. An empty batch yields a mesh holding only the apex.
///
/// # Errors
///
/// - [`MeshError::DegeneratePath`] if any polyline has fewer than two distinct points
/// - [`MeshError::NonFinite`] if any coordinate is NaN or infinite
/// - [`MeshError::IndexOverflow`] if the vertex count does not fit in `I`
/// - [`MeshError::InvalidParameter`] if a depth is not finite
pub fn build_fan_mesh<I: MeshIndex>(
    polylines: &[Polyline],
    options: &FanMeshOptions,
) -> Result<FanMesh<I>> {
    options.validate()?;

    if polylines.is_empty() {
        log::debug!("no polylines, returning apex-only mesh");
        return Ok(FanMesh::apex_only(options.apex_depth));
    }

    let cleaned: Vec<Polyline> = polylines.iter().map(Polyline::deduplicated).collect();
    for (index, polyline) in cleaned.iter().enumerate() {
        if !polyline.is_finite() {
            return Err(MeshError::NonFinite {
                what: "polyline points",
            });
        }
        if polyline.len() < 2 {
            return Err(MeshError::too_few_points(index, polyline.len()));
        }
    }

    let budget = PathBudget::new(&cleaned)?;

    let num_vertices = 1 + cleaned.iter().map(Polyline::len).sum::<usize>();
    if I::try_from_usize(num_vertices - 1).is_none() {
        return Err(MeshError::IndexOverflow {
            vertices: num_vertices,
            max: I::MAX.to_usize(),
        });
    }
    let num_triangles: usize = cleaned
        .iter()
        .map(|p| if p.is_closed() { p.len() } else { p.len() - 1 })
        .sum();

    let mut mesh = FanMesh::with_capacity(num_vertices, num_triangles * 3, cleaned.len());
    mesh.positions.push(Point3::new(0.0, 0.0, options.apex_depth));
    mesh.uvs.push(Point2::origin());

    let apex = I::from_usize(FanMesh::<I>::APEX);

    for (polyline, range) in cleaned.iter().zip(budget.ranges()) {
        let base = mesh.positions.len();
        let len = polyline.len();

        for (k, p) in polyline.points().iter().enumerate() {
            mesh.positions.push(Point3::new(p.x, p.y, options.depth));
            mesh.uvs.push(Point2::new(range.u_at(k), 1.0));
        }

        let fan_count = if polyline.is_closed() { len } else { len - 1 };
        for k in 0..fan_count {
            let a = I::from_usize(base + k);
            let b = I::from_usize(base + (k + 1) % len);
            match options.winding {
                Winding::CounterClockwise => mesh.indices.extend_from_slice(&[apex, a, b]),
                Winding::Clockwise => mesh.indices.extend_from_slice(&[apex, b, a]),
            }
        }

        mesh.strips.push(Strip {
            first_vertex: base,
            vertex_count: len,
            closed: polyline.is_closed(),
            uv: *range,
        });
    }

    log::debug!(
        "built fan mesh: {} polylines, {} strokes, {} vertices, {} triangles",
        cleaned.len(),
        budget.stroke_count(),
        mesh.num_vertices(),
        mesh.num_triangles()
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexId;

    fn open(coords: &[(f64, f64)]) -> Polyline {
        Polyline::from_xy(coords, false)
    }

    fn closed(coords: &[(f64, f64)]) -> Polyline {
        Polyline::from_xy(coords, true)
    }

    #[test]
    fn test_single_open_polyline() {
        let mesh: FanMesh =
            build_fan_mesh(&[open(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])], &FanMeshOptions::default())
                .unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);

        let u: Vec<f64> = mesh.uvs()[1..].iter().map(|uv| uv.x).collect();
        assert_eq!(u, vec![0.0, 0.5, 1.0]);
        assert!(mesh.uvs()[1..].iter().all(|uv| uv.y == 1.0));
        assert_eq!(mesh.uvs()[0], Point2::new(0.0, 0.0));

        assert_eq!(mesh.positions()[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.positions()[3], Point3::new(10.0, 10.0, 100.0));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_single_closed_polyline_wraps() {
        let mesh: FanMesh =
            build_fan_mesh(&[closed(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)])], &FanMeshOptions::flat())
                .unwrap();

        assert_eq!(mesh.num_triangles(), 3);
        let last = mesh.triangles().last().unwrap();
        assert_eq!(last, [VertexId::new(0), VertexId::new(3), VertexId::new(1)]);
    }

    #[test]
    fn test_triangle_counts_match_length() {
        let coords: Vec<(f64, f64)> = (0..7).map(|i| (i as f64, (i * i) as f64)).collect();
        let o: FanMesh = build_fan_mesh(&[open(&coords)], &FanMeshOptions::default()).unwrap();
        let c: FanMesh = build_fan_mesh(&[closed(&coords)], &FanMeshOptions::default()).unwrap();
        assert_eq!(o.num_triangles(), 6);
        assert_eq!(c.num_triangles(), 7);
    }

    #[test]
    fn test_two_polylines_share_budget() {
        let a = open(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let b = open(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0), (3.0, 1.0), (4.0, 1.0)]);
        let mesh: FanMesh = build_fan_mesh(&[a, b], &FanMeshOptions::default()).unwrap();

        assert_eq!(mesh.num_vertices(), 1 + 3 + 5);
        let strips = mesh.strips();
        assert_eq!(strips[0].uv.start, 0.0);
        assert!((strips[0].uv.end - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(strips[1].uv.start, strips[0].uv.end);
        assert_eq!(strips[1].uv.end, 1.0);

        // Vertices at the seam carry the same u.
        assert_eq!(mesh.uvs()[3].x, mesh.uvs()[4].x);
        assert_eq!(mesh.uvs()[8].x, 1.0);

        // The second fan starts at its own first vertex.
        assert_eq!(&mesh.indices()[6..9], &[0, 4, 5]);
    }

    #[test]
    fn test_vertex_count_and_partition_property() {
        let batch: Vec<Polyline> = (2..9)
            .map(|n| {
                let pts: Vec<(f64, f64)> = (0..n)
                    .map(|i| {
                        let a = i as f64 / n as f64 * std::f64::consts::TAU;
                        (a.cos() * n as f64, a.sin() * n as f64)
                    })
                    .collect();
                Polyline::from_xy(&pts, n % 2 == 0)
            })
            .collect();
        let mesh: FanMesh = build_fan_mesh(&batch, &FanMeshOptions::default()).unwrap();

        let expected: usize = 1 + batch.iter().map(Polyline::len).sum::<usize>();
        assert_eq!(mesh.num_vertices(), expected);

        let share: f64 = mesh.strips().iter().map(|s| s.uv.width()).sum();
        assert!((share - 1.0).abs() < 1e-12);
        for w in mesh.strips().windows(2) {
            assert_eq!(w[0].uv.end, w[1].uv.start);
        }
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_clockwise_winding() {
        let options = FanMeshOptions::default().with_winding(Winding::Clockwise);
        let mesh: FanMesh =
            build_fan_mesh(&[open(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])], &options).unwrap();
        assert_eq!(mesh.indices(), &[0, 2, 1, 0, 3, 2]);
    }

    #[test]
    fn test_duplicates_collapsed_before_meshing() {
        let p = closed(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let mesh: FanMesh = build_fan_mesh(&[p], &FanMeshOptions::default()).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 3);
    }

    #[test]
    fn test_degenerate_polyline_fails_fast() {
        let good = open(&[(0.0, 0.0), (1.0, 0.0)]);
        let bad = open(&[(5.0, 5.0), (5.0, 5.0)]);
        let err = build_fan_mesh::<u32>(&[good, bad], &FanMeshOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::DegeneratePath(crate::error::Degeneracy::TooFewPoints {
                index: 1,
                distinct: 1
            })
        ));
    }

    #[test]
    fn test_empty_batch_is_apex_only() {
        let mesh: FanMesh = build_fan_mesh(&[], &FanMeshOptions::default()).unwrap();
        assert_eq!(mesh.num_vertices(), 1);
        assert!(mesh.indices().is_empty());
    }

    #[test]
    fn test_non_finite_rejected() {
        let p = open(&[(0.0, 0.0), (f64::INFINITY, 1.0)]);
        assert!(matches!(
            build_fan_mesh::<u32>(&[p], &FanMeshOptions::default()),
            Err(MeshError::NonFinite { .. })
        ));

        let options = FanMeshOptions::default().with_depth(f64::NAN);
        let p = open(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            build_fan_mesh::<u32>(&[p], &options),
            Err(MeshError::InvalidParameter { name: "depth", .. })
        ));
    }

    #[test]
    fn test_index_overflow() {
        let pts: Vec<(f64, f64)> = (0..70_000).map(|i| (i as f64, 0.0)).collect();
        let p = open(&pts);
        assert!(matches!(
            build_fan_mesh::<u16>(&[p.clone()], &FanMeshOptions::default()),
            Err(MeshError::IndexOverflow { vertices: 70_001, .. })
        ));
        assert!(build_fan_mesh::<u32>(&[p], &FanMeshOptions::default()).is_ok());
    }
}
