//! Fan mesh storage.
//!
//! A [`FanMesh`] is a flat triangle mesh in which every triangle shares vertex 0,
//! the apex. The remaining vertices are the points of the source polylines,
//! appended in input order; each polyline occupies one contiguous [`Strip`] of
//! vertices and one contiguous slice of the UV x range.
//!
//! Buffers are laid out the way renderers consume them: parallel position and
//! UV arrays plus a flat index array with stride 3.

use nalgebra::{Point2, Point3};

use super::budget::UvRange;
use super::index::{MeshIndex, TriangleId, VertexId};

/// The vertex range and UV range occupied by one polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strip {
    /// Index of the polyline's first vertex in the mesh.
    pub first_vertex: usize,
    /// Number of vertices the polyline contributed.
    pub vertex_count: usize,
    /// Whether a closing triangle wraps the last point back to the first.
    pub closed: bool,
    /// The slice of [0, 1] assigned to this polyline along UV x.
    pub uv: UvRange,
}

impl Strip {
    /// Number of triangles fanned from this strip.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        if self.closed {
            self.vertex_count
        } else {
            self.vertex_count.saturating_sub(1)
        }
    }

    /// Range of vertex indices.
    #[inline]
    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }
}

/// A triangle fan mesh with one shared apex vertex.
#[derive(Debug, Clone)]
pub struct FanMesh<I: MeshIndex = u32> {
    pub(crate) positions: Vec<Point3<f64>>,
    pub(crate) uvs: Vec<Point2<f64>>,
    pub(crate) indices: Vec<I>,
    pub(crate) strips: Vec<Strip>,
}

impl<I: MeshIndex> FanMesh<I> {
    /// Index of the shared apex vertex.
    pub const APEX: usize = 0;

    /// Create a mesh holding only the apex at the given depth.
    pub fn apex_only(apex_depth: f64) -> Self {
        Self {
            positions: vec![Point3::new(0.0, 0.0, apex_depth)],
            uvs: vec![Point2::origin()],
            indices: Vec::new(),
            strips: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(vertices: usize, indices: usize, strips: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            strips: Vec::with_capacity(strips),
        }
    }

    /// The apex vertex.
    #[inline]
    pub fn apex(&self) -> VertexId<I> {
        VertexId::new(Self::APEX)
    }

    /// Number of vertices, apex included.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// UV coordinates, parallel to [`positions`](Self::positions).
    #[inline]
    pub fn uvs(&self) -> &[Point2<f64>] {
        &self.uvs
    }

    /// Flat triangle index buffer (stride 3).
    #[inline]
    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    /// One strip per source polyline, in input order.
    #[inline]
    pub fn strips(&self) -> &[Strip] {
        &self.strips
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// UV coordinate of a vertex.
    #[inline]
    pub fn uv(&self, v: VertexId<I>) -> &Point2<f64> {
        &self.uvs[v.index()]
    }

    /// Vertices of a triangle.
    #[inline]
    pub fn triangle(&self, t: TriangleId<I>) -> [VertexId<I>; 3] {
        let base = t.index() * 3;
        [
            VertexId::from_raw(self.indices[base]),
            VertexId::from_raw(self.indices[base + 1]),
            VertexId::from_raw(self.indices[base + 2]),
        ]
    }

    /// Iterate over all triangle IDs.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId<I>> {
        (0..self.num_triangles()).map(TriangleId::new)
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [VertexId<I>; 3]> + '_ {
        self.triangle_ids().map(|t| self.triangle(t))
    }

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> {
        (0..self.positions.len()).map(VertexId::new)
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;

        for p in &self.positions {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }

    /// Check the buffers for internal consistency.
    ///
    /// Verifies parallel buffer lengths, index range, finite positions and
    /// UVs inside the unit square.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len();
        if self.uvs.len() != n || self.indices.len() % 3 != 0 {
            return false;
        }
        if self.indices.iter().any(|i| i.to_usize() >= n) {
            return false;
        }
        if self
            .positions
            .iter()
            .any(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return false;
        }
        self.uvs
            .iter()
            .all(|uv| (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y))
    }
}
