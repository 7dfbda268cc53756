//! Interleaved vertex buffers for GPU upload.

use bytemuck::{Pod, Zeroable};

use super::fan::FanMesh;
use super::index::MeshIndex;

/// GPU vertex with position and UV coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl<I: MeshIndex> FanMesh<I> {
    /// Interleave positions and UVs into single-precision vertices.
    pub fn to_gpu_vertices(&self) -> Vec<GpuVertex> {
        self.positions
            .iter()
            .zip(&self.uvs)
            .map(|(p, uv)| GpuVertex {
                position: [p.x as f32, p.y as f32, p.z as f32],
                uv: [uv.x as f32, uv.y as f32],
            })
            .collect()
    }

    /// The index buffer as raw bytes, in native byte order.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_fan_mesh, FanMeshOptions};
    use crate::path::Polyline;

    #[test]
    fn test_gpu_layout() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 20);

        let p = Polyline::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)], true);
        let mesh: FanMesh<u16> = build_fan_mesh(&[p], &FanMeshOptions::default()).unwrap();

        let vertices = mesh.to_gpu_vertices();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].position, [2.0, 0.0, 100.0]);
        assert_eq!(vertices[3].uv, [1.0, 1.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 4 * 20);
        assert_eq!(mesh.index_bytes().len(), 9 * 2);
    }
}
