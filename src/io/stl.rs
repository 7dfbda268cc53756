//! STL (stereolithography) output.
//!
//! STL stores bare triangles, so texture coordinates are dropped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::error::{MeshError, Result};
use crate::mesh::{FanMesh, MeshIndex};

/// Save a mesh to a binary STL file.
///
/// # Example
///
/// ```no_run
/// use svgmesh::io::stl;
/// use svgmesh::mesh::FanMesh;
///
/// let mesh: FanMesh = FanMesh::apex_only(0.0);
/// stl::save(&mesh, "output.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &FanMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write(mesh, &mut writer).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as binary STL.
pub fn write<W: Write, I: MeshIndex>(mesh: &FanMesh<I>, writer: &mut W) -> std::io::Result<()> {
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .map(|[a, b, c]| {
            let p0 = mesh.position(a);
            let p1 = mesh.position(b);
            let p2 = mesh.position(c);

            // Degenerate triangles get a zero normal.
            let n = (p1 - p0)
                .cross(&(p2 - p0))
                .try_normalize(f64::EPSILON)
                .unwrap_or_else(Vector3::zeros);

            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    stl_io::Vertex::new([p0.x as f32, p0.y as f32, p0.z as f32]),
                    stl_io::Vertex::new([p1.x as f32, p1.y as f32, p1.z as f32]),
                    stl_io::Vertex::new([p2.x as f32, p2.y as f32, p2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(writer, triangles.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_fan_mesh, FanMeshOptions};
    use crate::path::Polyline;
    use std::io::Cursor;

    #[test]
    fn test_write_stl_roundtrips_triangles() {
        let p = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], true);
        let mesh: FanMesh = build_fan_mesh(&[p], &FanMeshOptions::default()).unwrap();

        let mut out = Vec::new();
        write(&mesh, &mut out).unwrap();
        // 80-byte header, u32 count, 50 bytes per triangle.
        assert_eq!(out.len(), 84 + 4 * 50);

        let stl = stl_io::read_stl(&mut Cursor::new(out)).unwrap();
        assert_eq!(stl.faces.len(), 4);
        assert_eq!(stl.vertices.len(), 5);
    }

    #[test]
    fn test_flat_mesh_normals_point_along_z() {
        let p = Polyline::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], true);
        let mesh: FanMesh = build_fan_mesh(&[p], &FanMeshOptions::flat()).unwrap();

        let mut out = Vec::new();
        write(&mesh, &mut out).unwrap();
        let stl = stl_io::read_stl(&mut Cursor::new(out)).unwrap();
        // The first fan triangle (apex, (0,0), (1,0)) is degenerate: apex and
        // first point coincide.
        assert_eq!(stl.faces[0].normal, stl_io::Normal::new([0.0, 0.0, 0.0]));
        assert_eq!(stl.faces[1].normal, stl_io::Normal::new([0.0, 0.0, 1.0]));
    }
}
