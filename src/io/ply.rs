//! PLY (Stanford polygon) output.
//!
//! Meshes are written as ASCII PLY with per-vertex texture coordinates in the
//! conventional `s`/`t` properties.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::{FanMesh, MeshIndex};

/// Save a mesh to a PLY file.
///
/// # Example
///
/// ```no_run
/// use svgmesh::io::ply;
/// use svgmesh::mesh::FanMesh;
///
/// let mesh: FanMesh = FanMesh::apex_only(0.0);
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &FanMesh<I>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as ASCII PLY.
pub fn write<W: Write, I: MeshIndex>(mesh: &FanMesh<I>, writer: &mut W) -> Result<()> {
    // Write header
    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by svgmesh")?;
    writeln!(writer, "element vertex {}", mesh.num_vertices())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property float s")?;
    writeln!(writer, "property float t")?;
    writeln!(writer, "element face {}", mesh.num_triangles())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    // Write vertices
    for v in mesh.vertex_ids() {
        let (p, uv) = (mesh.position(v), mesh.uv(v));
        writeln!(writer, "{} {} {} {} {}", p.x, p.y, p.z, uv.x, uv.y)?;
    }

    // Write faces
    for [a, b, c] in mesh.triangles() {
        writeln!(writer, "3 {} {} {}", a.index(), b.index(), c.index())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_fan_mesh, FanMeshOptions};
    use crate::path::Polyline;

    #[test]
    fn test_write_ply() {
        let p = Polyline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], true);
        let mesh: FanMesh = build_fan_mesh(&[p], &FanMeshOptions::default()).unwrap();

        let mut out = Vec::new();
        write(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.contains(&"element vertex 4"));
        assert!(lines.contains(&"element face 3"));
        let body = lines.iter().position(|l| *l == "end_header").unwrap() + 1;
        assert_eq!(lines[body], "0 0 0 0 0");
        assert_eq!(lines[body + 2], "10 0 100 0.5 1");
        // Closing triangle wraps back to the first path vertex.
        assert_eq!(lines[body + 4 + 2], "3 0 3 1");
    }
}
