//! Wavefront OBJ output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::mesh::{FanMesh, MeshIndex};

/// Save a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use svgmesh::io::obj;
/// use svgmesh::mesh::FanMesh;
///
/// let mesh: FanMesh = FanMesh::apex_only(0.0);
/// obj::save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &FanMesh<I>, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as OBJ text.
///
/// Every vertex has one texture coordinate with the same index, so faces use
/// `v/vt` references.
pub fn write<W: Write, I: MeshIndex>(mesh: &FanMesh<I>, writer: &mut W) -> Result<()> {
    writeln!(writer, "# svgmesh fan mesh")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.num_vertices(),
        mesh.num_triangles()
    )?;

    for v in mesh.vertex_ids() {
        let p = mesh.position(v);
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for v in mesh.vertex_ids() {
        let uv = mesh.uv(v);
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    // OBJ indices are 1-based.
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a.index() + 1, b.index() + 1, c.index() + 1);
        writeln!(writer, "f {}/{} {}/{} {}/{}", a, a, b, b, c, c)?;
    }
    Ok(())
}
