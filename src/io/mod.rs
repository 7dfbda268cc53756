//! File I/O.
//!
//! This module saves fan meshes and spline maps, and reads path lists.
//!
//! # Supported Formats
//!
//! | Format | Extension | Notes |
//! |--------|-----------|-------|
//! | Wavefront OBJ | `.obj` | Positions, UVs and faces |
//! | PLY | `.ply` | ASCII, UVs as `s`/`t` vertex properties |
//! | STL | `.stl` | Binary, UVs dropped |
//!
//! Spline maps are written with [`splinemap::save_csv`] or
//! [`splinemap::save_raw`].
//!
//! # Usage
//!
//! ```no_run
//! use svgmesh::io::{read_path_list, save};
//! use svgmesh::mesh::FanMesh;
//! use svgmesh::pipeline::{build_laser_mesh, PipelineOptions};
//!
//! let scene = read_path_list("logo.paths").unwrap();
//! let mesh: FanMesh = build_laser_mesh(&scene, &PipelineOptions::default()).unwrap();
//! save(&mesh, "logo.obj").unwrap();
//! ```

pub mod obj;
pub mod paths;
pub mod ply;
pub mod splinemap;
pub mod stl;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{FanMesh, MeshIndex};

pub use paths::{parse_path_list, read_path_list};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// PLY (Stanford polygon) format.
    Ply,
    /// STL (stereolithography) format.
    Stl,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "ply" => Some(Format::Ply),
            "stl" => Some(Format::Stl),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Save a mesh to a file with automatic format detection.
///
/// The format is determined by the file extension.
///
/// # Example
///
/// ```no_run
/// use svgmesh::io::save;
/// use svgmesh::mesh::FanMesh;
///
/// let mesh: FanMesh = FanMesh::apex_only(0.0);
/// save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>, I: MeshIndex>(mesh: &FanMesh<I>, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    log::debug!("saving {} vertices as {:?} to {}", mesh.num_vertices(), format, path.display());

    match format {
        Format::Obj => obj::save(mesh, path),
        Format::Ply => ply::save(mesh, path),
        Format::Stl => stl::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/mesh.OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_path("mesh.ply"), Some(Format::Ply));
        assert_eq!(Format::from_path("mesh.stl"), Some(Format::Stl));
        assert_eq!(Format::from_path("mesh.glb"), None);
        assert_eq!(Format::from_path("mesh"), None);
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let mesh: FanMesh = FanMesh::apex_only(0.0);
        let err = save(&mesh, "mesh.fbx").unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { extension } if extension == "fbx"));
    }
}
