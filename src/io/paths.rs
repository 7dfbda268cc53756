//! Path lists: plain-text files of SVG path data.
//!
//! Each non-empty line holds one SVG path-data string (the `d` attribute of
//! a `<path>` element). Lines starting with `#` are comments.
//!
//! ```text
//! # outline
//! M0,0 L100,0 L100,100 L0,100 Z
//! M25,25 C25,75 75,75 75,25
//! ```

use std::fs;
use std::path::Path;

use kurbo::BezPath;

use crate::error::{MeshError, Result};
use crate::scene::SceneNode;

/// Read a path list file into a single flat scene node.
pub fn read_path_list<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    let text = fs::read_to_string(path.as_ref())?;
    let node = parse_path_list(&text)?;
    log::debug!("read {} path(s) from {}", node.shapes.len(), path.as_ref().display());
    Ok(node)
}

/// Parse path list text into a single flat scene node.
///
/// Shapes keep the order of their lines. A line that fails to parse, or
/// parses to a path without commands, is an error naming the line.
pub fn parse_path_list(text: &str) -> Result<SceneNode> {
    let mut node = SceneNode::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let path = BezPath::from_svg(line).map_err(|e| MeshError::PathList {
            line: number + 1,
            message: e.to_string(),
        })?;
        if path.elements().is_empty() {
            return Err(MeshError::PathList {
                line: number + 1,
                message: "no path commands".to_string(),
            });
        }
        node.shapes.push(path);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_list() {
        let text = "# comment\n\nM0,0 L1,0 L1,1 Z\n   M2,2 Q3,3 4,2  \n";
        let node = parse_path_list(text).unwrap();
        assert_eq!(node.shapes.len(), 2);
        assert!(node.children.is_empty());
        assert_eq!(node.shapes[1].elements().len(), 2);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_path_list("M0,0 L1,0\n@@ not a path\n"),
            Err(MeshError::PathList { line: 2, .. })
        ));
        assert!(matches!(
            parse_path_list("# header\n\nM0,0 L1,0 Z\nM0,0 L\n"),
            Err(MeshError::PathList { line: 4, .. })
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_path_list("/nonexistent/dir/shapes.paths"),
            Err(MeshError::Io(_))
        ));
    }
}
