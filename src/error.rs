//! Error types for svgmesh.
//!
//! This module defines all error types used throughout the library.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building meshes and lookup tables.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Nothing was supplied to an operation that needs at least one element.
    #[error("no {what} supplied")]
    EmptyInput {
        /// What was missing (e.g. "points", "curve segments").
        what: &'static str,
    },

    /// A polyline or curve chain collapsed to something that cannot be parameterized.
    #[error("degenerate path: {0}")]
    DegeneratePath(Degeneracy),

    /// The total stroke count of a batch of polylines is zero.
    #[error("stroke budget is zero: every path has fewer than two points")]
    InvalidBudget,

    /// A rescale was requested along an axis with no extent.
    #[error("cannot rescale along {axis}: the points have zero extent")]
    ZeroExtent {
        /// The axis that was measured.
        axis: &'static str,
    },

    /// An input coordinate or derived length is NaN or infinite.
    #[error("non-finite value in {what}")]
    NonFinite {
        /// Where the value was found.
        what: &'static str,
    },

    /// The mesh has more vertices than the index type can address.
    #[error("mesh has {vertices} vertices but the index type addresses at most {max}")]
    IndexOverflow {
        /// Number of vertices the mesh would contain.
        vertices: usize,
        /// Largest addressable vertex index.
        max: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of a path list holds no usable SVG path data.
    #[error("path list line {line}: {message}")]
    PathList {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// Error saving to file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

/// The ways a path can degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// A polyline has fewer than two distinct points after duplicate removal.
    TooFewPoints {
        /// Position of the polyline in its batch.
        index: usize,
        /// Number of distinct points left.
        distinct: usize,
    },
    /// Every segment of a Bezier chain has zero length.
    ZeroLength {
        /// Number of segments in the chain.
        segments: usize,
    },
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::TooFewPoints { index, distinct } => write!(
                f,
                "polyline {} has {} distinct point(s), need at least 2",
                index, distinct
            ),
            Degeneracy::ZeroLength { segments } => {
                write!(f, "all {} curve segment(s) have zero length", segments)
            }
        }
    }
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a "too few points" degeneracy error for polyline `index`.
    pub fn too_few_points(index: usize, distinct: usize) -> Self {
        MeshError::DegeneratePath(Degeneracy::TooFewPoints { index, distinct })
    }
}
