//! Errors raised while loading a transforms document.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformsError {
    /// The transforms document does not exist.
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    /// The document exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed JSON, or a required field is missing.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The `frames` list is present but empty.
    #[error("{} contains no frames", .path.display())]
    MissingFrames { path: PathBuf },

    /// A frame's transform is not a 4x4 numeric matrix.
    #[error("frame {frame}: transform_matrix {reason}")]
    Shape { frame: usize, reason: String },
}

impl TransformsError {
    pub(crate) fn shape(frame: usize, reason: impl Into<String>) -> Self {
        Self::Shape {
            frame,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformsError>;
