//! Error type shared by the document, project and export code.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    /// The project file could not be parsed or has an unusable structure.
    #[error("Failed to load project: {0}")]
    ProjectLoad(String),

    /// An image source could not be read or decoded.
    #[error("Failed to load image {path:?}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output image could not be encoded.
    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl EditorError {
    pub fn image_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        EditorError::ImageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(e: serde_json::Error) -> Self {
        EditorError::ProjectLoad(e.to_string())
    }
}
