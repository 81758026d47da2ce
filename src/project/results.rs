//! Result types for async project operations.

use std::path::PathBuf;

use super::io::LoadedProject;

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub path: PathBuf,
    pub project: Option<LoadedProject>,
    pub error: Option<String>,
}
