//! Export state resources and the task component.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

/// Result of an async export
pub struct ExportResult {
    pub path: PathBuf,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

#[derive(Component)]
pub struct ExportTask(pub Task<ExportResult>);

/// Export failure shown to the user until dismissed.
#[derive(Resource, Default)]
pub struct ExportError {
    pub message: Option<String>,
}

/// Layers that were left out of the last export.
#[derive(Resource, Default)]
pub struct ExportWarnings {
    pub show: bool,
    pub skipped: Vec<String>,
}
