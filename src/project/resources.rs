//! Resource types for project and background task state.

use bevy::prelude::*;
use bevy::tasks::Task;
use std::path::PathBuf;

use super::results::{LoadResult, SaveResult};

#[derive(Resource, Default)]
pub struct ProjectLoadError {
    pub message: Option<String>,
}

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct ProjectSaveError {
    pub message: Option<String>,
}

/// Layers that were skipped while opening a project.
#[derive(Resource, Default)]
pub struct LoadWarnings {
    pub show: bool,
    pub skipped: Vec<String>,
}

/// Resource tracking async file I/O (save, open, export) for the busy modal
#[derive(Resource, Default)]
pub struct AsyncOperation {
    pub is_saving: bool,
    pub is_loading: bool,
    pub is_exporting: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading || self.is_exporting
    }
}

/// Component for save task
#[derive(Component)]
pub struct SaveProjectTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadProjectTask(pub Task<LoadResult>);

/// The project file the document was last opened from or saved to
#[derive(Resource, Default)]
pub struct CurrentProjectFile {
    pub path: Option<PathBuf>,
}
