//! Project files: saving and opening self-contained `.pep` documents.
//!
//! ## Module Structure
//!
//! - [`format`] - Serde types for the JSON file layout
//! - [`io`] - Document conversion, base64 image embedding, temp-file materialization
//! - [`messages`] - Save/open requests
//! - [`resources`] - Error, warning and busy-state resources
//! - [`results`] - Result types for async operations
//! - [`systems`] - Async save/open systems and task polling

pub mod format;
pub mod io;
mod messages;
mod resources;
mod results;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use messages::{OpenProjectRequest, SaveProjectRequest};
pub use resources::{
    AsyncOperation, CurrentProjectFile, LoadWarnings, ProjectLoadError, ProjectSaveError,
};

pub struct ProjectPlugin;

impl Plugin for ProjectPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AsyncOperation>()
            .init_resource::<CurrentProjectFile>()
            .init_resource::<ProjectLoadError>()
            .init_resource::<ProjectSaveError>()
            .init_resource::<LoadWarnings>()
            .add_message::<SaveProjectRequest>()
            .add_message::<OpenProjectRequest>()
            .add_systems(
                Update,
                (
                    systems::save_project_system.run_if(on_message::<SaveProjectRequest>),
                    systems::open_project_system.run_if(on_message::<OpenProjectRequest>),
                    systems::poll_save_tasks,
                    systems::poll_load_tasks,
                ),
            );
    }
}
