//! Project save/open systems and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::{AddRecentProjectRequest, UpdateLastProjectPathRequest};
use crate::editor::{CanvasViewport, EditorSession};

use super::io::{load_project, save_project};
use super::messages::{OpenProjectRequest, SaveProjectRequest};
use super::resources::{
    AsyncOperation, CurrentProjectFile, LoadProjectTask, LoadWarnings, ProjectLoadError,
    ProjectSaveError, SaveProjectTask,
};
use super::results::{LoadResult, SaveResult};

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project")
        .to_string()
}

/// Starts an async save operation
pub fn save_project_system(
    mut commands: Commands,
    mut events: MessageReader<SaveProjectRequest>,
    session: Res<EditorSession>,
    mut async_op: ResMut<AsyncOperation>,
    mut save_error: ResMut<ProjectSaveError>,
) {
    for event in events.read() {
        // Don't start a new save if one is already in progress
        if async_op.is_busy() {
            warn!("Save requested while another file operation is running");
            continue;
        }

        if session.document().is_empty() {
            warn!("Refusing to save an empty project");
            save_error.message = Some("There is nothing to save: the canvas has no layers.".to_string());
            continue;
        }

        let document = session.document().clone();
        let path = event.path.clone();

        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Saving {}...", display_name(&path)));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match save_project(&document, &path) {
                Ok(()) => SaveResult { path, error: None },
                Err(e) => SaveResult {
                    error: Some(format!("Failed to save {:?}: {}", path, e)),
                    path,
                },
            }
        });

        commands.spawn(SaveProjectTask(task));
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveProjectTask)>,
    mut async_op: ResMut<AsyncOperation>,
    mut current_file: ResMut<CurrentProjectFile>,
    mut save_error: ResMut<ProjectSaveError>,
    mut last_path_events: MessageWriter<UpdateLastProjectPathRequest>,
    mut recent_events: MessageWriter<AddRecentProjectRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_saving = false;
            async_op.operation_description = None;

            match result.error {
                None => {
                    info!("Project saved to {:?}", result.path);
                    save_error.message = None;
                    current_file.path = Some(result.path.clone());
                    last_path_events.write(UpdateLastProjectPathRequest {
                        path: result.path.clone(),
                    });
                    recent_events.write(AddRecentProjectRequest { path: result.path });
                }
                Some(error) => {
                    error!("{}", error);
                    save_error.message = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

/// Starts an async open operation (file I/O, parsing and image materialization)
pub fn open_project_system(
    mut commands: Commands,
    mut events: MessageReader<OpenProjectRequest>,
    mut async_op: ResMut<AsyncOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Open requested while another file operation is running");
            continue;
        }

        let path = event.path.clone();
        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Opening {}...", display_name(&path)));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match load_project(&path) {
                Ok(project) => LoadResult {
                    path,
                    project: Some(project),
                    error: None,
                },
                Err(e) => LoadResult {
                    path,
                    project: None,
                    error: Some(e.to_string()),
                },
            }
        });

        commands.spawn(LoadProjectTask(task));
    }
}

/// Polls open tasks and swaps the loaded document in on success
#[allow(clippy::too_many_arguments)]
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadProjectTask)>,
    mut async_op: ResMut<AsyncOperation>,
    mut session: ResMut<EditorSession>,
    viewport: Res<CanvasViewport>,
    mut load_error: ResMut<ProjectLoadError>,
    mut load_warnings: ResMut<LoadWarnings>,
    mut current_file: ResMut<CurrentProjectFile>,
    mut last_path_events: MessageWriter<UpdateLastProjectPathRequest>,
    mut recent_events: MessageWriter<AddRecentProjectRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;
            load_error.message = None;

            // The live document is left untouched on failure
            if let Some(error) = result.error {
                error!("{}", error);
                load_error.message = Some(error);
                commands.entity(entity).despawn();
                continue;
            }

            let Some(project) = result.project else {
                commands.entity(entity).despawn();
                continue;
            };

            info!(
                "Opened {:?}: {} layers, {} skipped",
                result.path,
                project.document.len(),
                project.warnings.len()
            );

            session.replace_document(project.document);
            session.fit_to_view(viewport.size);

            if !project.warnings.is_empty() {
                load_warnings.skipped = project.warnings;
                load_warnings.show = true;
            }

            current_file.path = Some(result.path.clone());
            last_path_events.write(UpdateLastProjectPathRequest {
                path: result.path.clone(),
            });
            recent_events.write(AddRecentProjectRequest { path: result.path });

            commands.entity(entity).despawn();
        }
    }
}
