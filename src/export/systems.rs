//! Async export and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::SetExportQualityRequest;
use crate::editor::EditorSession;
use crate::fonts::LoadedTextFont;
use crate::project::AsyncOperation;

use super::compose::{render_export, write_jpeg};
use super::messages::ExportRequest;
use super::resources::{ExportError, ExportResult, ExportTask, ExportWarnings};

/// Starts rendering and writing the export in the background
pub fn export_system(
    mut commands: Commands,
    mut events: MessageReader<ExportRequest>,
    session: Res<EditorSession>,
    font: Res<LoadedTextFont>,
    mut async_op: ResMut<AsyncOperation>,
    mut export_error: ResMut<ExportError>,
    mut quality_events: MessageWriter<SetExportQualityRequest>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Export requested while another file operation is running");
            continue;
        }

        if session.document().is_empty() {
            warn!("Refusing to export an empty canvas");
            export_error.message =
                Some("There is nothing to export: the canvas has no layers.".to_string());
            continue;
        }

        let document = session.document().clone();
        let font = font.font().cloned();
        let settings = event.settings;
        let path = event.path.clone();

        quality_events.write(SetExportQualityRequest {
            quality: settings.quality(),
        });

        async_op.is_exporting = true;
        async_op.operation_description = Some("Exporting image...".to_string());

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let rendered = render_export(&document, settings.target, font.as_ref());
            let error = write_jpeg(&rendered.image, &path, settings.quality())
                .err()
                .map(|e| format!("Failed to export {:?}: {}", path, e));
            ExportResult {
                path,
                warnings: rendered.warnings,
                error,
            }
        });

        commands.spawn(ExportTask(task));
    }
}

/// Polls export tasks and reports the outcome
pub fn poll_export_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportTask)>,
    mut async_op: ResMut<AsyncOperation>,
    mut export_error: ResMut<ExportError>,
    mut export_warnings: ResMut<ExportWarnings>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_exporting = false;
            async_op.operation_description = None;

            match result.error {
                None => {
                    info!(
                        "Exported {:?} ({} layers skipped)",
                        result.path,
                        result.warnings.len()
                    );
                    export_error.message = None;
                    if !result.warnings.is_empty() {
                        export_warnings.skipped = result.warnings;
                        export_warnings.show = true;
                    }
                }
                Some(error) => {
                    error!("{}", error);
                    export_error.message = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
