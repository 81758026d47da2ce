//! Export: flattening the document into a JPEG.
//!
//! ## Module Structure
//!
//! - [`settings`] - Target size presets and quality
//! - [`compose`] - Export plan, rasterization and JPEG encoding
//! - `messages` / `resources` / `systems` - Async export plumbing

pub mod compose;
mod messages;
mod resources;
pub mod settings;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use messages::ExportRequest;
pub use resources::{ExportError, ExportWarnings};
pub use settings::{ExportSettings, TargetSize};

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportError>()
            .init_resource::<ExportWarnings>()
            .add_message::<ExportRequest>()
            .add_systems(
                Update,
                (
                    systems::export_system.run_if(on_message::<ExportRequest>),
                    systems::poll_export_tasks,
                ),
            );
    }
}
