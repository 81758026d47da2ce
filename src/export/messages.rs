//! Message types for export.

use bevy::prelude::*;
use std::path::PathBuf;

use super::settings::ExportSettings;

#[derive(Message)]
pub struct ExportRequest {
    pub path: PathBuf,
    pub settings: ExportSettings,
}
