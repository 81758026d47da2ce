//! Message types for project file operations.

use bevy::prelude::*;
use std::path::PathBuf;

#[derive(Message)]
pub struct SaveProjectRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct OpenProjectRequest {
    pub path: PathBuf,
}
