use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_EXPORT_QUALITY, MAX_RECENT_PROJECTS,
};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigData {
    /// Last opened or saved project (remembered for the file dialogs, not auto-opened)
    pub last_project_path: Option<PathBuf>,

    /// Recently used projects, most recent first
    pub recent_projects: Vec<PathBuf>,

    /// Size proposed by the "new canvas" dialog
    pub default_canvas_width: u32,
    pub default_canvas_height: u32,

    /// JPEG quality proposed by the export dialog
    pub export_quality: u8,

    /// TTF/OTF used for on-screen text, text measurement and export
    pub text_font_path: Option<PathBuf>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            last_project_path: None,
            recent_projects: Vec::new(),
            default_canvas_width: DEFAULT_CANVAS_WIDTH,
            default_canvas_height: DEFAULT_CANVAS_HEIGHT,
            export_quality: DEFAULT_EXPORT_QUALITY,
            text_font_path: None,
        }
    }
}

impl AppConfigData {
    /// Move `path` to the front of the recent list, keeping at most the configured count.
    pub fn push_recent_project(&mut self, path: &Path) {
        self.recent_projects.retain(|p| p != path);
        self.recent_projects.insert(0, path.to_path_buf());
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource for the "project file missing" notice
#[derive(Resource, Default)]
pub struct MissingProjectWarning {
    pub show: bool,
    pub path: Option<PathBuf>,
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to add a project to the recent list
#[derive(Message)]
pub struct AddRecentProjectRequest {
    pub path: PathBuf,
}

/// Message to update the last project path in config
#[derive(Message)]
pub struct UpdateLastProjectPathRequest {
    pub path: PathBuf,
}

/// Message to set (or clear) the text font file
#[derive(Message)]
pub struct SetTextFontRequest {
    pub path: Option<PathBuf>,
}

/// Message to remember the last export quality
#[derive(Message)]
pub struct SetExportQualityRequest {
    pub quality: u8,
}

/// Parse config JSON, falling back to defaults with a reason on failure.
fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &Path) -> (AppConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (AppConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.1.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (data, reset_reason) = load_config(&config.config_path);
    config.data = data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to check if the last project still exists
fn check_last_project_exists(
    mut config: ResMut<AppConfig>,
    mut warning: ResMut<MissingProjectWarning>,
) {
    if let Some(ref path) = config.data.last_project_path
        && !path.exists()
    {
        warning.show = true;
        warning.path = Some(path.clone());
        info!("Last project no longer exists: {:?}", path);
    }

    // Stale entries in the recent list are dropped quietly
    let before = config.data.recent_projects.len();
    config.data.recent_projects.retain(|p| p.exists());
    if config.data.recent_projects.len() != before {
        config.dirty = true;
    }
}

/// System to save config when requested
fn save_config_system(mut events: MessageReader<SaveConfigRequest>, mut config: ResMut<AppConfig>) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to add a project to the recent list
fn add_recent_project_system(
    mut events: MessageReader<AddRecentProjectRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.push_recent_project(&event.path);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update last project path
fn update_last_project_path_system(
    mut events: MessageReader<UpdateLastProjectPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_project_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

fn set_text_font_system(
    mut events: MessageReader<SetTextFontRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.text_font_path = event.path.clone();
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Text font set to {:?}", event.path);
    }
}

fn set_export_quality_system(
    mut events: MessageReader<SetExportQualityRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        let quality = event.quality.clamp(1, 100);
        if config.data.export_quality != quality {
            config.data.export_quality = quality;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<MissingProjectWarning>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentProjectRequest>()
            .add_message::<UpdateLastProjectPathRequest>()
            .add_message::<SetTextFontRequest>()
            .add_message::<SetExportQualityRequest>()
            .add_systems(
                Startup,
                (load_config_system, check_last_project_exists)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                    add_recent_project_system.run_if(on_message::<AddRecentProjectRequest>),
                    update_last_project_path_system
                        .run_if(on_message::<UpdateLastProjectPathRequest>),
                    set_text_font_system.run_if(on_message::<SetTextFontRequest>),
                    set_export_quality_system.run_if(on_message::<SetExportQualityRequest>),
                ),
            );
    }
}
