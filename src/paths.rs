//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\PostcardEditor\`
//! - macOS: `~/Library/Application Support/PostcardEditor/`
//! - Linux: `~/.config/postcard-editor/` (config), `~/.local/share/postcard-editor/` (data)

use std::path::{Path, PathBuf};

#[cfg(target_os = "linux")]
const APP_DIR_NAME: &str = "postcard-editor";
#[cfg(not(target_os = "linux"))]
const APP_DIR_NAME: &str = "PostcardEditor";

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/postcard-editor/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join(APP_DIR_NAME))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    dirs::data_dir().map(|p| p.join(APP_DIR_NAME))
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Path to the logs directory.
///
/// - Dev mode: `./logs/`
/// - Installed: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Starting directory for file pickers: the folder of the last project if known,
/// otherwise the user's pictures directory.
pub fn dialog_start_dir(last_project: Option<&Path>) -> Option<PathBuf> {
    last_project
        .and_then(|p| p.parent())
        .filter(|p| p.is_dir())
        .map(Path::to_path_buf)
        .or_else(dirs::picture_dir)
}

/// Append `extension` to `path` unless it already ends with it (case-insensitive).
pub fn with_extension_if_missing(path: PathBuf, extension: &str) -> PathBuf {
    let has_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));

    if has_extension {
        path
    } else {
        let mut os = path.into_os_string();
        os.push(".");
        os.push(extension);
        PathBuf::from(os)
    }
}

/// Ensure all required directories exist.
///
/// Called early in startup to create config and data directories.
pub fn ensure_directories() -> std::io::Result<()> {
    if is_dev_mode() {
        // In dev mode, directories are local and typically exist
        return Ok(());
    }

    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(&data)?;
        std::fs::create_dir_all(data.join("logs"))?;
    }
    Ok(())
}
