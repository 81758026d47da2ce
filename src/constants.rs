//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1400.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Width of the right-hand side panel (also subtracted when fitting the canvas to the window)
pub const SIDE_PANEL_WIDTH: f32 = 280.0;

/// Smallest width or height a layer may have, in document units
pub const MIN_LAYER_SIZE: f32 = 20.0;

/// Side length of the square resize and rotation handles, in view units
pub const HANDLE_SIZE: f32 = 8.0;

/// Distance from the top edge of a layer to the top of its rotation handle, in view units
pub const ROTATION_HANDLE_OFFSET: f32 = 30.0;

/// Maximum number of snapshots kept in the undo history
pub const MAX_HISTORY_SIZE: usize = 50;

/// Zoom limits
pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

/// Multiplicative step for a single zoom in/out action
pub const ZOOM_STEP: f32 = 1.1;

/// Share of the viewport the canvas occupies after "fit to view"
pub const FIT_MARGIN: f32 = 0.9;

/// Arrow-key nudge distance in view units (divided by scale to get document units)
pub const NUDGE_STEP: f32 = 5.0;

/// Padding added around measured text when sizing the inline editor, in view units
pub const TEXT_EDIT_PADDING: f32 = 10.0;

/// Layer labels show at most this many characters of text content
pub const LABEL_MAX_CHARS: usize = 15;

/// Offset applied to a pasted layer so it does not cover the original
pub const PASTE_OFFSET: f32 = 20.0;

/// Position of an image added to a non-empty document
pub const IMAGE_INSERT_OFFSET: f32 = 50.0;

/// Canvas size limits for the "new canvas" dialog
pub const MIN_CANVAS_SIZE: u32 = 100;
pub const MAX_CANVAS_SIZE: u32 = 5000;

/// Default canvas size
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

/// Defaults for a freshly added text layer
pub const DEFAULT_TEXT_CONTENT: &str = "Новый текст";
pub const DEFAULT_FONT_FAMILY: &str = "Monotype Corsiva Bold";
pub const DEFAULT_FONT_SIZE: f32 = 24.0;
pub const DEFAULT_TEXT_RECT: (f32, f32, f32, f32) = (100.0, 100.0, 200.0, 100.0);

/// Default JPEG quality for export
pub const DEFAULT_EXPORT_QUALITY: u8 = 95;

/// Maximum number of recent projects to remember in config
pub const MAX_RECENT_PROJECTS: usize = 5;

/// File extension for project files
pub const PROJECT_EXTENSION: &str = "pep";
