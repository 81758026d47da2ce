//! File actions: native file pickers, the new-canvas and export dialogs, and
//! the file keyboard shortcuts.
//!
//! Buttons and shortcuts write a [`FileAction`]; the action either opens a
//! dialog window or starts an rfd picker on the async compute pool. The picker
//! result is polled each frame and turned into the matching request.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;

use crate::config::{AppConfig, SetTextFontRequest};
use crate::constants::{MAX_CANVAS_SIZE, MIN_CANVAS_SIZE, PROJECT_EXTENSION};
use crate::editor::EditorSession;
use crate::error::EditorError;
use crate::export::{ExportRequest, ExportSettings, TargetSize};
use crate::paths::{dialog_start_dir, with_extension_if_missing};
use crate::project::{CurrentProjectFile, OpenProjectRequest, SaveProjectRequest};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp", "gif"];
const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    NewCanvas,
    Open,
    Save,
    SaveAs,
    Export,
    AddImage,
    ChooseFont,
}

/// What a running native file picker was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDialogKind {
    OpenProject,
    SaveProject,
    AddImage,
    Export,
    TextFont,
}

impl FileDialogKind {
    fn title(&self) -> &'static str {
        match self {
            FileDialogKind::OpenProject => "Open Project",
            FileDialogKind::SaveProject => "Save Project",
            FileDialogKind::AddImage => "Add Image",
            FileDialogKind::Export => "Export Image",
            FileDialogKind::TextFont => "Choose Text Font",
        }
    }

    fn filter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            FileDialogKind::OpenProject | FileDialogKind::SaveProject => {
                ("Postcard project", &[PROJECT_EXTENSION])
            }
            FileDialogKind::AddImage => ("Images", IMAGE_EXTENSIONS),
            FileDialogKind::Export => ("JPEG image", &["jpg", "jpeg"]),
            FileDialogKind::TextFont => ("Fonts", FONT_EXTENSIONS),
        }
    }

    fn is_save(&self) -> bool {
        matches!(self, FileDialogKind::SaveProject | FileDialogKind::Export)
    }
}

pub struct PendingFileDialog {
    pub kind: FileDialogKind,
    pub task: Task<Option<PathBuf>>,
}

#[derive(Resource, Default)]
pub struct FileMenuState {
    pub show_new_canvas: bool,
    pub new_width: u32,
    pub new_height: u32,
    pub show_export: bool,
    pub export_settings: ExportSettings,
    pub pending_dialog: Option<PendingFileDialog>,
}

impl FileMenuState {
    fn open_new_canvas(&mut self, config: &AppConfig) {
        self.new_width = config.data.default_canvas_width;
        self.new_height = config.data.default_canvas_height;
        self.show_new_canvas = true;
    }

    fn open_export(&mut self, config: &AppConfig) {
        self.export_settings.set_quality(config.data.export_quality);
        self.show_export = true;
    }
}

/// An image chosen for insertion could not be decoded.
#[derive(Resource, Default)]
pub struct ImageLoadError {
    pub message: Option<String>,
}

fn spawn_file_dialog(kind: FileDialogKind, start_dir: Option<PathBuf>) -> Task<Option<PathBuf>> {
    let task_pool = AsyncComputeTaskPool::get();
    task_pool.spawn(async move {
        let (filter_name, extensions) = kind.filter();
        let mut dialog = rfd::AsyncFileDialog::new()
            .set_title(kind.title())
            .add_filter(filter_name, extensions);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        let handle = if kind.is_save() {
            dialog.save_file().await
        } else {
            dialog.pick_file().await
        };
        handle.map(|h| h.path().to_path_buf())
    })
}

/// Export paths keep a `.jpeg` extension; anything else gets `.jpg`.
pub fn export_path(path: PathBuf) -> PathBuf {
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpeg"));
    if is_jpeg {
        path
    } else {
        with_extension_if_missing(path, "jpg")
    }
}

/// Decode an image to learn its size, so broken files never become layers.
pub fn probe_image(path: &Path) -> Result<(u32, u32), EditorError> {
    let decoded = image::open(path).map_err(|e| EditorError::image_load(path, e))?;
    Ok((decoded.width(), decoded.height()))
}

/// Turns file actions into dialogs or native pickers
pub fn handle_file_actions(
    mut events: MessageReader<FileAction>,
    mut menu_state: ResMut<FileMenuState>,
    config: Res<AppConfig>,
    current_file: Res<CurrentProjectFile>,
    mut save_events: MessageWriter<SaveProjectRequest>,
) {
    for action in events.read() {
        let kind = match action {
            FileAction::NewCanvas => {
                menu_state.open_new_canvas(&config);
                continue;
            }
            FileAction::Export => {
                menu_state.open_export(&config);
                continue;
            }
            FileAction::Save => {
                if let Some(path) = current_file.path.clone() {
                    save_events.write(SaveProjectRequest { path });
                    continue;
                }
                FileDialogKind::SaveProject
            }
            FileAction::Open => FileDialogKind::OpenProject,
            FileAction::SaveAs => FileDialogKind::SaveProject,
            FileAction::AddImage => FileDialogKind::AddImage,
            FileAction::ChooseFont => FileDialogKind::TextFont,
        };

        if menu_state.pending_dialog.is_some() {
            debug!("File picker already open, ignoring {:?}", action);
            continue;
        }
        let start_dir = dialog_start_dir(config.data.last_project_path.as_deref());
        menu_state.pending_dialog = Some(PendingFileDialog {
            kind,
            task: spawn_file_dialog(kind, start_dir),
        });
    }
}

/// Polls the native file picker and dispatches its result
#[allow(clippy::too_many_arguments)]
pub fn poll_file_dialogs(
    mut menu_state: ResMut<FileMenuState>,
    mut session: ResMut<EditorSession>,
    mut image_error: ResMut<ImageLoadError>,
    mut open_events: MessageWriter<OpenProjectRequest>,
    mut save_events: MessageWriter<SaveProjectRequest>,
    mut export_events: MessageWriter<ExportRequest>,
    mut font_events: MessageWriter<SetTextFontRequest>,
) {
    let Some(pending) = menu_state.pending_dialog.as_mut() else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(&mut pending.task)) else {
        return;
    };
    let kind = pending.kind;
    menu_state.pending_dialog = None;

    let Some(path) = result else {
        debug!("{} cancelled", kind.title());
        return;
    };

    match kind {
        FileDialogKind::OpenProject => {
            open_events.write(OpenProjectRequest { path });
        }
        FileDialogKind::SaveProject => {
            save_events.write(SaveProjectRequest {
                path: with_extension_if_missing(path, PROJECT_EXTENSION),
            });
        }
        FileDialogKind::Export => {
            export_events.write(ExportRequest {
                path: export_path(path),
                settings: menu_state.export_settings,
            });
        }
        FileDialogKind::AddImage => match probe_image(&path) {
            Ok(size) => {
                info!("Adding image {:?} ({}x{})", path, size.0, size.1);
                session.insert_image(path, size);
            }
            Err(e) => {
                error!("{}", e);
                image_error.message = Some(e.to_string());
            }
        },
        FileDialogKind::TextFont => {
            font_events.write(SetTextFontRequest { path: Some(path) });
        }
    }
}

/// Ctrl+N/O/S/E/I file shortcuts. Ctrl+Shift+S saves under a new name.
pub fn handle_file_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut actions: MessageWriter<FileAction>,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    if !ctrl {
        return;
    }
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if keyboard.just_pressed(KeyCode::KeyN) {
        actions.write(FileAction::NewCanvas);
    } else if keyboard.just_pressed(KeyCode::KeyO) {
        actions.write(FileAction::Open);
    } else if keyboard.just_pressed(KeyCode::KeyS) {
        actions.write(if shift { FileAction::SaveAs } else { FileAction::Save });
    } else if keyboard.just_pressed(KeyCode::KeyE) {
        actions.write(FileAction::Export);
    } else if keyboard.just_pressed(KeyCode::KeyI) {
        actions.write(FileAction::AddImage);
    }
}

/// Renders the new canvas and export dialogs
pub fn file_menu_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut session: ResMut<EditorSession>,
    mut current_file: ResMut<CurrentProjectFile>,
    config: Res<AppConfig>,
) -> Result {
    if menu_state.show_new_canvas {
        let mut create = false;
        let mut cancel = false;
        egui::Window::new("New Canvas")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                ui.label("Create a new canvas? Unsaved changes will be lost.");
                ui.add_space(8.0);
                egui::Grid::new("new_canvas_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Width:");
                        ui.add(
                            egui::DragValue::new(&mut menu_state.new_width)
                                .range(MIN_CANVAS_SIZE..=MAX_CANVAS_SIZE)
                                .suffix(" px"),
                        );
                        ui.end_row();
                        ui.label("Height:");
                        ui.add(
                            egui::DragValue::new(&mut menu_state.new_height)
                                .range(MIN_CANVAS_SIZE..=MAX_CANVAS_SIZE)
                                .suffix(" px"),
                        );
                        ui.end_row();
                    });
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    create = ui.button("Create").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if create {
            session.new_canvas(menu_state.new_width, menu_state.new_height);
            current_file.path = None;
            menu_state.show_new_canvas = false;
        } else if cancel {
            menu_state.show_new_canvas = false;
        }
    }

    if menu_state.show_export {
        let mut export = false;
        let mut cancel = false;
        let canvas = session.document().canvas_size;
        egui::Window::new("Export Image")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                let settings = &mut menu_state.export_settings;
                egui::Grid::new("export_grid")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Size:");
                        egui::ComboBox::from_id_salt("export_size")
                            .selected_text(settings.target.label())
                            .show_ui(ui, |ui| {
                                for target in TargetSize::ALL {
                                    ui.selectable_value(&mut settings.target, target, target.label());
                                }
                            });
                        ui.end_row();

                        ui.label("Quality:");
                        let mut quality = settings.quality();
                        if ui.add(egui::Slider::new(&mut quality, 1..=100)).changed() {
                            settings.set_quality(quality);
                        }
                        ui.end_row();
                    });

                let (width, height) = settings.target.resolve(canvas);
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("Output: {} x {} px", width, height)).weak());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    export = ui.button("Export...").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if export && menu_state.pending_dialog.is_none() {
            let start_dir = dialog_start_dir(config.data.last_project_path.as_deref());
            menu_state.pending_dialog = Some(PendingFileDialog {
                kind: FileDialogKind::Export,
                task: spawn_file_dialog(FileDialogKind::Export, start_dir),
            });
            menu_state.show_export = false;
        } else if cancel {
            menu_state.show_export = false;
        }
    }

    Ok(())
}
