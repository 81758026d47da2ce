use bevy::prelude::*;

/// The window camera. The canvas itself is painted by egui, so the camera
/// only has to exist for egui to render into the primary window.
#[derive(Component)]
pub struct EditorCamera;

/// Backdrop around the white canvas
const BACKDROP: Color = Color::srgb(0.35, 0.35, 0.38);

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        Camera {
            clear_color: ClearColorConfig::Custom(BACKDROP),
            ..default()
        },
    ));
}
