//! Mouse and keyboard input for the canvas.
//!
//! Pointer positions are taken from the window cursor and mapped into canvas
//! view space through [`CanvasViewport`]. Input over egui panels or while a
//! modal dialog is open never reaches the session, except that releasing the
//! button always ends a running gesture.

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use crate::fonts::LoadedTextFont;
use crate::ui::DialogState;

use super::hit_test::HitTarget;
use super::params::{is_cursor_over_ui, is_typing_in_ui, CanvasPointer, CanvasViewport};
use super::session::InteractionMode;
use super::EditorSession;

/// Two presses closer than this (seconds) form a double click
const DOUBLE_CLICK_TIME: f64 = 0.4;
/// ...and must land within this many view pixels of each other
const DOUBLE_CLICK_DISTANCE: f32 = 4.0;

#[derive(Default)]
pub struct PointerTracker {
    last_position: Option<Vec2>,
    last_press: Option<(f64, Vec2)>,
}

impl PointerTracker {
    fn is_double_click(&self, now: f64, position: Vec2) -> bool {
        self.last_press.is_some_and(|(time, pos)| {
            now - time <= DOUBLE_CLICK_TIME && pos.distance(position) <= DOUBLE_CLICK_DISTANCE
        })
    }
}

fn ctrl_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight])
}

fn shift_held(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight])
}

/// Feed press, move, release and double click into the session.
#[allow(clippy::too_many_arguments)]
pub fn canvas_pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: CanvasPointer,
    dialog_state: Res<DialogState>,
    time: Res<Time>,
    font: Res<LoadedTextFont>,
    mut contexts: EguiContexts,
    mut session: ResMut<EditorSession>,
    mut tracker: Local<PointerTracker>,
) {
    let position = pointer.cursor_view_pos();
    let moved = position.is_some() && position != tracker.last_position;
    tracker.last_position = position;

    if session.mode().is_gesture() {
        if let Some(position) = position
            && moved
        {
            session.pointer_move(position);
        }
        if mouse.just_released(MouseButton::Left) {
            session.release();
        }
        return;
    }

    let Some(position) = position else {
        if session.hovered().is_some() {
            session.pointer_left();
        }
        return;
    };

    if dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts) {
        if session.hovered().is_some() {
            session.pointer_left();
        }
        return;
    }

    if moved {
        session.pointer_move(position);
    }

    if mouse.just_pressed(MouseButton::Left) {
        let now = time.elapsed_secs_f64();
        if tracker.is_double_click(now, position) {
            tracker.last_press = None;
            session.double_click(position);
            if session.editing_text().is_none() {
                session.press(position, font.metrics());
            }
        } else {
            tracker.last_press = Some((now, position));
            session.press(position, font.metrics());
        }
    }
}

/// Editing shortcuts. File shortcuts live with the file dialogs.
pub fn editor_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    font: Res<LoadedTextFont>,
    mut contexts: EguiContexts,
    mut session: ResMut<EditorSession>,
    viewport: Res<CanvasViewport>,
) {
    if keyboard.just_pressed(KeyCode::Escape) && session.editing_text().is_some() {
        session.finish_text_edit(font.metrics());
        return;
    }

    // Don't trigger if typing in UI
    if is_typing_in_ui(&mut contexts) {
        return;
    }

    if ctrl_held(&keyboard) {
        if keyboard.just_pressed(KeyCode::KeyZ) {
            if shift_held(&keyboard) {
                session.redo();
            } else {
                session.undo();
            }
        } else if keyboard.just_pressed(KeyCode::KeyY) {
            session.redo();
        } else if keyboard.just_pressed(KeyCode::KeyC) {
            session.copy_selected();
        } else if keyboard.just_pressed(KeyCode::KeyV) {
            session.paste();
        } else if keyboard.just_pressed(KeyCode::KeyT) {
            session.add_text_layer();
        } else if keyboard.just_pressed(KeyCode::ArrowUp) {
            session.move_selected_up();
        } else if keyboard.just_pressed(KeyCode::ArrowDown) {
            session.move_selected_down();
        } else if keyboard.just_pressed(KeyCode::KeyH) {
            if let Some(index) = session.selected() {
                session.toggle_visibility(index);
            }
        } else if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
            session.zoom_in();
        } else if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
            session.zoom_out();
        } else if keyboard.just_pressed(KeyCode::Digit0) {
            session.fit_to_view(viewport.size);
        }
        return;
    }

    let nudges = [
        (KeyCode::ArrowLeft, Vec2::NEG_X),
        (KeyCode::ArrowRight, Vec2::X),
        (KeyCode::ArrowUp, Vec2::NEG_Y),
        (KeyCode::ArrowDown, Vec2::Y),
    ];
    for (key, direction) in nudges {
        if keyboard.just_pressed(key) {
            session.nudge(direction);
        }
    }

    if keyboard.just_pressed(KeyCode::Delete) {
        session.delete_selected();
    } else if keyboard.just_pressed(KeyCode::KeyF) {
        session.toggle_text_edit(font.metrics());
    }
}

/// Ctrl + mouse wheel zooms the canvas.
pub fn ctrl_scroll_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut session: ResMut<EditorSession>,
) {
    if !ctrl_held(&keyboard) || is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }

    for event in scroll_events.read() {
        if event.y > 0.0 {
            session.zoom_in();
        } else if event.y < 0.0 {
            session.zoom_out();
        }
    }
}

/// Cursor icon for what the pointer would grab.
pub fn cursor_icon_for(mode: InteractionMode, target: Option<HitTarget>, over_layer: bool) -> CursorIcon {
    let icon = match mode {
        InteractionMode::Dragging { .. } => SystemCursorIcon::Move,
        InteractionMode::Resizing { handle, .. } => return handle.cursor_icon(),
        InteractionMode::Rotating { .. } => SystemCursorIcon::Grabbing,
        InteractionMode::Idle | InteractionMode::EditingText { .. } => match target {
            Some(HitTarget::Resize(handle)) => return handle.cursor_icon(),
            Some(HitTarget::RotationHandle) => SystemCursorIcon::Grab,
            Some(HitTarget::Body) => SystemCursorIcon::Move,
            None if over_layer => SystemCursorIcon::Pointer,
            None => SystemCursorIcon::Default,
        },
    };
    CursorIcon::System(icon)
}

pub fn update_cursor_icon(
    session: Res<EditorSession>,
    pointer: CanvasPointer,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI unless a gesture is running
    if !session.mode().is_gesture() && is_cursor_over_ui(&mut contexts) {
        commands
            .entity(entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    let target = pointer
        .cursor_view_pos()
        .and_then(|position| session.hover_target(position));
    let icon = cursor_icon_for(session.mode(), target, session.hovered().is_some());
    commands.entity(entity).insert(icon);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ResizeHandle;

    #[test]
    fn test_double_click_window() {
        let tracker = PointerTracker {
            last_position: None,
            last_press: Some((1.0, Vec2::new(10.0, 10.0))),
        };
        assert!(tracker.is_double_click(1.3, Vec2::new(12.0, 11.0)));
        assert!(!tracker.is_double_click(1.5, Vec2::new(10.0, 10.0)));
        assert!(!tracker.is_double_click(1.1, Vec2::new(30.0, 10.0)));
        assert!(!PointerTracker::default().is_double_click(0.0, Vec2::ZERO));
    }

    #[test]
    fn test_cursor_follows_gesture_over_hover() {
        let mode = InteractionMode::Rotating {
            index: 0,
            center: Vec2::ZERO,
        };
        assert!(matches!(
            cursor_icon_for(mode, Some(HitTarget::Body), true),
            CursorIcon::System(SystemCursorIcon::Grabbing)
        ));
    }

    #[test]
    fn test_cursor_for_hover_targets() {
        assert!(matches!(
            cursor_icon_for(
                InteractionMode::Idle,
                Some(HitTarget::Resize(ResizeHandle::LeftCenter)),
                true
            ),
            CursorIcon::System(SystemCursorIcon::EwResize)
        ));
        assert!(matches!(
            cursor_icon_for(InteractionMode::Idle, Some(HitTarget::RotationHandle), true),
            CursorIcon::System(SystemCursorIcon::Grab)
        ));
        assert!(matches!(
            cursor_icon_for(InteractionMode::Idle, None, true),
            CursorIcon::System(SystemCursorIcon::Pointer)
        ));
        assert!(matches!(
            cursor_icon_for(InteractionMode::Idle, None, false),
            CursorIcon::System(SystemCursorIcon::Default)
        ));
    }
}
