//! Run conditions for controlling when editor systems execute.

use bevy::prelude::*;

use crate::ui::DialogState;

use super::EditorSession;

/// Run condition: returns true when no modal dialog is open.
///
/// Use this to prevent editor input handlers from processing when
/// the user is interacting with a dialog.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}

/// Run condition: returns true while a drag, resize or rotate gesture runs.
pub fn gesture_active(session: Res<EditorSession>) -> bool {
    session.mode().is_gesture()
}
