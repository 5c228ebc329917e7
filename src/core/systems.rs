//! Core domain: pause toggling and cursor capture.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::core::resources::{GameplayPaused, LookCapture};
use crate::movement::KeyBindings;

/// Pause source used by the pause key.
pub const MENU_PAUSE_SOURCE: &str = "menu";

/// Pause key: stops the simulation and releases the cursor, or the reverse.
pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut paused: ResMut<GameplayPaused>,
    mut look: ResMut<LookCapture>,
) {
    if !keyboard.just_pressed(bindings.pause) {
        return;
    }

    if paused.sources.contains(MENU_PAUSE_SOURCE) {
        paused.unpause(MENU_PAUSE_SOURCE);
        look.captured = true;
        info!("Gameplay resumed");
    } else {
        paused.pause(MENU_PAUSE_SOURCE);
        look.captured = false;
        info!("Gameplay paused");
    }
}

pub(crate) fn sync_cursor_capture(
    look: Res<LookCapture>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    if look.captured {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    } else {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
}
