//! Core domain: host glue that enables, pauses and captures input for the simulation.

mod resources;
mod systems;


pub use resources::{GameplayPaused, LookCapture, gameplay_active};
pub use systems::MENU_PAUSE_SOURCE;

use bevy::prelude::*;

use crate::core::systems::{sync_cursor_capture, toggle_pause};
use crate::movement::KeyBindings;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .init_resource::<LookCapture>()
            .init_resource::<KeyBindings>()
            .add_systems(
                Update,
                (
                    toggle_pause,
                    sync_cursor_capture.run_if(resource_changed::<LookCapture>),
                )
                    .chain(),
            );
    }
}
