use avian3d::prelude::*;
use bevy::prelude::*;

use fps_locomotion::content::ContentPlugin;
use fps_locomotion::core::CorePlugin;
use fps_locomotion::movement::MovementPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "FPS Locomotion".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((CorePlugin, ContentPlugin, MovementPlugin))
        .run();
}
