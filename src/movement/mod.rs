//! Movement domain: first-person locomotion.
//!
//! The state machine in [`machine`] is engine-agnostic apart from bevy math:
//! it talks to the world through [`PhysicsQuery`] and [`CharacterMotor`].
//! The systems in `systems` bind those traits to avian's spatial queries.

mod bootstrap;
mod camera;
mod capsule;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod error;
mod events;
mod input;
mod machine;
mod physics;
mod probe;
mod resources;
mod state;
mod systems;

pub use camera::{CameraFeedback, apply_look};
pub use capsule::{CAPSULE_HEIGHT_EPSILON, CapsuleAdjuster, CapsuleGeometry};
pub use components::{
    CameraPivot, ControllerDisabled, GameLayer, Ground, KinematicBody, Player, PlayerCollider,
    PlayerRig, Wall,
};
pub use error::ConfigError;
pub use events::{LocomotionEvent, LocomotionMessage};
pub use input::{InputFrame, InputSampler, KeyEdge, RawInput};
pub use machine::{FrameReport, LocomotionController, wall_jump_direction};
pub use physics::{
    CharacterMotor, CollisionFlags, ControllerHit, PhysicsQuery, QueryLayers, ShapeHit,
};
pub use probe::{ProbeResult, is_wall_normal, probe, probe_walls, record_side_contact};
pub use resources::{KeyBindings, MovementInput, MovementTuning};
pub use state::LocomotionState;

use bevy::prelude::*;

use crate::core::{GameplayPaused, LookCapture, gameplay_active};
use crate::movement::bootstrap::{spawn_player, validate_controllers};
use crate::movement::systems::{
    apply_camera_feedback, read_input, simulate_controllers, sync_player_collider,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<KeyBindings>()
            .init_resource::<MovementInput>()
            .init_resource::<GameplayPaused>()
            .init_resource::<LookCapture>()
            .add_message::<LocomotionMessage>()
            .add_systems(Startup, spawn_player)
            .add_systems(PostStartup, validate_controllers)
            .add_systems(
                Update,
                (
                    read_input,
                    simulate_controllers,
                    sync_player_collider,
                    apply_camera_feedback,
                )
                    .chain()
                    .run_if(gameplay_active),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_course)
            .add_systems(
                Update,
                dev::log_locomotion_readout.after(simulate_controllers),
            );
    }
}
