//! Movement domain: player spawn and startup validation.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::systems::collisions::capsule_collider;
use crate::movement::{
    CameraPivot, CapsuleGeometry, ConfigError, ControllerDisabled, GameLayer, KinematicBody,
    LocomotionController, MovementTuning, Player, PlayerCollider, PlayerRig,
};

/// Spawn position of the player's feet.
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 0.1, 8.0);

/// Spawns the player body with its camera pivot and collider children.
pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    let standing = CapsuleGeometry::standing(
        tuning.standing_height,
        tuning.capsule_radius,
        tuning.step_offset,
        tuning.skin_width,
    );

    let controller = match LocomotionController::new(standing, tuning.camera_height, &tuning) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Player controller disabled: {}", e);
            commands.spawn((
                Player,
                ControllerDisabled,
                Transform::from_translation(SPAWN_POINT),
            ));
            return;
        }
    };

    let player = commands
        .spawn((
            Player,
            controller,
            KinematicBody::default(),
            RigidBody::Kinematic,
            Transform::from_translation(SPAWN_POINT),
            Visibility::default(),
        ))
        .id();

    let camera_pivot = commands
        .spawn((
            CameraPivot,
            Camera3d::default(),
            Transform::from_xyz(0.0, tuning.camera_height, 0.0),
            ChildOf(player),
        ))
        .id();

    let collider = commands
        .spawn((
            PlayerCollider,
            capsule_collider(&standing),
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Obstacle],
            ),
            Transform::from_translation(standing.center),
            ChildOf(player),
        ))
        .id();

    commands.entity(player).insert(PlayerRig {
        camera_pivot: Some(camera_pivot),
        collider: Some(collider),
    });

    info!(
        "Spawned player at {:?}: height={}, radius={}",
        SPAWN_POINT, standing.height, standing.radius
    );
}

/// Disables controllers whose rig is missing a camera pivot.
pub(crate) fn validate_controllers(
    mut commands: Commands,
    controllers: Query<
        (Entity, Option<&PlayerRig>),
        (With<LocomotionController>, Without<ControllerDisabled>),
    >,
    pivots: Query<(), With<CameraPivot>>,
) {
    for (entity, rig) in &controllers {
        let has_pivot = rig
            .and_then(|rig| rig.camera_pivot)
            .is_some_and(|pivot| pivots.contains(pivot));
        if has_pivot {
            continue;
        }
        error!("{}", ConfigError::MissingCameraPivot { entity });
        commands.entity(entity).insert(ControllerDisabled);
    }
}
