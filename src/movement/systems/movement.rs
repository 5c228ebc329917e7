//! Movement domain: runs each controller's frame against the avian world.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::events::LocomotionMessage;
use crate::movement::physics::QueryLayers;
use crate::movement::systems::collisions::{AvianHost, capsule_collider};
use crate::movement::{
    ControllerDisabled, KinematicBody, LocomotionController, MovementInput, MovementTuning,
    Player, PlayerCollider, PlayerRig,
};

pub(crate) fn simulate_controllers(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    input: Res<MovementInput>,
    spatial_query: SpatialQuery,
    collision_layers: Query<&CollisionLayers>,
    mut query: Query<
        (
            Entity,
            &mut Transform,
            &mut LocomotionController,
            &mut KinematicBody,
            &PlayerRig,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
    mut messages: MessageWriter<LocomotionMessage>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let layers = QueryLayers::default();
    let layer_of = |entity: Entity| {
        collision_layers
            .get(entity)
            .map(|layers| layers.memberships)
            .unwrap_or(LayerMask::NONE)
    };

    for (entity, mut transform, mut controller, mut body, rig) in &mut query {
        let excluded: Vec<Entity> = std::iter::once(entity).chain(rig.collider).collect();
        let report = {
            let mut host = AvianHost::new(
                &spatial_query,
                &layer_of,
                excluded,
                layers.obstacles,
                &mut *transform,
                &mut *body,
                tuning.walkable_normal_y,
                dt,
            );
            controller.simulate_frame(&input.frame, &tuning, &layers, &mut host, dt)
        };

        // Yaw is applied once the frame's movement is resolved
        transform.rotation = controller.state.body_rotation();

        for event in report.events {
            messages.write(LocomotionMessage { entity, event });
        }
    }
}

/// Keeps the collider child in step with the controller's capsule.
pub(crate) fn sync_player_collider(
    mut controllers: Query<
        (&LocomotionController, &mut KinematicBody, &PlayerRig),
        Without<ControllerDisabled>,
    >,
    mut colliders: Query<(&mut Collider, &mut Transform), With<PlayerCollider>>,
) {
    for (controller, mut body, rig) in &mut controllers {
        let capsule = *controller.capsule.current();
        if body.synced_capsule == Some(capsule) {
            continue;
        }
        let Some(collider_entity) = rig.collider else {
            continue;
        };
        let Ok((mut collider, mut transform)) = colliders.get_mut(collider_entity) else {
            continue;
        };
        *collider = capsule_collider(&capsule);
        transform.translation = capsule.center;
        body.synced_capsule = Some(capsule);
        debug!(
            "Collider resized: height={:.2}, center_y={:.2}",
            capsule.height, capsule.center.y
        );
    }
}
