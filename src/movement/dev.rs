//! Movement domain: debug-only test course and locomotion readout.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::movement::{
    GameLayer, Ground, KinematicBody, LocomotionController, LocomotionMessage, Player, Wall,
};

/// Seed for the pillar layout, so every run gets the same course.
const COURSE_SEED: u64 = 0x5eed;
const PILLAR_COUNT: usize = 6;

/// Underside of the crawl tunnel roof. Crouched fits, standing does not.
const TUNNEL_CEILING_Y: f32 = 1.6;

pub(crate) fn spawn_test_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.5, 0.4),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.3, 0.4),
        perceptual_roughness: 0.8,
        ..default()
    });
    let obstacle_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.4, 0.3),
        perceptual_roughness: 0.9,
        ..default()
    });

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);
    let obstacle_layers = CollisionLayers::new(GameLayer::Obstacle, [GameLayer::Player]);

    // Floor
    let floor = Vec3::new(80.0, 1.0, 80.0);
    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Cuboid::new(floor.x, floor.y, floor.z))),
        MeshMaterial3d(ground_mat.clone()),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(floor.x, floor.y, floor.z),
        ground_layers,
    ));

    // Wall-jump corridor: two parallel walls 4m apart
    for x in [-2.5, 2.5] {
        let size = Vec3::new(1.0, 12.0, 20.0);
        spawn_block(
            &mut commands,
            &mut meshes,
            wall_mat.clone(),
            size,
            Vec3::new(x - 12.0, size.y * 0.5, -10.0),
            (Wall, wall_layers),
        );
    }

    // Crawl tunnel: slide or crouch under the roof
    let roof = Vec3::new(4.0, 0.5, 8.0);
    spawn_block(
        &mut commands,
        &mut meshes,
        obstacle_mat.clone(),
        roof,
        Vec3::new(10.0, TUNNEL_CEILING_Y + roof.y * 0.5, -10.0),
        obstacle_layers,
    );
    for x in [7.75, 12.25] {
        let side = Vec3::new(0.5, TUNNEL_CEILING_Y, roof.z);
        spawn_block(
            &mut commands,
            &mut meshes,
            obstacle_mat.clone(),
            side,
            Vec3::new(x, side.y * 0.5, -10.0),
            obstacle_layers,
        );
    }

    // Cling pillars
    let mut rng = ChaCha8Rng::seed_from_u64(COURSE_SEED);
    for _ in 0..PILLAR_COUNT {
        let height = rng.random_range(4.0..10.0);
        let size = Vec3::new(1.5, height, 1.5);
        let position = Vec3::new(
            rng.random_range(-30.0..30.0),
            height * 0.5,
            rng.random_range(-35.0..-22.0),
        );
        spawn_block(
            &mut commands,
            &mut meshes,
            wall_mat.clone(),
            size,
            position,
            (Wall, wall_layers),
        );
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 14000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.7, 0.5, 0.0)),
    ));

    info!("Spawned test course with {} pillars", PILLAR_COUNT);
}

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    size: Vec3,
    position: Vec3,
    extra: impl Bundle,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        Transform::from_translation(position),
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
        extra,
    ));
}

/// Logs each transition with a snapshot of the controller.
pub(crate) fn log_locomotion_readout(
    mut messages: MessageReader<LocomotionMessage>,
    controllers: Query<(&LocomotionController, &KinematicBody), With<Player>>,
) {
    for message in messages.read() {
        let Ok((controller, body)) = controllers.get(message.entity) else {
            continue;
        };
        let state = &controller.state;
        debug!(
            "{:?}: speed={:.2}, v_y={:.2}, grounded={}, wall={}, charges={}, capsule_h={:.2}",
            message.event,
            body.velocity.with_y(0.0).length(),
            state.vertical_velocity,
            state.grounded,
            state.wall_touch,
            state.wall_jump_charges,
            controller.capsule.current().height,
        );
    }
}
