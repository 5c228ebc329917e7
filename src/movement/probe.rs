//! Movement domain: ground and wall contact probing.

use avian3d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::capsule::CapsuleGeometry;
use crate::movement::physics::{CharacterMotor, CollisionFlags, ControllerHit, PhysicsQuery};
use crate::movement::resources::MovementTuning;
use crate::movement::state::LocomotionState;

/// Contact summary for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProbeResult {
    pub grounded: bool,
    pub wall_touch: bool,
    /// Unit wall normal, zero without a wall contact.
    pub wall_normal: Vec3,
}

/// Whether a surface is steep enough to cling to.
pub fn is_wall_normal(normal: Vec3, wall_min_dot: f32) -> bool {
    normal.dot(Vec3::Y).abs() < wall_min_dot
}

/// Sphere-casts forward, back, right and left from the capsule center and
/// returns the first qualifying wall normal in that order. Distance is not
/// compared across directions.
pub fn probe_walls<Q: PhysicsQuery + ?Sized>(
    physics: &Q,
    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    tuning: &MovementTuning,
    walls: LayerMask,
) -> Option<Vec3> {
    let directions = [forward, -forward, right, -right];
    directions
        .into_iter()
        .filter_map(|direction| Dir3::new(direction.with_y(0.0)).ok())
        .find_map(|direction| {
            let hit = physics.cast_sphere(
                origin,
                tuning.wall_check_radius,
                direction,
                tuning.wall_check_distance,
                walls,
            )?;
            is_wall_normal(hit.normal, tuning.wall_min_dot).then_some(hit.normal)
        })
}

/// Full per-frame probe: grounded comes from the motor, walls from the casts,
/// and a side contact remembered from the previous move fills in when no
/// cast qualifies.
pub fn probe<H: PhysicsQuery + CharacterMotor + ?Sized>(
    host: &H,
    capsule: &CapsuleGeometry,
    state: &LocomotionState,
    tuning: &MovementTuning,
    walls: LayerMask,
) -> ProbeResult {
    let origin = capsule.world_center(host.position());
    let wall = probe_walls(host, origin, state.forward(), state.right(), tuning, walls)
        .or(state.side_contact);

    ProbeResult {
        grounded: host.is_grounded(),
        wall_touch: wall.is_some(),
        wall_normal: wall.map(|normal| normal.normalize_or_zero()).unwrap_or(Vec3::ZERO),
    }
}

/// Side-contact callback run during the move. A qualifying wall updates
/// wall-touch immediately and is remembered for the next probe.
pub fn record_side_contact(
    state: &mut LocomotionState,
    hit: &ControllerHit,
    walls: LayerMask,
    wall_min_dot: f32,
) {
    if !hit.flags.contains(CollisionFlags::SIDES) {
        return;
    }
    if (hit.layers.0 & walls.0) == 0 {
        return;
    }
    if is_wall_normal(hit.normal, wall_min_dot) {
        state.set_wall_contact(hit.normal);
        state.side_contact = Some(state.last_wall_normal);
    }
}
