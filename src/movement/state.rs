//! Movement domain: the mutable locomotion record owned by each controller.

use bevy::prelude::*;

/// Everything the state machine mutates from frame to frame.
///
/// Invariants kept by the state machine:
/// - `wall_jump_charges` stays within `[0, max_wall_jumps]` and refills on landing.
/// - `is_sliding` and `is_crouching` are never both set.
/// - `dash_time_remaining >= 0`, and `dash_velocity` is zero once it reaches zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocomotionState {
    pub vertical_velocity: f32,
    pub dash_velocity: Vec3,
    pub dash_time_remaining: f32,
    pub dash_cooldown_remaining: f32,
    pub slide_velocity: Vec3,
    pub slide_elapsed: f32,
    pub is_sliding: bool,
    pub is_crouching: bool,
    pub grounded: bool,
    pub wall_touch: bool,
    /// Unit normal of the active wall, zero when there is no contact.
    pub last_wall_normal: Vec3,
    pub wall_jump_charges: u32,
    /// Camera pitch in degrees.
    pub look_pitch: f32,
    /// Body yaw in degrees.
    pub body_yaw: f32,
    /// Side contact reported during the last move, used as a probe fallback.
    pub(crate) side_contact: Option<Vec3>,
}

impl LocomotionState {
    pub fn new(max_wall_jumps: u32) -> Self {
        Self {
            wall_jump_charges: max_wall_jumps,
            ..default()
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_time_remaining > 0.0
    }

    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.body_yaw.to_radians())
    }

    pub fn forward(&self) -> Vec3 {
        self.body_rotation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.body_rotation() * Vec3::X
    }

    pub fn set_wall_contact(&mut self, normal: Vec3) {
        self.wall_touch = true;
        self.last_wall_normal = normal.normalize_or_zero();
    }

    pub fn clear_wall_contact(&mut self) {
        self.wall_touch = false;
        self.last_wall_normal = Vec3::ZERO;
    }

    pub fn clear_dash(&mut self) {
        self.dash_velocity = Vec3::ZERO;
        self.dash_time_remaining = 0.0;
    }

    /// Starts a timed burst. A burst with no time left never carries velocity.
    pub fn start_dash(&mut self, velocity: Vec3, duration: f32) {
        if duration > 0.0 {
            self.dash_velocity = velocity;
            self.dash_time_remaining = duration;
        } else {
            self.clear_dash();
        }
    }

    /// Counts the dash and its cooldown down by `dt`, returning the dash
    /// velocity that applies this frame.
    pub fn tick_dash(&mut self, dt: f32) -> Vec3 {
        let mut applied = Vec3::ZERO;
        if self.dash_time_remaining > 0.0 {
            applied = self.dash_velocity;
            self.dash_time_remaining -= dt;
            if self.dash_time_remaining <= 0.0 {
                self.clear_dash();
            }
        }
        if self.dash_cooldown_remaining > 0.0 {
            self.dash_cooldown_remaining = (self.dash_cooldown_remaining - dt).max(0.0);
        }
        applied
    }
}

/// Moves `value` toward zero by at most `max_delta`, never overshooting.
pub(crate) fn decay_toward_zero(value: Vec3, max_delta: f32) -> Vec3 {
    let length = value.length();
    if length <= max_delta || length <= f32::EPSILON {
        Vec3::ZERO
    } else {
        value - value / length * max_delta
    }
}
