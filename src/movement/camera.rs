//! Movement domain: cosmetic camera height and look rotation.

use bevy::math::StableInterpolate;
use bevy::prelude::*;

use crate::movement::resources::MovementTuning;
use crate::movement::state::LocomotionState;

/// Smoothed camera pivot height. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFeedback {
    base_height: f32,
    height: f32,
}

impl CameraFeedback {
    pub fn new(base_height: f32) -> Self {
        Self {
            base_height,
            height: base_height,
        }
    }

    /// Current local height of the camera pivot.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn target_height(&self, state: &LocomotionState, tuning: &MovementTuning) -> f32 {
        if state.is_sliding {
            self.base_height + tuning.slide_cam_y_offset
        } else if state.is_crouching {
            self.base_height + tuning.crouch_cam_y_offset
        } else {
            self.base_height
        }
    }

    /// Exponential approach toward the per-state target.
    pub fn update(&mut self, state: &LocomotionState, tuning: &MovementTuning, dt: f32) {
        let target = self.target_height(state, tuning);
        self.height.smooth_nudge(&target, tuning.cam_lerp, dt);
    }

    /// Local rotation of the pivot relative to the body.
    pub fn pivot_rotation(state: &LocomotionState) -> Quat {
        Quat::from_rotation_x(state.look_pitch.to_radians())
    }
}

/// Applies mouse look: pitch is clamped, yaw wraps to [0, 360).
pub fn apply_look(state: &mut LocomotionState, look_delta: Vec2, tuning: &MovementTuning) {
    let delta = look_delta * tuning.mouse_sensitivity;
    state.look_pitch = (state.look_pitch - delta.y).clamp(tuning.pitch_min, tuning.pitch_max);
    state.body_yaw = (state.body_yaw - delta.x).rem_euclid(360.0);
}
