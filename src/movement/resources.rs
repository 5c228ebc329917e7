//! Movement domain: tuning, key bindings and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::input::{InputFrame, InputSampler};

/// Static locomotion tunables. Loaded once at startup, read-only during play.
///
/// Distances are in meters, speeds in meters per second, times in seconds,
/// angles in degrees. Gravity is negative (points down).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    // Upright movement
    pub run_speed: f32,
    pub crouch_speed: f32,
    pub explore_speed: f32,
    pub air_control: f32,
    pub gravity: f32,
    pub jump_height: f32,
    pub input_deadzone: f32,
    /// Vertical velocity held while grounded so the capsule keeps touching the floor.
    pub ground_stick_velocity: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,

    // Slide / crouch
    pub slide_speed: f32,
    pub slide_start_speed: f32,
    pub slide_friction: f32,
    pub slide_min_time: f32,
    /// Squared horizontal speed under which a slide ends on its own.
    pub slide_end_speed_sq: f32,
    pub slide_cancel_on_jump: bool,
    pub slide_cancel_on_release: bool,
    pub slide_preserve_momentum: bool,
    pub slide_carry_time: f32,
    pub crouch_height: f32,

    // Slam
    pub slam_speed: f32,

    // Wall cling / wall jump
    pub wall_check_radius: f32,
    pub wall_check_distance: f32,
    pub wall_cling_fall_speed: f32,
    pub max_wall_jumps: u32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_height: f32,
    pub wall_jump_push_time: f32,
    /// Largest |normal · up| a surface may have and still count as a wall.
    pub wall_min_dot: f32,

    // Capsule
    pub standing_height: f32,
    pub capsule_radius: f32,
    pub step_offset: f32,
    pub skin_width: f32,
    pub stand_clearance_margin: f32,
    pub settle_distance: f32,
    /// Smallest normal.y a contact may have to count as ground.
    pub walkable_normal_y: f32,

    // Camera
    pub camera_height: f32,
    pub slide_cam_y_offset: f32,
    pub crouch_cam_y_offset: f32,
    pub cam_lerp: f32,
    pub mouse_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,

    /// Exploration mode: no dash, slide or slam, and a slower base speed.
    pub exploration_mode: bool,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            run_speed: 16.5,
            crouch_speed: 8.0,
            explore_speed: 7.0,
            air_control: 0.6,
            gravity: -30.0,
            jump_height: 2.0,
            input_deadzone: 0.12,
            ground_stick_velocity: -2.0,
            dash_speed: 50.0,
            dash_time: 0.18,
            dash_cooldown: 0.08,
            slide_speed: 24.0,
            slide_start_speed: 4.0,
            slide_friction: 10.0,
            slide_min_time: 0.18,
            slide_end_speed_sq: 0.05,
            slide_cancel_on_jump: true,
            slide_cancel_on_release: true,
            slide_preserve_momentum: true,
            slide_carry_time: 0.12,
            crouch_height: 1.2,
            slam_speed: 100.0,
            wall_check_radius: 0.4,
            wall_check_distance: 0.6,
            wall_cling_fall_speed: -5.0,
            max_wall_jumps: 3,
            wall_jump_horizontal: 12.0,
            wall_jump_height: 2.0,
            wall_jump_push_time: 0.12,
            wall_min_dot: 0.2,
            standing_height: 2.0,
            capsule_radius: 0.5,
            step_offset: 0.3,
            skin_width: 0.02,
            stand_clearance_margin: 0.05,
            settle_distance: 0.1,
            walkable_normal_y: 0.7,
            camera_height: 1.6,
            slide_cam_y_offset: -0.45,
            crouch_cam_y_offset: -0.35,
            cam_lerp: 12.0,
            mouse_sensitivity: 0.12,
            pitch_min: -90.0,
            pitch_max: 90.0,
            exploration_mode: false,
        }
    }
}

impl MovementTuning {
    /// Launch speed that peaks exactly at `height` under this gravity: v = sqrt(2·h·|g|).
    pub fn launch_velocity(&self, height: f32) -> f32 {
        (2.0 * height * self.gravity.abs()).sqrt()
    }

    pub fn jump_velocity(&self) -> f32 {
        self.launch_velocity(self.jump_height)
    }

    pub fn wall_jump_velocity(&self) -> f32 {
        self.launch_velocity(self.wall_jump_height)
    }

    /// Apex height reached from a launch speed: h = v² / (2·|g|).
    pub fn apex_height(&self, launch_velocity: f32) -> f32 {
        launch_velocity * launch_velocity / (2.0 * self.gravity.abs())
    }

    /// Base horizontal speed before crouch and air-control scaling.
    pub fn base_speed(&self) -> f32 {
        if self.exploration_mode {
            self.explore_speed
        } else {
            self.run_speed
        }
    }

    /// Slides, dashes and slams are gated off in exploration mode.
    pub fn advanced_moves_enabled(&self) -> bool {
        !self.exploration_mode
    }
}

/// Keyboard bindings for the locomotion inputs.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub forward: [KeyCode; 2],
    pub back: [KeyCode; 2],
    pub left: [KeyCode; 2],
    pub right: [KeyCode; 2],
    pub jump: KeyCode,
    pub crouch: KeyCode,
    pub dash: KeyCode,
    pub pause: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: [KeyCode::KeyW, KeyCode::ArrowUp],
            back: [KeyCode::KeyS, KeyCode::ArrowDown],
            left: [KeyCode::KeyA, KeyCode::ArrowLeft],
            right: [KeyCode::KeyD, KeyCode::ArrowRight],
            jump: KeyCode::Space,
            crouch: KeyCode::ControlLeft,
            dash: KeyCode::ShiftLeft,
            pause: KeyCode::Escape,
        }
    }
}

/// The frame's resolved input, plus the sampler that derives button edges.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub sampler: InputSampler,
    pub frame: InputFrame,
}
