//! Movement domain: per-frame input snapshot and button edge detection.

use bevy::prelude::*;

use crate::movement::state::LocomotionState;

/// Edge state of a single button for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEdge {
    pub down: bool,
    pub held: bool,
    pub up: bool,
}

impl KeyEdge {
    pub fn from_states(previous: bool, current: bool) -> Self {
        Self {
            down: current && !previous,
            held: current,
            up: !current && previous,
        }
    }
}

/// Raw device state before edge detection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawInput {
    pub move_axis: Vec2,
    pub look_delta: Vec2,
    pub jump: bool,
    pub crouch: bool,
    pub dash: bool,
}

/// One frame of resolved input, consumed by the state machine.
///
/// `move_axis.x` strafes right, `move_axis.y` moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    pub move_axis: Vec2,
    pub look_delta: Vec2,
    pub jump: KeyEdge,
    pub crouch: KeyEdge,
    pub dash: KeyEdge,
}

impl InputFrame {
    /// Input magnitude clamped to [0, 1].
    pub fn magnitude(&self) -> f32 {
        self.move_axis.length().min(1.0)
    }

    pub fn has_move(&self, deadzone: f32) -> bool {
        self.magnitude() > deadzone
    }

    /// Camera-relative wish direction flattened onto the ground plane.
    pub fn wish_direction(&self, state: &LocomotionState) -> Vec3 {
        let wish = state.right() * self.move_axis.x + state.forward() * self.move_axis.y;
        wish.with_y(0.0).normalize_or_zero()
    }
}

/// Derives button edges by comparing against the previous frame's states.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler {
    jump: bool,
    crouch: bool,
    dash: bool,
}

impl InputSampler {
    pub fn sample(&mut self, raw: RawInput) -> InputFrame {
        let frame = InputFrame {
            move_axis: raw.move_axis.clamp(Vec2::NEG_ONE, Vec2::ONE),
            look_delta: raw.look_delta,
            jump: KeyEdge::from_states(self.jump, raw.jump),
            crouch: KeyEdge::from_states(self.crouch, raw.crouch),
            dash: KeyEdge::from_states(self.dash, raw.dash),
        };
        self.jump = raw.jump;
        self.crouch = raw.crouch;
        self.dash = raw.dash;
        frame
    }
}
