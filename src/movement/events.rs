//! Movement domain: locomotion transitions reported to the rest of the game.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A transition the state machine made this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionEvent {
    Landed,
    Jumped,
    WallJumped { charges_left: u32 },
    Slammed,
    Dashed,
    SlideStarted { speed: f32 },
    SlideEnded { cancelled: bool },
    Crouched,
    Stood,
    /// A stand attempt found no headroom; the capsule stays crouched.
    StandBlocked,
}

/// Message emitted for every [`LocomotionEvent`] of a controlled entity.
#[derive(Debug)]
pub struct LocomotionMessage {
    pub entity: Entity,
    pub event: LocomotionEvent,
}

impl Message for LocomotionMessage {}
