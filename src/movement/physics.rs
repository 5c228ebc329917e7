//! Movement domain: the physics capabilities the locomotion core relies on.
//!
//! The core never talks to a physics engine directly. A host implements
//! [`PhysicsQuery`] for probes and [`CharacterMotor`] for the capsule move,
//! which keeps the state machine testable with a scripted world.

use avian3d::prelude::{LayerMask, PhysicsLayer};
use bevy::prelude::*;

use crate::movement::capsule::CapsuleGeometry;
use crate::movement::components::GameLayer;

bitflags::bitflags! {
    /// Which sides of the capsule were blocked during a move.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CollisionFlags: u8 {
        const SIDES = 1 << 0;
        const ABOVE = 1 << 1;
        const BELOW = 1 << 2;
    }
}

impl CollisionFlags {
    /// Classifies a contact by its surface normal.
    pub fn from_normal(normal: Vec3, walkable_normal_y: f32) -> Self {
        if normal.y >= walkable_normal_y {
            Self::BELOW
        } else if normal.y <= -walkable_normal_y {
            Self::ABOVE
        } else {
            Self::SIDES
        }
    }
}

/// Result of a shape cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    pub distance: f32,
    pub point: Vec3,
    /// Outward surface normal of the thing that was hit.
    pub normal: Vec3,
    pub entity: Option<Entity>,
}

/// A contact reported while the motor is moving the capsule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerHit {
    pub normal: Vec3,
    pub point: Vec3,
    pub entity: Option<Entity>,
    /// Layer memberships of the touched collider.
    pub layers: LayerMask,
    pub flags: CollisionFlags,
}

/// Synchronous geometric queries against the world.
pub trait PhysicsQuery {
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ShapeHit>;

    fn check_capsule_overlap(&self, bottom: Vec3, top: Vec3, radius: f32, mask: LayerMask)
    -> bool;
}

/// The host's capsule body.
pub trait CharacterMotor {
    /// Body origin, which sits at the capsule's feet for a standing capsule.
    fn position(&self) -> Vec3;

    /// Whether the last move ended resting on a walkable surface.
    fn is_grounded(&self) -> bool;

    /// Post-resolution velocity of the last move.
    fn velocity(&self) -> Vec3;

    /// Moves the capsule, sliding along whatever it touches. Each contact is
    /// reported to `on_hit` before the call returns.
    fn move_by(
        &mut self,
        capsule: &CapsuleGeometry,
        displacement: Vec3,
        on_hit: &mut dyn FnMut(&ControllerHit),
    ) -> CollisionFlags;

    /// Drops the capsule onto the ground if it is within `max_drop`.
    fn settle(&mut self, capsule: &CapsuleGeometry, max_drop: f32);
}

/// Layer masks the controller queries with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryLayers {
    /// Surfaces that count as walls for cling and wall-jump.
    pub walls: LayerMask,
    /// Everything that blocks the capsule, excluding the controller's own layer.
    pub obstacles: LayerMask,
}

impl Default for QueryLayers {
    fn default() -> Self {
        Self {
            walls: GameLayer::Wall.into(),
            obstacles: LayerMask(LayerMask::ALL.0 & !GameLayer::Player.to_bits()),
        }
    }
}
