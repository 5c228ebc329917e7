//! Movement domain: components and physics layers for locomotion.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::capsule::CapsuleGeometry;
use crate::movement::physics::CollisionFlags;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Walkable surfaces (floors, ramps)
    Ground,
    /// Surfaces the player can cling to and wall-jump from
    Wall,
    /// Player character
    Player,
    /// Anything else that blocks movement (ceilings, props)
    Obstacle,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for the first-person camera pivot child.
#[derive(Component, Debug)]
pub struct CameraPivot;

/// Marker for the child entity carrying the player's capsule collider.
#[derive(Component, Debug)]
pub struct PlayerCollider;

/// Set on a controller whose configuration is invalid. Disabled controllers
/// are skipped by every locomotion system.
#[derive(Component, Debug)]
pub struct ControllerDisabled;

/// References a controller needs besides its own entity.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerRig {
    pub camera_pivot: Option<Entity>,
    pub collider: Option<Entity>,
}

/// Kinematic motor state carried between frames.
#[derive(Component, Debug, Default, Clone)]
pub struct KinematicBody {
    pub grounded: bool,
    pub velocity: Vec3,
    pub flags: CollisionFlags,
    /// Capsule last written to the collider child.
    pub synced_capsule: Option<CapsuleGeometry>,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
