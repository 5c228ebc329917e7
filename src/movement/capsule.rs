//! Movement domain: capsule resizing for crouch and slide.
//!
//! Heights change from the top: the feet stay where they are, so a resize can
//! never push the capsule through the floor. Standing back up restores the
//! captured standing geometry exactly.

use bevy::prelude::*;

use crate::movement::error::ConfigError;
use crate::movement::physics::{CharacterMotor, PhysicsQuery};
use avian3d::prelude::LayerMask;

/// Extra height over two radii that every capsule keeps.
pub const CAPSULE_HEIGHT_EPSILON: f32 = 0.01;

/// Collision capsule dimensions, relative to the body origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleGeometry {
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
    /// Tallest ledge the motor climbs without a jump.
    pub step_offset: f32,
    pub skin_width: f32,
}

impl CapsuleGeometry {
    /// A standing capsule whose feet sit at the body origin.
    pub fn standing(height: f32, radius: f32, step_offset: f32, skin_width: f32) -> Self {
        Self {
            height,
            radius,
            center: Vec3::Y * (height * 0.5),
            step_offset,
            skin_width,
        }
    }

    pub fn min_height(&self) -> f32 {
        2.0 * self.radius + CAPSULE_HEIGHT_EPSILON
    }

    /// Length of the cylinder between the two hemispheres.
    pub fn segment_length(&self) -> f32 {
        (self.height - 2.0 * self.radius).max(0.0)
    }

    /// Lowest point of the capsule in world space.
    pub fn bottom(&self, position: Vec3) -> Vec3 {
        position + self.center - Vec3::Y * (self.height * 0.5)
    }

    /// Highest point of the capsule in world space.
    pub fn top(&self, position: Vec3) -> Vec3 {
        position + self.center + Vec3::Y * (self.height * 0.5)
    }

    pub fn world_center(&self, position: Vec3) -> Vec3 {
        position + self.center
    }

    /// Same capsule at a new height with its bottom left in place.
    pub fn resized(&self, height: f32) -> Self {
        let height = height.max(self.min_height());
        let bottom = self.center - Vec3::Y * (self.height * 0.5);
        Self {
            height,
            center: bottom + Vec3::Y * (height * 0.5),
            ..*self
        }
    }
}

/// Owns the standing reference and the live capsule.
#[derive(Debug, Clone, PartialEq)]
pub struct CapsuleAdjuster {
    standing: CapsuleGeometry,
    current: CapsuleGeometry,
    crouch_height: f32,
}

impl CapsuleAdjuster {
    pub fn new(standing: CapsuleGeometry, crouch_height: f32) -> Result<Self, ConfigError> {
        if standing.radius <= 0.0 || standing.height < standing.min_height() {
            return Err(ConfigError::DegenerateCapsule {
                height: standing.height,
                radius: standing.radius,
            });
        }
        if crouch_height < standing.min_height() || crouch_height >= standing.height {
            return Err(ConfigError::CrouchHeightOutOfRange {
                crouch: crouch_height,
                min: standing.min_height(),
                standing: standing.height,
            });
        }
        Ok(Self {
            standing,
            current: standing,
            crouch_height,
        })
    }

    pub fn current(&self) -> &CapsuleGeometry {
        &self.current
    }

    pub fn standing(&self) -> &CapsuleGeometry {
        &self.standing
    }

    /// True while the capsule is at crouch height, for a crouch or a slide.
    pub fn is_shrunk(&self) -> bool {
        self.current.height < self.standing.height
    }

    /// Shrinks to crouch height or restores the standing capsule, then lets
    /// the motor settle onto the ground. Returns whether anything changed.
    ///
    /// Standing up here does not check headroom; call [`Self::can_stand`] first.
    pub fn set_crouched<M: CharacterMotor + ?Sized>(
        &mut self,
        crouched: bool,
        motor: &mut M,
        settle_distance: f32,
    ) -> bool {
        if crouched == self.is_shrunk() {
            return false;
        }
        self.current = if crouched {
            self.standing.resized(self.crouch_height)
        } else {
            self.standing
        };
        motor.settle(&self.current, settle_distance);
        true
    }

    /// Checks whether the standing capsule would fit at `position`.
    ///
    /// The candidate spans from the current feet to the standing top plus
    /// `margin`. Its radius is reduced by the skin width so resting on the
    /// floor or brushing a wall does not count as an obstruction.
    pub fn can_stand<Q: PhysicsQuery + ?Sized>(
        &self,
        position: Vec3,
        physics: &Q,
        obstacles: LayerMask,
        margin: f32,
    ) -> bool {
        if !self.is_shrunk() {
            return true;
        }
        let radius = self.current.radius;
        let probe_radius = (radius - self.current.skin_width).max(radius * 0.5);
        let feet = self.current.bottom(position);
        let bottom = feet + Vec3::Y * radius;
        let top = feet + Vec3::Y * (self.standing.height + margin - radius);
        !physics.check_capsule_overlap(bottom, top, probe_radius, obstacles)
    }
}
