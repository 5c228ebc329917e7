//! Movement domain: avian-backed physics queries and the kinematic capsule motor.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::capsule::CapsuleGeometry;
use crate::movement::components::KinematicBody;
use crate::movement::physics::{
    CharacterMotor, CollisionFlags, ControllerHit, PhysicsQuery, ShapeHit,
};

// Collide-and-slide limits
const MAX_BUMPS: usize = 4;
const MIN_MOVEMENT: f32 = 0.0001;

/// Builds the avian collider matching a capsule geometry.
pub(crate) fn capsule_collider(capsule: &CapsuleGeometry) -> Collider {
    Collider::capsule(capsule.radius, capsule.segment_length())
}

/// One controller's view of the avian world for the duration of a frame.
pub(crate) struct AvianHost<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    layer_of: &'a dyn Fn(Entity) -> LayerMask,
    excluded: Vec<Entity>,
    obstacles: LayerMask,
    transform: &'a mut Transform,
    body: &'a mut KinematicBody,
    walkable_normal_y: f32,
    dt: f32,
}

impl<'a, 'w, 's> AvianHost<'a, 'w, 's> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        spatial: &'a SpatialQuery<'w, 's>,
        layer_of: &'a dyn Fn(Entity) -> LayerMask,
        excluded: Vec<Entity>,
        obstacles: LayerMask,
        transform: &'a mut Transform,
        body: &'a mut KinematicBody,
        walkable_normal_y: f32,
        dt: f32,
    ) -> Self {
        Self {
            spatial,
            layer_of,
            excluded,
            obstacles,
            transform,
            body,
            walkable_normal_y,
            dt,
        }
    }

    fn filter(&self, mask: LayerMask) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(mask).with_excluded_entities(self.excluded.iter().copied())
    }

    /// Carries a blocked horizontal move over a ledge no taller than the
    /// step offset, returning the offset to apply.
    fn step_up(
        &self,
        capsule: &CapsuleGeometry,
        collider: &Collider,
        filter: &SpatialQueryFilter,
        remaining: Vec3,
    ) -> Option<Vec3> {
        let Ok((across, length)) = Dir3::new_and_length(remaining.with_y(0.0)) else {
            return None;
        };
        let cast = |origin: Vec3, direction: Dir3, distance: f32| {
            self.spatial.cast_shape(
                collider,
                origin,
                Quat::IDENTITY,
                direction,
                &ShapeCastConfig::from_max_distance(distance),
                filter,
            )
        };

        let origin = capsule.world_center(self.transform.translation);
        let headroom = cast(origin, Dir3::Y, capsule.step_offset).map(|hit| hit.distance);
        let rise = step_rise(capsule, headroom)?;
        let raised = origin + Vec3::Y * rise;
        if cast(raised, across, length).is_some() {
            return None;
        }

        let floor = cast(raised + across * length, Dir3::NEG_Y, rise + capsule.skin_width)?;
        let drop = step_drop(capsule, rise, floor.distance, floor.normal1.y, self.walkable_normal_y)?;
        debug!("Step up: rise={:.3}", rise - drop);
        Some(Vec3::Y * (rise - drop) + across * length)
    }
}

impl PhysicsQuery for AvianHost<'_, '_, '_> {
    fn cast_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ShapeHit> {
        self.spatial
            .cast_shape(
                &Collider::sphere(radius),
                origin,
                Quat::IDENTITY,
                direction,
                &ShapeCastConfig::from_max_distance(max_distance),
                &self.filter(mask),
            )
            .map(|hit| ShapeHit {
                distance: hit.distance,
                point: hit.point1,
                normal: hit.normal1,
                entity: Some(hit.entity),
            })
    }

    fn check_capsule_overlap(&self, bottom: Vec3, top: Vec3, radius: f32, mask: LayerMask) -> bool {
        let probe = Collider::capsule(radius, bottom.distance(top));
        let center = (bottom + top) * 0.5;
        !self
            .spatial
            .shape_intersections(&probe, center, Quat::IDENTITY, &self.filter(mask))
            .is_empty()
    }
}

impl CharacterMotor for AvianHost<'_, '_, '_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    fn move_by(
        &mut self,
        capsule: &CapsuleGeometry,
        displacement: Vec3,
        on_hit: &mut dyn FnMut(&ControllerHit),
    ) -> CollisionFlags {
        let collider = capsule_collider(capsule);
        let filter = self.filter(self.obstacles);
        let start = self.transform.translation;
        let can_step = self.body.grounded && capsule.step_offset > 0.0;
        let mut flags = CollisionFlags::empty();
        let mut remaining = displacement;
        let mut planes = Vec::with_capacity(MAX_BUMPS);

        for _ in 0..MAX_BUMPS {
            if remaining.length_squared() < MIN_MOVEMENT * MIN_MOVEMENT {
                break;
            }
            let Ok((direction, length)) = Dir3::new_and_length(remaining) else {
                break;
            };

            let origin = capsule.world_center(self.transform.translation);
            let Some(hit) = self.spatial.cast_shape(
                &collider,
                origin,
                Quat::IDENTITY,
                direction,
                &ShapeCastConfig::from_max_distance(length),
                &filter,
            ) else {
                self.transform.translation += remaining;
                break;
            };

            let travel = (hit.distance - capsule.skin_width).max(0.0);
            self.transform.translation += direction * travel;

            let contact = CollisionFlags::from_normal(hit.normal1, self.walkable_normal_y);
            if contact == CollisionFlags::SIDES
                && can_step
                && let Some(climb) =
                    self.step_up(capsule, &collider, &filter, remaining - direction * travel)
            {
                self.transform.translation += climb;
                flags |= CollisionFlags::BELOW;
                break;
            }
            flags |= contact;
            on_hit(&ControllerHit {
                normal: hit.normal1,
                point: hit.point1,
                entity: Some(hit.entity),
                layers: (self.layer_of)(hit.entity),
                flags: contact,
            });

            remaining = slide_along(&mut planes, hit.normal1, remaining - direction * travel);
        }

        if self.dt > 0.0 {
            self.body.velocity = (self.transform.translation - start) / self.dt;
        }
        self.body.grounded = flags.contains(CollisionFlags::BELOW);
        self.body.flags = flags;
        flags
    }

    fn settle(&mut self, capsule: &CapsuleGeometry, max_drop: f32) {
        let origin = capsule.world_center(self.transform.translation);
        let hit = self.spatial.cast_shape(
            &capsule_collider(capsule),
            origin,
            Quat::IDENTITY,
            Dir3::NEG_Y,
            &ShapeCastConfig::from_max_distance(max_drop),
            &self.filter(self.obstacles),
        );
        if let Some(hit) = hit {
            self.transform.translation.y -= (hit.distance - capsule.skin_width).max(0.0);
        }
    }
}

/// Removes the blocked component of the remaining motion, following the
/// crease when two surfaces are touched.
pub(super) fn slide_along(planes: &mut Vec<Vec3>, normal: Vec3, remaining: Vec3) -> Vec3 {
    planes.push(normal);
    let mut result = remaining.reject_from_normalized(normal);

    if let [.., first, second] = planes.as_slice() {
        let crease = first.cross(*second);
        if crease.length_squared() > 1e-6 {
            result = result.project_onto(crease);
        }
    }
    result
}

/// Height to rise before crossing a ledge, limited by the headroom above.
pub(super) fn step_rise(capsule: &CapsuleGeometry, headroom: Option<f32>) -> Option<f32> {
    let rise = match headroom {
        Some(distance) => (distance - capsule.skin_width).clamp(0.0, capsule.step_offset),
        None => capsule.step_offset,
    };
    (rise > capsule.skin_width).then_some(rise)
}

/// Distance to settle back onto the far side of a ledge. Fails on steep
/// surfaces and on floors no higher than where the move started.
pub(super) fn step_drop(
    capsule: &CapsuleGeometry,
    rise: f32,
    floor_distance: f32,
    floor_normal_y: f32,
    walkable_normal_y: f32,
) -> Option<f32> {
    if floor_normal_y < walkable_normal_y {
        return None;
    }
    let drop = (floor_distance - capsule.skin_width).max(0.0);
    (drop < rise).then_some(drop)
}
