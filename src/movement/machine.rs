//! Movement domain: the locomotion state machine.
//!
//! One call to [`LocomotionController::simulate_frame`] runs a whole frame:
//! probe contacts, evaluate transitions in a fixed order, build the frame's
//! velocity, hand the displacement to the motor once, then update the
//! cosmetic camera state.

use bevy::prelude::*;

use crate::movement::camera::{CameraFeedback, apply_look};
use crate::movement::capsule::{CapsuleAdjuster, CapsuleGeometry};
use crate::movement::error::ConfigError;
use crate::movement::events::LocomotionEvent;
use crate::movement::input::InputFrame;
use crate::movement::physics::{
    CharacterMotor, CollisionFlags, ControllerHit, PhysicsQuery, QueryLayers,
};
use crate::movement::probe::{probe, record_side_contact};
use crate::movement::resources::MovementTuning;
use crate::movement::state::{LocomotionState, decay_toward_zero};

/// What a single simulated frame produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub displacement: Vec3,
    pub flags: CollisionFlags,
    pub events: Vec<LocomotionEvent>,
}

/// Per-entity locomotion controller: state, capsule and camera feedback.
#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    pub state: LocomotionState,
    pub capsule: CapsuleAdjuster,
    pub camera: CameraFeedback,
    /// Set once the first frame has read the host's contacts.
    seeded: bool,
}

/// Inputs that stay fixed for the duration of one frame.
struct FrameContext<'a> {
    input: &'a InputFrame,
    tuning: &'a MovementTuning,
    layers: &'a QueryLayers,
    has_move: bool,
    wish_direction: Vec3,
    dt: f32,
}

impl LocomotionController {
    pub fn new(
        standing: CapsuleGeometry,
        camera_height: f32,
        tuning: &MovementTuning,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            state: LocomotionState::new(tuning.max_wall_jumps),
            capsule: CapsuleAdjuster::new(standing, tuning.crouch_height)?,
            camera: CameraFeedback::new(camera_height),
            seeded: false,
        })
    }

    pub fn simulate_frame<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        input: &InputFrame,
        tuning: &MovementTuning,
        layers: &QueryLayers,
        host: &mut H,
        dt: f32,
    ) -> FrameReport {
        let ctx = FrameContext {
            input,
            tuning,
            layers,
            has_move: input.has_move(tuning.input_deadzone),
            wish_direction: input.wish_direction(&self.state),
            dt,
        };
        let mut report = FrameReport::default();

        self.apply_probe(&ctx, &*host, &mut report);

        let horizontal_speed = host.velocity().with_y(0.0).length();
        self.try_start_slide(&ctx, horizontal_speed, host, &mut report);
        self.update_crouch(&ctx, horizontal_speed, host, &mut report);
        if input.jump.down {
            self.handle_jump(&ctx, host, &mut report);
        }
        let slammed = self.try_slam(&ctx, &mut report);
        self.try_dash(&ctx, &mut report);

        let mut horizontal = self.continue_slide(&ctx, host, &mut report);
        if !self.state.is_sliding {
            horizontal += self.upright_velocity(&ctx);
        }
        horizontal += self.state.tick_dash(dt);

        if !slammed {
            self.integrate_vertical(&ctx);
        }

        report.displacement = (horizontal + Vec3::Y * self.state.vertical_velocity) * dt;
        let capsule = *self.capsule.current();
        let state = &mut self.state;
        report.flags = host.move_by(&capsule, report.displacement, &mut |hit: &ControllerHit| {
            record_side_contact(state, hit, layers.walls, tuning.wall_min_dot);
        });

        apply_look(&mut self.state, input.look_delta, tuning);
        self.camera.update(&self.state, tuning, dt);

        report
    }

    /// Takes this frame's contacts and handles ground re-entry.
    fn apply_probe<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        host: &H,
        report: &mut FrameReport,
    ) {
        let contact = probe(
            host,
            self.capsule.current(),
            &self.state,
            ctx.tuning,
            ctx.layers.walls,
        );
        // A body spawned on the floor starts grounded rather than landing.
        if !self.seeded {
            self.seeded = true;
            self.state.grounded = host.is_grounded() || contact.grounded;
        }
        let state = &mut self.state;
        let was_grounded = state.grounded;
        state.side_contact = None;
        state.grounded = contact.grounded;
        if contact.wall_touch {
            state.set_wall_contact(contact.wall_normal);
        } else {
            state.clear_wall_contact();
        }

        if !state.grounded {
            return;
        }
        if state.vertical_velocity < 0.0 {
            state.vertical_velocity = ctx.tuning.ground_stick_velocity;
            state.wall_jump_charges = ctx.tuning.max_wall_jumps;
        }
        if !was_grounded {
            state.wall_jump_charges = ctx.tuning.max_wall_jumps;
            report.events.push(LocomotionEvent::Landed);
        }
    }

    fn try_start_slide<M: CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        horizontal_speed: f32,
        motor: &mut M,
        report: &mut FrameReport,
    ) {
        let state = &self.state;
        let allowed = ctx.tuning.advanced_moves_enabled()
            && state.grounded
            && !state.is_sliding
            && ctx.input.crouch.down
            && ctx.has_move
            && ctx.wish_direction != Vec3::ZERO
            && horizontal_speed >= ctx.tuning.slide_start_speed;
        if !allowed {
            return;
        }

        let speed = horizontal_speed.max(ctx.tuning.slide_speed);
        let state = &mut self.state;
        state.is_sliding = true;
        state.is_crouching = false;
        state.slide_elapsed = 0.0;
        state.slide_velocity = ctx.wish_direction * speed;
        state.vertical_velocity = ctx.tuning.ground_stick_velocity;
        self.capsule
            .set_crouched(true, motor, ctx.tuning.settle_distance);
        debug!("Slide started: speed={:.2}", speed);
        report.events.push(LocomotionEvent::SlideStarted { speed });
    }

    /// Static crouch entry while the key is held, and standing up once it is not.
    fn update_crouch<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        horizontal_speed: f32,
        host: &mut H,
        report: &mut FrameReport,
    ) {
        if self.state.is_sliding {
            return;
        }

        let crouch = ctx.input.crouch;
        if self.state.grounded && crouch.held {
            let slide_possible = ctx.tuning.advanced_moves_enabled()
                && horizontal_speed >= ctx.tuning.slide_start_speed;
            if !slide_possible || !ctx.has_move {
                self.enter_crouch(ctx, host, report);
            }
        }

        if self.state.is_crouching && !crouch.held {
            let stood = self.try_stand(ctx, host, report);
            if !stood && crouch.up {
                debug!("Stand blocked: no headroom");
                report.events.push(LocomotionEvent::StandBlocked);
            }
        }
    }

    fn enter_crouch<M: CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        motor: &mut M,
        report: &mut FrameReport,
    ) {
        if self.state.is_crouching {
            return;
        }
        self.state.is_crouching = true;
        self.capsule
            .set_crouched(true, motor, ctx.tuning.settle_distance);
        report.events.push(LocomotionEvent::Crouched);
    }

    /// Restores the standing capsule if there is headroom.
    fn try_stand<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        host: &mut H,
        report: &mut FrameReport,
    ) -> bool {
        let fits = self.capsule.can_stand(
            host.position(),
            &*host,
            ctx.layers.obstacles,
            ctx.tuning.stand_clearance_margin,
        );
        if !fits {
            return false;
        }
        self.state.is_crouching = false;
        if self
            .capsule
            .set_crouched(false, host, ctx.tuning.settle_distance)
        {
            report.events.push(LocomotionEvent::Stood);
        }
        true
    }

    /// Stands if possible, otherwise keeps the shrunk capsule as a crouch.
    fn stand_or_crouch<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        host: &mut H,
        report: &mut FrameReport,
    ) {
        if !self.try_stand(ctx, host, report) {
            self.state.is_crouching = true;
            report.events.push(LocomotionEvent::Crouched);
        }
    }

    /// Ends a slide early. With momentum preservation the remaining slide
    /// velocity becomes a short dash-like carry so it can flow into a jump.
    fn cancel_slide<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        host: &mut H,
        report: &mut FrameReport,
    ) {
        let state = &mut self.state;
        let carry = state.slide_velocity;
        state.is_sliding = false;
        state.slide_velocity = Vec3::ZERO;
        state.slide_elapsed = 0.0;

        if ctx.tuning.slide_preserve_momentum && carry != Vec3::ZERO {
            let velocity = if carry.length_squared() > state.dash_velocity.length_squared() {
                carry
            } else {
                state.dash_velocity
            };
            let duration = state.dash_time_remaining.max(ctx.tuning.slide_carry_time);
            state.start_dash(velocity, duration);
        }
        debug!("Slide cancelled: carry={:.2}", carry.length());
        report
            .events
            .push(LocomotionEvent::SlideEnded { cancelled: true });
        self.stand_or_crouch(ctx, host, report);
    }

    fn handle_jump<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        host: &mut H,
        report: &mut FrameReport,
    ) {
        if self.state.is_sliding && ctx.tuning.slide_cancel_on_jump {
            self.cancel_slide(ctx, host, report);
        }

        let state = &mut self.state;
        if state.grounded {
            state.vertical_velocity = ctx.tuning.jump_velocity();
            debug!("Jump: v={:.2}", state.vertical_velocity);
            report.events.push(LocomotionEvent::Jumped);
        } else if state.wall_touch && state.wall_jump_charges > 0 {
            state.wall_jump_charges -= 1;
            state.vertical_velocity = ctx.tuning.wall_jump_velocity();
            let push = wall_jump_direction(state.last_wall_normal, state.forward());
            state.start_dash(
                push * ctx.tuning.wall_jump_horizontal,
                ctx.tuning.wall_jump_push_time,
            );
            debug!(
                "Wall jump: normal={:?}, charges_left={}",
                state.last_wall_normal, state.wall_jump_charges
            );
            report.events.push(LocomotionEvent::WallJumped {
                charges_left: state.wall_jump_charges,
            });
        }
    }

    /// Returns whether the slam overrode vertical velocity this frame.
    fn try_slam(&mut self, ctx: &FrameContext, report: &mut FrameReport) -> bool {
        let state = &mut self.state;
        if state.grounded || !ctx.input.crouch.down || !ctx.tuning.advanced_moves_enabled() {
            return false;
        }
        state.vertical_velocity = -ctx.tuning.slam_speed.abs();
        debug!("Slam: v={:.2}", state.vertical_velocity);
        report.events.push(LocomotionEvent::Slammed);
        true
    }

    fn try_dash(&mut self, ctx: &FrameContext, report: &mut FrameReport) {
        let state = &mut self.state;
        let allowed = ctx.tuning.advanced_moves_enabled()
            && ctx.input.dash.down
            && state.dash_cooldown_remaining <= 0.0
            && ctx.has_move
            && ctx.wish_direction != Vec3::ZERO;
        if !allowed {
            return;
        }
        state.start_dash(ctx.wish_direction * ctx.tuning.dash_speed, ctx.tuning.dash_time);
        state.dash_cooldown_remaining = ctx.tuning.dash_cooldown;
        report.events.push(LocomotionEvent::Dashed);
    }

    /// Slide friction, natural end and early cancellation. Returns the slide
    /// velocity contributed this frame.
    fn continue_slide<H: PhysicsQuery + CharacterMotor + ?Sized>(
        &mut self,
        ctx: &FrameContext,
        host: &mut H,
        report: &mut FrameReport,
    ) -> Vec3 {
        if !self.state.is_sliding {
            return Vec3::ZERO;
        }

        // Airborne excludes sliding: leaving a ledge ends the slide with its carry.
        let released = ctx.tuning.slide_cancel_on_release && !ctx.input.crouch.held;
        if !self.state.grounded || released {
            self.cancel_slide(ctx, host, report);
            return Vec3::ZERO;
        }

        let state = &mut self.state;
        state.slide_elapsed += ctx.dt;
        state.slide_velocity =
            decay_toward_zero(state.slide_velocity, ctx.tuning.slide_friction * ctx.dt);
        let contribution = state.slide_velocity;

        let settled = state.slide_velocity.length_squared() < ctx.tuning.slide_end_speed_sq;
        if state.slide_elapsed >= ctx.tuning.slide_min_time && (settled || !ctx.has_move) {
            state.is_sliding = false;
            state.slide_velocity = Vec3::ZERO;
            state.slide_elapsed = 0.0;
            debug!("Slide ended");
            report
                .events
                .push(LocomotionEvent::SlideEnded { cancelled: false });
            if ctx.input.crouch.held {
                self.state.is_crouching = true;
                report.events.push(LocomotionEvent::Crouched);
            } else {
                self.stand_or_crouch(ctx, host, report);
            }
        }
        contribution
    }

    fn upright_velocity(&self, ctx: &FrameContext) -> Vec3 {
        if !ctx.has_move {
            return Vec3::ZERO;
        }
        let base = ctx.tuning.base_speed();
        let speed = if self.state.is_crouching {
            ctx.tuning.crouch_speed.min(base)
        } else {
            base
        };
        let control = if self.state.grounded {
            1.0
        } else {
            ctx.tuning.air_control
        };
        ctx.wish_direction * (speed * control * ctx.input.magnitude())
    }

    fn integrate_vertical(&mut self, ctx: &FrameContext) {
        let state = &mut self.state;
        if state.grounded {
            return;
        }
        if state.wall_touch && state.vertical_velocity < 0.0 {
            state.vertical_velocity = ctx.tuning.wall_cling_fall_speed;
        } else {
            state.vertical_velocity += ctx.tuning.gravity * ctx.dt;
        }
    }
}

/// Horizontal push away from a wall. Falls back to the reverse of `facing`
/// when the wall normal has no horizontal component.
pub fn wall_jump_direction(wall_normal: Vec3, facing: Vec3) -> Vec3 {
    let away = wall_normal.with_y(0.0);
    if away.length_squared() < 0.01 {
        (-facing).with_y(0.0).normalize_or_zero()
    } else {
        away.normalize()
    }
}
