//! Range checks for movement tunables.

use crate::movement::{CAPSULE_HEIGHT_EPSILON, ConfigError, MovementTuning};

/// Helper macro for checking a tunable against a predicate
macro_rules! check_range {
    ($errors:expr, $tuning:expr, $field:ident, $valid:expr, $expected:expr) => {
        let value = $tuning.$field;
        if !$valid(value) {
            $errors.push(ConfigError::InvalidTunable {
                field: stringify!($field),
                value,
                expected: $expected,
            });
        }
    };
}

fn positive(value: f32) -> bool {
    value > 0.0
}

fn non_negative(value: f32) -> bool {
    value >= 0.0
}

/// Validate all tunables.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    check_range!(errors, tuning, gravity, |v: f32| v < 0.0, "< 0");
    check_range!(errors, tuning, jump_height, positive, "> 0");
    check_range!(errors, tuning, wall_jump_height, positive, "> 0");
    check_range!(errors, tuning, run_speed, positive, "> 0");
    check_range!(errors, tuning, crouch_speed, positive, "> 0");
    check_range!(errors, tuning, explore_speed, positive, "> 0");
    check_range!(
        errors,
        tuning,
        air_control,
        |v: f32| (0.0..=1.0).contains(&v),
        "within [0, 1]"
    );
    check_range!(
        errors,
        tuning,
        input_deadzone,
        |v: f32| (0.0..1.0).contains(&v),
        "within [0, 1)"
    );
    check_range!(errors, tuning, ground_stick_velocity, |v: f32| v < 0.0, "< 0");
    check_range!(errors, tuning, dash_speed, positive, "> 0");
    check_range!(errors, tuning, dash_time, positive, "> 0");
    check_range!(errors, tuning, dash_cooldown, non_negative, ">= 0");
    check_range!(errors, tuning, slide_min_time, non_negative, ">= 0");
    check_range!(errors, tuning, slide_carry_time, non_negative, ">= 0");
    check_range!(errors, tuning, slide_friction, non_negative, ">= 0");
    check_range!(errors, tuning, slide_end_speed_sq, non_negative, ">= 0");
    check_range!(errors, tuning, slide_speed, positive, "> 0");
    check_range!(errors, tuning, slide_start_speed, non_negative, ">= 0");
    check_range!(errors, tuning, slam_speed, positive, "> 0");
    check_range!(errors, tuning, wall_check_radius, positive, "> 0");
    check_range!(errors, tuning, wall_check_distance, positive, "> 0");
    check_range!(errors, tuning, wall_cling_fall_speed, |v: f32| v < 0.0, "< 0");
    check_range!(
        errors,
        tuning,
        wall_min_dot,
        |v: f32| (0.0..=1.0).contains(&v),
        "within [0, 1]"
    );
    check_range!(errors, tuning, wall_jump_horizontal, non_negative, ">= 0");
    check_range!(errors, tuning, wall_jump_push_time, positive, "> 0");
    check_range!(errors, tuning, capsule_radius, positive, "> 0");
    check_range!(errors, tuning, step_offset, non_negative, ">= 0");
    check_range!(errors, tuning, skin_width, non_negative, ">= 0");
    check_range!(errors, tuning, settle_distance, non_negative, ">= 0");
    check_range!(errors, tuning, stand_clearance_margin, non_negative, ">= 0");
    check_range!(errors, tuning, cam_lerp, non_negative, ">= 0");
    check_range!(errors, tuning, mouse_sensitivity, positive, "> 0");

    let min_height = 2.0 * tuning.capsule_radius + CAPSULE_HEIGHT_EPSILON;
    if tuning.standing_height < min_height {
        errors.push(ConfigError::DegenerateCapsule {
            height: tuning.standing_height,
            radius: tuning.capsule_radius,
        });
    }
    if tuning.crouch_height < min_height || tuning.crouch_height >= tuning.standing_height {
        errors.push(ConfigError::CrouchHeightOutOfRange {
            crouch: tuning.crouch_height,
            min: min_height,
            standing: tuning.standing_height,
        });
    }
    if tuning.pitch_min >= tuning.pitch_max {
        errors.push(ConfigError::InvalidTunable {
            field: "pitch_min",
            value: tuning.pitch_min,
            expected: "< pitch_max",
        });
    }

    errors
}
