//! Movement domain: configuration errors that disable a controller.

use bevy::prelude::Entity;

/// A configuration problem detected at startup.
///
/// These are fatal to the controller they belong to: the controller is
/// disabled and the error is logged once. Nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The controller has no camera pivot to drive.
    MissingCameraPivot { entity: Entity },
    /// The standing capsule cannot hold its own hemispheres.
    DegenerateCapsule { height: f32, radius: f32 },
    /// Crouched height must sit between the minimum capsule and the standing height.
    CrouchHeightOutOfRange { crouch: f32, min: f32, standing: f32 },
    /// A tunable is outside the range the state machine can work with.
    InvalidTunable {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingCameraPivot { entity } => {
                write!(f, "controller {entity} has no camera pivot assigned")
            }
            ConfigError::DegenerateCapsule { height, radius } => write!(
                f,
                "capsule height {height} is too small for radius {radius}"
            ),
            ConfigError::CrouchHeightOutOfRange {
                crouch,
                min,
                standing,
            } => write!(
                f,
                "crouch height {crouch} must be within [{min}, {standing})"
            ),
            ConfigError::InvalidTunable {
                field,
                value,
                expected,
            } => write!(f, "tunable '{field}' = {value}, expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}
