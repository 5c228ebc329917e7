//! Content domain: startup loading and validation of movement tuning.

mod loader;
mod validation;


pub use loader::{TUNING_PATH, TuningLoadError, load_tuning, parse_tuning};
pub use validation::validate_tuning;

use bevy::prelude::*;
use std::path::Path;

use crate::movement::MovementTuning;

/// Loads `assets/data/movement.ron` once while the app is built.
pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_or_default(Path::new(TUNING_PATH)));
    }
}

/// Load tuning, falling back to defaults when the file is missing or unusable.
pub fn load_or_default(path: &Path) -> MovementTuning {
    if !path.exists() {
        warn!(
            "Tuning file {} not found, using default movement tuning",
            path.display()
        );
        return MovementTuning::default();
    }

    let tuning = match load_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            error!("{}", e);
            return MovementTuning::default();
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for e in &errors {
            error!("Invalid movement tuning in {}: {}", path.display(), e);
        }
        warn!("Using default movement tuning");
        return MovementTuning::default();
    }

    info!(
        "Loaded movement tuning from {}: run_speed={}, jump_height={}, exploration_mode={}",
        path.display(),
        tuning.run_speed,
        tuning.jump_height,
        tuning.exploration_mode
    );
    tuning
}
