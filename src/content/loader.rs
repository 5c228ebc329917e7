//! Loader for the RON movement tuning file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use crate::movement::MovementTuning;

/// Default location of the movement tuning file.
pub const TUNING_PATH: &str = "assets/data/movement.ron";

/// Error type for tuning loading failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for TuningLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. Fields left out keep their defaults.
pub fn parse_tuning(contents: &str, file_name: &str) -> Result<MovementTuning, TuningLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| TuningLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load tuning from a RON file.
pub fn load_tuning(path: &Path) -> Result<MovementTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_tuning(&contents, &file_name)
}
