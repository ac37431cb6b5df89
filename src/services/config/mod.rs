pub mod models;

pub use models::*;

use crate::types::errors::ConfigError;
use std::path::Path;

/// Load conversion options from a JSON file. Missing keys take their defaults.
pub fn load_options(path: &Path) -> Result<ConvertOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::OptionsRead {
        path: path.to_path_buf(),
        source,
    })?;
    let options: ConvertOptions =
        serde_json::from_str(&content).map_err(|source| ConfigError::Options {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!("Loaded conversion options from {}", path.display());
    Ok(options)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
