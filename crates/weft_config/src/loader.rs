//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GenerationConfig;
use std::path::Path;

/// Loads and validates a `weft.toml` configuration from a project directory.
///
/// Reads `<project_dir>/weft.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<GenerationConfig, ConfigError> {
    let config_path = project_dir.join("weft.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `weft.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<GenerationConfig, ConfigError> {
    let config: GenerationConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are consistent.
fn validate_config(config: &GenerationConfig) -> Result<(), ConfigError> {
    if config.device.name.is_empty() {
        return Err(ConfigError::MissingField("device.name".to_string()));
    }
    if config.device.width == 0 {
        return Err(ConfigError::InvalidValue {
            field: "device.width".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }
    if config.device.height == 0 {
        return Err(ConfigError::InvalidValue {
            field: "device.height".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }
    Ok(())
}
