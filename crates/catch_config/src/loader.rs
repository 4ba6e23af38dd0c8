//! Reading `catch.toml` and checking its values.

use crate::error::ConfigError;
use crate::types::EngineConfig;
use std::path::Path;

/// Name of the configuration file looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "catch.toml";

const MAX_STACK_DEPTH_LIMIT: usize = 256;
const MAX_CONTEXT_LINE_RADIUS: u32 = 1000;

/// Loads and validates `catch.toml` from a directory.
pub fn load_config(dir: &Path) -> Result<EngineConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates TOML text. Keys left out take their default values.
pub fn load_config_from_str(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.max_stack_depth > MAX_STACK_DEPTH_LIMIT {
        return Err(ConfigError::ValidationError {
            field: "max_stack_depth",
            reason: format!(
                "must be at most {MAX_STACK_DEPTH_LIMIT}, got {}",
                config.max_stack_depth
            ),
        });
    }
    if config.context_line_radius > MAX_CONTEXT_LINE_RADIUS {
        return Err(ConfigError::ValidationError {
            field: "context_line_radius",
            reason: format!(
                "must be at most {MAX_CONTEXT_LINE_RADIUS}, got {}",
                config.context_line_radius
            ),
        });
    }
    if config
        .log_file_path
        .as_ref()
        .is_some_and(|p| p.as_os_str().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: "log_file_path",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
