//! Engine configuration: defaults, `catch.toml` loading, and the process-wide instance.
//!
//! Every pipeline stage takes an [`EngineConfig`] explicitly. The process-wide
//! instance managed by [`configure`] and [`current`] exists only for the
//! convenience entry points that have no configuration parameter.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod state;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use state::{configure, current, reset};
pub use types::EngineConfig;
