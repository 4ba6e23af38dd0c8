//! Failures while reading a `catch.toml` file.

use std::path::PathBuf;

/// A configuration file that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    IoError {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid TOML or has unknown or mistyped keys.
    #[error("invalid configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("invalid `{field}`: {reason}")]
    ValidationError {
        /// The offending key.
        field: &'static str,
        /// What is wrong with its value.
        reason: String,
    },
}
