//! Adding context to a failure without reporting it.

use catch_source::Location;
use std::error::Error;
use thiserror::Error;

/// A failure annotated with a message, for propagation rather than reporting.
///
/// Displays as `<message>: <source>` and exposes the original failure
/// through [`Error::source`].
#[derive(Debug, Error)]
#[error("{message}: {source}")]
pub struct Wrapped {
    message: String,
    #[source]
    source: Box<dyn Error + Send + Sync + 'static>,
    location: Location,
}

impl Wrapped {
    /// The annotation added when wrapping.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the failure was wrapped.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Wraps `err` with `message`, recording the caller's location.
///
/// ```
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory");
/// let wrapped = catch::wrap(err, "loading settings.toml");
/// assert_eq!(wrapped.to_string(), "loading settings.toml: no such file or directory");
/// ```
#[track_caller]
pub fn wrap(
    err: impl Into<Box<dyn Error + Send + Sync + 'static>>,
    message: impl Into<String>,
) -> Wrapped {
    Wrapped {
        message: message.into(),
        source: err.into(),
        location: Location::caller(),
    }
}
