//! Human-readable call-site locations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The source location a failure was reported from.
///
/// Lines and columns are 1-indexed. A column of `0` means the column is
/// unknown and is omitted from display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path of the source file, as recorded by the compiler.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed), or `0` if unknown.
    pub column: u32,
}

impl Location {
    /// Creates a new location.
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Returns the location of the caller of the function this is invoked from.
    ///
    /// Only meaningful inside `#[track_caller]` chains.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(std::panic::Location::caller())
    }

    /// Returns the final component of the file path, or the whole path if it has none.
    pub fn file_name(&self) -> String {
        base_name(&self.file)
    }
}

/// Returns the final component of `path` as a string.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

impl From<&std::panic::Location<'_>> for Location {
    fn from(loc: &std::panic::Location<'_>) -> Self {
        Self::new(loc.file(), loc.line(), loc.column())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)?;
        if self.column > 0 {
            write!(f, ":{}", self.column)?;
        }
        Ok(())
    }
}
