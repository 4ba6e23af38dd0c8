//! Classification codes with category prefixes for stable failure identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The broad family a failure message was classified into.
///
/// Each category maps to the prefix used in code display (e.g. `FS001`,
/// `NET002`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// File-system failures, prefixed with `FS`.
    Filesystem,
    /// Network failures, prefixed with `NET`.
    Network,
    /// Data and format failures, prefixed with `DATA`.
    Data,
    /// Programming-logic failures, prefixed with `LOGIC`.
    Logic,
    /// Anything unrecognised, prefixed with `GEN`.
    Generic,
}

impl Category {
    /// Returns the prefix for this category.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Filesystem => "FS",
            Category::Network => "NET",
            Category::Data => "DATA",
            Category::Logic => "LOGIC",
            Category::Generic => "GEN",
        }
    }
}

/// A classification code combining a category prefix and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ClassificationCode {
    /// The category of this code.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl ClassificationCode {
    /// Creates a new classification code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// `FS001`: a file or directory does not exist.
    pub const MISSING_FILE: Self = Self::new(Category::Filesystem, 1);
    /// `FS002`: insufficient permissions.
    pub const PERMISSION_DENIED: Self = Self::new(Category::Filesystem, 2);
    /// `FS003`: the target already exists.
    pub const ALREADY_EXISTS: Self = Self::new(Category::Filesystem, 3);
    /// `FS004`: a directory was given where a file was expected.
    pub const IS_A_DIRECTORY: Self = Self::new(Category::Filesystem, 4);
    /// `FS005`: a file was given where a directory was expected.
    pub const NOT_A_DIRECTORY: Self = Self::new(Category::Filesystem, 5);
    /// `NET001`: the remote end refused the connection.
    pub const CONNECTION_REFUSED: Self = Self::new(Category::Network, 1);
    /// `NET002`: an operation timed out.
    pub const TIMEOUT: Self = Self::new(Category::Network, 2);
    /// `NET003`: name resolution failed.
    pub const HOST_NOT_FOUND: Self = Self::new(Category::Network, 3);
    /// `NET004`: no route to the network.
    pub const NETWORK_UNREACHABLE: Self = Self::new(Category::Network, 4);
    /// `DATA001`: input could not be parsed.
    pub const PARSE: Self = Self::new(Category::Data, 1);
    /// `DATA002`: input is not in the expected format.
    pub const INVALID_FORMAT: Self = Self::new(Category::Data, 2);
    /// `DATA003`: decoding failed.
    pub const DECODE: Self = Self::new(Category::Data, 3);
    /// `DATA004`: encoding failed.
    pub const ENCODE: Self = Self::new(Category::Data, 4);
    /// `LOGIC001`: an index was out of range.
    pub const INDEX_OUT_OF_RANGE: Self = Self::new(Category::Logic, 1);
    /// `LOGIC002`: a null or nil reference was used.
    pub const NULL_REFERENCE: Self = Self::new(Category::Logic, 2);
    /// `LOGIC003`: an assertion failed.
    pub const ASSERTION_FAILED: Self = Self::new(Category::Logic, 3);
    /// `GEN000`: nothing more specific matched.
    pub const GENERIC: Self = Self::new(Category::Generic, 0);
}

impl fmt::Display for ClassificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
