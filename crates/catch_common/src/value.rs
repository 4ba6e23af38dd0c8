//! Tagged context values attached to failure reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strings shorter than this are treated as names rather than descriptions
/// when no key is supplied for them.
const SHORT_STRING_LEN: usize = 20;

/// A single context annotation value.
///
/// Context values are displayed verbatim in the context block of a report.
/// Each variant also carries a default key name (see [`default_key`](Self::default_key))
/// used when a caller supplies a value without naming it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContextValue {
    /// A text value.
    Str(String),
    /// A signed integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// Any other displayable value, rendered eagerly.
    Opaque {
        /// Short lower-cased type name of the original value (e.g. `pathbuf`).
        kind: String,
        /// The value's `Display` output.
        text: String,
    },
}

impl ContextValue {
    /// Wraps an arbitrary displayable value, remembering its short type name.
    pub fn opaque<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::Opaque {
            kind: short_type_name(std::any::type_name::<T>()),
            text: value.to_string(),
        }
    }

    /// Returns the text of a [`Str`](Self::Str) value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the key this value is filed under when supplied without one.
    ///
    /// `index` is the value's position in the caller's argument list; numeric
    /// values are positional (`value_<index>`) since a bare number says nothing
    /// about what it measures.
    pub fn default_key(&self, index: usize) -> String {
        match self {
            Self::Str(s) if looks_like_path(s) => "path".to_string(),
            Self::Str(s) if s.chars().count() < SHORT_STRING_LEN => "name".to_string(),
            Self::Str(_) => "description".to_string(),
            Self::Int(_) | Self::Float(_) => format!("value_{index}"),
            Self::Bool(_) => "flag".to_string(),
            Self::Opaque { kind, .. } if kind.is_empty() => "context".to_string(),
            Self::Opaque { kind, .. } => kind.clone(),
        }
    }
}

/// Returns `true` if `s` contains a path or file-extension separator.
pub fn looks_like_path(s: &str) -> bool {
    s.contains('/') || s.contains('.')
}

/// Reduces a fully qualified type name to its lower-cased final segment.
///
/// `&std::path::PathBuf` becomes `pathbuf`, `alloc::vec::Vec<u8>` becomes `vec`.
fn short_type_name(full: &str) -> String {
    let base = full.trim_start_matches('&').trim_start_matches("mut ");
    let base = base.split('<').next().unwrap_or(base);
    let last = base.rsplit("::").next().unwrap_or(base);
    last.trim().to_lowercase()
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Opaque { text, .. } => f.write_str(text),
        }
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for ContextValue {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for ContextValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<f32> for ContextValue {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ContextValue {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => Self::Int(n),
                        Err(_) => Self::opaque(&n),
                    }
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
