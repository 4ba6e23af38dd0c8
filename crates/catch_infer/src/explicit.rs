//! Normalizing caller-supplied context into a keyed map.

use catch_common::{looks_like_path, ContextMap, ContextValue};

/// Context supplied by the caller alongside a failure.
#[derive(Clone, Debug, PartialEq)]
pub enum ExplicitContext {
    /// Ready-made key/value pairs, used as-is.
    Map(ContextMap),
    /// A flat list of values, keyed by [`normalize`](Self::normalize).
    Items(Vec<ContextValue>),
}

impl Default for ExplicitContext {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl ExplicitContext {
    /// Turns the context into a keyed map.
    ///
    /// Items are read pairwise: a string followed by any value is a key and
    /// its value. A string with nothing after it becomes `path` if it looks
    /// like a path and `operation` otherwise. Other unpaired values are filed
    /// under their [`default_key`](ContextValue::default_key). Later entries
    /// overwrite earlier ones with the same key.
    pub fn normalize(self) -> ContextMap {
        let items = match self {
            Self::Map(map) => return map,
            Self::Items(items) => items,
        };

        let mut map = ContextMap::new();
        let mut iter = items.into_iter().enumerate().peekable();
        while let Some((index, item)) = iter.next() {
            match item {
                ContextValue::Str(key) if iter.peek().is_some() => {
                    if let Some((_, value)) = iter.next() {
                        map.insert(key, value);
                    }
                }
                ContextValue::Str(text) => {
                    let key = if looks_like_path(&text) { "path" } else { "operation" };
                    map.insert(key.to_string(), ContextValue::Str(text));
                }
                other => {
                    map.insert(other.default_key(index), other);
                }
            }
        }
        map
    }

    /// Returns `true` if no context was supplied.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Map(map) => map.is_empty(),
            Self::Items(items) => items.is_empty(),
        }
    }
}

impl From<ContextMap> for ExplicitContext {
    fn from(map: ContextMap) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<ContextValue>> for ExplicitContext {
    fn from(items: Vec<ContextValue>) -> Self {
        Self::Items(items)
    }
}

impl<const N: usize> From<[ContextValue; N]> for ExplicitContext {
    fn from(items: [ContextValue; N]) -> Self {
        Self::Items(items.into())
    }
}
