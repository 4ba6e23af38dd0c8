//! Ordered context maps and the merge rule shared by explicit and inferred context.

use crate::value::ContextValue;
use std::collections::BTreeMap;

/// Context annotations keyed by name.
///
/// A `BTreeMap` keeps iteration sorted by key so that rendered reports are
/// byte-for-byte reproducible.
pub type ContextMap = BTreeMap<String, ContextValue>;

/// Copies every entry of `extra` whose key is absent from `base`.
///
/// Existing entries in `base` are never replaced. Returns the number of
/// entries added.
pub fn merge_absent(base: &mut ContextMap, extra: ContextMap) -> usize {
    let mut added = 0;
    for (key, value) in extra {
        if !base.contains_key(&key) {
            base.insert(key, value);
            added += 1;
        }
    }
    added
}
