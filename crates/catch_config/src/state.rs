//! The process-wide configuration used by the convenience entry points.
//!
//! The instance is read on every report and is meant to be replaced once at
//! startup. Replacing it while other threads are reporting is allowed but
//! those reports may see either the old or the new configuration; ordering
//! that is the caller's responsibility.

use crate::types::EngineConfig;
use std::sync::{PoisonError, RwLock};

static CONFIG: RwLock<Option<EngineConfig>> = RwLock::new(None);

/// Replaces the process-wide configuration wholesale.
pub fn configure(config: EngineConfig) {
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
}

/// Returns a copy of the process-wide configuration, resolved against the defaults.
pub fn current() -> EngineConfig {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(EngineConfig::resolved)
        .unwrap_or_default()
}

/// Restores the process-wide configuration to the defaults.
pub fn reset() {
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = None;
}
