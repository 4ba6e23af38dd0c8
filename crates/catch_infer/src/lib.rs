//! Context inference for failure reports.
//!
//! Context comes from three sources, in order of precedence: what the caller
//! supplied ([`ExplicitContext`]), what the syntax around the call site
//! suggests ([`SourceInspector`]), and what the calling functions suggest
//! ([`infer_from_stack`]). Inferred keys never replace explicit ones.

#![warn(missing_docs)]

pub mod explicit;
pub mod inspector;
pub mod stack;

pub use explicit::ExplicitContext;
pub use inspector::{NoopInspector, RustSourceInspector, SourceInspector};
pub use stack::infer_from_stack;

use catch_common::{merge_absent, ContextMap};
use catch_config::EngineConfig;
use catch_source::{Location, StackFrame};
use std::panic::{self, AssertUnwindSafe};

/// Builds the context for a report using the Rust source inspector.
///
/// See [`infer_with`].
pub fn infer(
    explicit: ExplicitContext,
    location: &Location,
    frames: &[StackFrame],
    config: &EngineConfig,
) -> ContextMap {
    infer_with(&RustSourceInspector, explicit, location, frames, config)
}

/// Builds the context for a report.
///
/// The explicit context is normalized first. Source hints near `location`
/// are then added for keys still absent (if source inference is enabled),
/// followed by stack hints from `frames` (if stack inference is enabled).
/// Inference never fails; a panicking inspector contributes nothing.
pub fn infer_with(
    inspector: &dyn SourceInspector,
    explicit: ExplicitContext,
    location: &Location,
    frames: &[StackFrame],
    config: &EngineConfig,
) -> ContextMap {
    let mut context = explicit.normalize();

    if config.enable_source_inference {
        let hints = panic::catch_unwind(AssertUnwindSafe(|| {
            inspector.hints_near(&location.file, location.line)
        }))
        .unwrap_or_else(|_| {
            log::debug!("source inspection of {location} panicked");
            ContextMap::new()
        });
        let added = merge_absent(&mut context, hints);
        log::trace!("source inference added {added} keys");
    }

    if config.enable_stack_inference {
        let added = merge_absent(&mut context, infer_from_stack(frames));
        log::trace!("stack inference added {added} keys");
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use catch_common::ContextValue;
    use std::path::Path;

    struct FixedInspector(ContextMap);

    impl SourceInspector for FixedInspector {
        fn hints_near(&self, _path: &Path, _line: u32) -> ContextMap {
            self.0.clone()
        }
    }

    struct PanickingInspector;

    impl SourceInspector for PanickingInspector {
        fn hints_near(&self, _path: &Path, _line: u32) -> ContextMap {
            panic!("inspector bug")
        }
    }

    fn source_hints() -> FixedInspector {
        let mut map = ContextMap::new();
        map.insert("user_id".to_string(), ContextValue::from("from_source"));
        map.insert("function_call".to_string(), ContextValue::from("File::open"));
        map.insert("caller_function".to_string(), ContextValue::from("from_source"));
        FixedInspector(map)
    }

    fn frames() -> Vec<StackFrame> {
        vec![StackFrame::new("app::io::read_user", "src/io.rs", 21)]
    }

    fn location() -> Location {
        Location::new("src/io.rs", 20, 5)
    }

    #[test]
    fn explicit_beats_source_beats_stack() {
        let explicit = ExplicitContext::from(vec!["user_id".into(), 42.into()]);
        let ctx = infer_with(
            &source_hints(),
            explicit,
            &location(),
            &frames(),
            &EngineConfig::default(),
        );
        assert_eq!(ctx["user_id"], ContextValue::Int(42));
        assert_eq!(ctx["function_call"].as_str(), Some("File::open"));
        assert_eq!(ctx["caller_function"].as_str(), Some("from_source"));
        assert_eq!(ctx["operation_type"].as_str(), Some("read"));
        assert_eq!(ctx["caller_location"].as_str(), Some("io.rs:21"));
    }

    #[test]
    fn inference_can_be_disabled() {
        let config = EngineConfig::default().with_inference(false);
        let ctx = infer_with(
            &source_hints(),
            ExplicitContext::from(vec!["config.toml".into()]),
            &location(),
            &frames(),
            &config,
        );
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx["path"].as_str(), Some("config.toml"));
    }

    #[test]
    fn panicking_inspector_contributes_nothing() {
        let config = EngineConfig {
            enable_stack_inference: false,
            ..EngineConfig::default()
        };
        let ctx = infer_with(
            &PanickingInspector,
            ExplicitContext::default(),
            &location(),
            &frames(),
            &config,
        );
        assert!(ctx.is_empty());
    }

    #[test]
    fn default_inspector_handles_missing_source() {
        let ctx = infer(
            ExplicitContext::default(),
            &Location::new("no/such/file.rs", 3, 1),
            &[],
            &EngineConfig::default(),
        );
        assert!(ctx.is_empty());
    }
}
