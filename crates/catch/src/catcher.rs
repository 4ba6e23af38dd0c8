//! The reporting handle and its context-chaining builder.

use crate::guard::{Guard, Recovered};
use crate::pipeline::{build_record, emit};
use catch_common::{ContextMap, ContextValue};
use catch_config::EngineConfig;
use catch_diagnostics::{ConsoleSink, ReportSink};
use catch_infer::{ExplicitContext, RustSourceInspector, SourceInspector};
use catch_source::Location;
use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A reporting handle bound to one configuration.
///
/// The free functions of this crate use a `Catcher` built from the
/// process-wide configuration. Build one explicitly to report with a
/// different configuration, to capture console output in a
/// [`BufferSink`](catch_diagnostics::BufferSink), or to swap the
/// [`SourceInspector`].
///
/// ```no_run
/// use catch::{Catcher, EngineConfig};
///
/// let catcher = Catcher::new(EngineConfig::default().with_exit_on_report(false));
/// if let Err(err) = std::fs::read_to_string("settings.toml") {
///     catcher.with_context("stage", "startup").report(Some(&err));
/// }
/// ```
#[derive(Clone)]
pub struct Catcher {
    config: EngineConfig,
    console: Arc<dyn ReportSink>,
    inspector: Arc<dyn SourceInspector>,
}

impl Catcher {
    /// Creates a handle reporting to standard error with `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: config.resolved(),
            console: Arc::new(ConsoleSink),
            inspector: Arc::new(RustSourceInspector),
        }
    }

    /// Creates a handle using the process-wide configuration as it is now.
    pub fn global() -> Self {
        Self::new(catch_config::current())
    }

    /// Sends console output to `sink` instead of standard error.
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.console = sink;
        self
    }

    /// Uses `inspector` for source inference.
    pub fn with_inspector(mut self, inspector: Arc<dyn SourceInspector>) -> Self {
        self.inspector = inspector;
        self
    }

    /// The configuration reports are produced with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reports `err` at the caller's location. Always returns `true`.
    #[track_caller]
    pub fn report<E: Display + ?Sized>(&self, err: &E) -> bool {
        self.report_at(err.to_string(), Location::caller(), ExplicitContext::default());
        true
    }

    /// Reports `err` with caller-supplied context.
    #[track_caller]
    pub fn report_with<E: Display + ?Sized>(
        &self,
        err: &E,
        context: impl Into<ExplicitContext>,
    ) -> bool {
        self.report_at(err.to_string(), Location::caller(), context.into());
        true
    }

    /// Reports the error of `result`, if any. Returns whether a report was made.
    #[track_caller]
    pub fn report_result<T, E: Display>(&self, result: &Result<T, E>) -> bool {
        match result {
            Ok(_) => false,
            Err(err) => self.report(err),
        }
    }

    /// Reports the error of `result`, if any. Returns whether `result` is `Ok`.
    #[track_caller]
    pub fn check<T, E: Display>(&self, result: &Result<T, E>) -> bool {
        !self.report_result(result)
    }

    /// Starts a context chain with one entry.
    pub fn with_context(&self, key: impl Into<String>, value: impl Into<ContextValue>) -> ContextChain {
        ContextChain {
            catcher: self.clone(),
            context: ContextMap::new(),
        }
        .with_context(key, value)
    }

    /// Creates a [`Guard`] reporting through this handle.
    #[track_caller]
    pub fn guard(&self) -> Guard {
        Guard::with_catcher(self.clone(), Location::caller())
    }

    /// Runs `f`, turning a panic into a reported [`Recovered`] failure.
    ///
    /// `f` is treated as unwind-safe: state it mutates may be left
    /// half-updated if it panics. The panic message is also printed by the
    /// panic hook, as usual.
    #[track_caller]
    pub fn recover<T>(&self, f: impl FnOnce() -> T) -> Result<T, Recovered> {
        let location = Location::caller();
        // Reported from this frame directly so the next frame up is the caller.
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => {
                let recovered = Recovered::from_payload(payload.as_ref(), location.clone());
                self.report_at(recovered.to_string(), location, ExplicitContext::default());
                Err(recovered)
            }
        }
    }

    pub(crate) fn report_at(&self, message: String, location: Location, explicit: ExplicitContext) {
        let record = build_record(
            message,
            location,
            explicit,
            &self.config,
            self.inspector.as_ref(),
        );
        emit(record, &self.config, self.console.as_ref());
    }
}

impl fmt::Debug for Catcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Context accumulated ahead of a report.
///
/// Created by [`Catcher::with_context`] or the free
/// [`with_context`](crate::with_context). Entries added later replace earlier
/// ones with the same key.
#[derive(Debug)]
#[must_use = "a context chain reports nothing until `report` is called"]
pub struct ContextChain {
    catcher: Catcher,
    context: ContextMap,
}

impl ContextChain {
    /// Adds an entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Reports `err` with the accumulated context. `None` reports nothing.
    ///
    /// Returns whether a report was made.
    #[track_caller]
    pub fn report<E: Display + ?Sized>(self, err: Option<&E>) -> bool {
        let Some(err) = err else {
            return false;
        };
        self.catcher.report_at(
            err.to_string(),
            Location::caller(),
            ExplicitContext::Map(self.context),
        );
        true
    }

    /// Reports the error of `result`, if any, with the accumulated context.
    #[track_caller]
    pub fn report_result<T, E: Display>(self, result: &Result<T, E>) -> bool {
        self.report(result.as_ref().err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catch_diagnostics::BufferSink;
    use catch_infer::NoopInspector;

    fn buffered() -> (Catcher, Arc<BufferSink>) {
        let sink = Arc::new(BufferSink::new());
        let config = EngineConfig::default()
            .with_colors(false)
            .with_exit_on_report(false)
            .with_stack_trace(false);
        let catcher = Catcher::new(config)
            .with_sink(sink.clone())
            .with_inspector(Arc::new(NoopInspector));
        (catcher, sink)
    }

    #[test]
    fn zero_depth_config_resolves_to_defaults() {
        let config = EngineConfig {
            max_stack_depth: 0,
            use_colors: false,
            ..EngineConfig::default()
        };
        assert_eq!(Catcher::new(config).config(), &EngineConfig::default());
    }

    #[test]
    fn report_result_only_reports_errors() {
        let (catcher, sink) = buffered();
        assert!(!catcher.report_result(&Ok::<u8, String>(1)));
        assert_eq!(sink.report_count(), 0);
        assert!(catcher.report_result(&Err::<u8, _>("connection refused")));
        assert_eq!(sink.report_count(), 1);
        assert!(sink.contents().starts_with("error[NET001]: connection refused\n"));
    }

    #[test]
    fn check_returns_success() {
        let (catcher, sink) = buffered();
        assert!(catcher.check(&Ok::<(), &str>(())));
        assert!(!catcher.check(&Err::<(), _>("permission denied")));
        assert_eq!(sink.report_count(), 1);
    }

    #[test]
    fn chain_collects_context() {
        let (catcher, sink) = buffered();
        let reported = catcher
            .with_context("user_id", 42)
            .with_context("operation", "load")
            .with_context("user_id", 7)
            .report(Some("failed to parse profile"));
        assert!(reported);
        let out = sink.contents();
        assert!(out.starts_with("error[DATA001]"));
        assert!(out.contains("user_id: 7\n"));
        assert!(out.contains("operation: load\n"));
    }

    #[test]
    fn chain_with_nothing_to_report() {
        let (catcher, sink) = buffered();
        assert!(!catcher.with_context("k", "v").report(None::<&str>));
        assert!(!catcher
            .with_context("k", "v")
            .report_result(&Ok::<(), String>(())));
        assert_eq!(sink.report_count(), 0);
    }

    #[test]
    fn recover_reports_panics() {
        let (catcher, sink) = buffered();
        assert_eq!(catcher.recover(|| 5), Ok(5));
        assert_eq!(sink.report_count(), 0);

        let err = catcher
            .recover(|| -> u8 { panic!("index out of bounds: the len is 0") })
            .unwrap_err();
        assert_eq!(err.to_string(), "panic: index out of bounds: the len is 0");
        assert!(sink.contents().starts_with("error[LOGIC001]: panic: index out of bounds"));
    }
}
