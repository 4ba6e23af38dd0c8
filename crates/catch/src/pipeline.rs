//! Assembling a failure record and writing it out.

use catch_config::EngineConfig;
use catch_diagnostics::{dispatch_to, finish, render, FailureRecord, ReportSink};
use catch_infer::{infer_with, ExplicitContext, SourceInspector};
use catch_source::{capture, is_engine_frame, load_window, resolve_source_path, Location, StackFrame};

/// Builds the full record for a failure reported at `location`.
///
/// Stages that are switched off in `config` are skipped; the ones that run
/// degrade to nothing rather than fail.
pub(crate) fn build_record(
    message: String,
    location: Location,
    explicit: ExplicitContext,
    config: &EngineConfig,
    inspector: &dyn SourceInspector,
) -> FailureRecord {
    let frames = if config.show_stack_trace || config.enable_stack_inference {
        caller_frames()
    } else {
        Vec::new()
    };

    let source = if config.show_source_code {
        source_window(&location, config.context_line_radius)
    } else {
        Vec::new()
    };

    let context = infer_with(inspector, explicit, &location, &frames, config);

    let mut record = FailureRecord::new(message, location);
    if let Some(frame) = frames.first() {
        record = record.with_function(frame.function());
    }
    let stack = if config.show_stack_trace {
        frames.into_iter().take(config.max_stack_depth).collect()
    } else {
        Vec::new()
    };
    record.with_source(source).with_context(context).with_stack(stack)
}

/// Renders `record`, writes it to `console` and the log file, then exits if configured.
pub(crate) fn emit(record: FailureRecord, config: &EngineConfig, console: &dyn ReportSink) {
    log::debug!("reporting {} at {}", record.code(), record.location());
    let text = render(record, config);
    dispatch_to(console, &text, config);
    finish(config);
}

/// The current stack with the engine's own frames removed from the top.
pub(crate) fn caller_frames() -> Vec<StackFrame> {
    capture(0, usize::MAX)
        .into_iter()
        .skip_while(|frame| is_engine_frame(frame.symbol()) || is_drop_glue(frame.symbol()))
        .collect()
}

/// Compiler-generated frames that run a guard's `Drop`.
fn is_drop_glue(symbol: &str) -> bool {
    symbol.starts_with("core::ptr::drop_in_place")
}

fn source_window(location: &Location, radius: u32) -> Vec<catch_source::SourceLine> {
    match resolve_source_path(&location.file) {
        Some(path) => load_window(&path, location.line, radius),
        None => {
            log::debug!("source for {} not found", location.file.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catch_common::ContextValue;
    use catch_diagnostics::{BufferSink, ClassificationCode};
    use catch_infer::NoopInspector;

    fn quiet() -> EngineConfig {
        EngineConfig::default()
            .with_colors(false)
            .with_exit_on_report(false)
    }

    #[test]
    fn record_carries_source_window() {
        let location = Location::caller();
        let record = build_record(
            "no such file or directory".to_string(),
            location.clone(),
            ExplicitContext::default(),
            &quiet(),
            &NoopInspector,
        );
        assert_eq!(record.code(), ClassificationCode::MISSING_FILE);
        let flagged: Vec<_> = record.source().iter().filter(|l| l.is_error()).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].number(), location.line);
        assert!(flagged[0].content().contains("Location::caller()"));
        assert!(record.stack().len() <= quiet().max_stack_depth);
    }

    #[test]
    fn disabled_stages_are_skipped() {
        let config = EngineConfig {
            show_source_code: false,
            show_stack_trace: false,
            ..quiet().with_inference(false)
        };
        let record = build_record(
            "boom".to_string(),
            Location::caller(),
            ExplicitContext::from(vec![ContextValue::from("user_id"), ContextValue::from(42)]),
            &config,
            &NoopInspector,
        );
        assert!(record.source().is_empty());
        assert!(record.stack().is_empty());
        assert!(record.function().is_none());
        assert_eq!(record.context().len(), 1);
        assert_eq!(record.context()["user_id"], ContextValue::Int(42));
    }

    #[test]
    fn stack_depth_is_bounded() {
        let config = EngineConfig {
            max_stack_depth: 1,
            ..quiet()
        };
        let record = build_record(
            "boom".to_string(),
            Location::caller(),
            ExplicitContext::default(),
            &config,
            &NoopInspector,
        );
        assert!(record.stack().len() <= 1);
    }

    #[test]
    fn emit_writes_rendered_report() {
        let sink = BufferSink::new();
        let record = FailureRecord::new("read timeout", Location::new("net.rs", 4, 0));
        emit(record, &quiet(), &sink);
        assert_eq!(sink.report_count(), 1);
        assert!(sink.contents().starts_with("error[NET002]: read timeout\n"));
    }

    #[test]
    fn drop_glue_is_recognized() {
        assert!(is_drop_glue("core::ptr::drop_in_place<catch::guard::Guard>"));
        assert!(!is_drop_glue("app::main"));
    }
}
