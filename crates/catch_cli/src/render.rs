//! `catch render`: preview the report for a failure at a source location.

use catch_common::{ContextMap, ContextValue};
use catch_config::EngineConfig;
use catch_diagnostics::{render, FailureRecord};
use catch_infer::{infer_with, ExplicitContext, RustSourceInspector};
use catch_source::{load_window, resolve_source_path, Location};

use crate::{load_engine_config, GlobalArgs, RenderArgs};

/// Runs the `catch render` command.
///
/// The report is printed to standard output and nothing is appended to the
/// log file; exit-on-report does not apply. Returns exit code 0.
pub fn run(args: &RenderArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_engine_config(global)?;
    if resolve_source_path(&args.file).is_none() {
        log::warn!("source file {} not found; rendering without it", args.file.display());
    }
    print!("{}", build_report(args, &config));
    Ok(0)
}

/// Renders the report for `args` without capturing a stack.
fn build_report(args: &RenderArgs, config: &EngineConfig) -> String {
    let location = Location::new(&args.file, args.line, args.column);

    let source = match resolve_source_path(&args.file) {
        Some(path) if config.show_source_code => {
            load_window(&path, args.line, config.context_line_radius)
        }
        _ => Vec::new(),
    };

    let explicit: ContextMap = args
        .context
        .iter()
        .map(|(key, value)| (key.clone(), parse_context_value(value)))
        .collect();
    let context = infer_with(
        &RustSourceInspector,
        ExplicitContext::Map(explicit),
        &location,
        &[],
        config,
    );

    let record = FailureRecord::new(args.message.as_str(), location)
        .with_source(source)
        .with_context(context);
    render(record, config)
}

/// Parses a `key=value` context entry.
pub fn parse_context_entry(entry: &str) -> Result<(String, String), String> {
    match entry.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{entry}`")),
    }
}

/// Types a context value given on the command line.
fn parse_context_value(text: &str) -> ContextValue {
    if let Ok(n) = text.parse::<i64>() {
        ContextValue::Int(n)
    } else if let Ok(x) = text.parse::<f64>() {
        ContextValue::Float(x)
    } else if let Ok(b) = text.parse::<bool>() {
        ContextValue::Bool(b)
    } else {
        ContextValue::from(text)
    }
}
