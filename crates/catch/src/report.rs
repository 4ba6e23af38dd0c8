//! Free-function entry points using the process-wide configuration.

use crate::catcher::{Catcher, ContextChain};
use crate::pipeline::caller_frames;
use catch_common::ContextValue;
use catch_infer::ExplicitContext;
use catch_source::Location;
use std::fmt::Display;

/// Reports `err` at the caller's location. Always returns `true`.
///
/// ```no_run
/// if let Err(err) = std::fs::File::open("nonexistent_file.txt") {
///     catch::report(&err);
/// }
/// ```
#[track_caller]
pub fn report<E: Display + ?Sized>(err: &E) -> bool {
    Catcher::global().report(err)
}

/// Reports `err` with caller-supplied context.
///
/// The context is either a ready-made map or a list of values read pairwise
/// as keys and values; see [`ExplicitContext::normalize`].
#[track_caller]
pub fn report_with<E: Display + ?Sized>(err: &E, context: impl Into<ExplicitContext>) -> bool {
    Catcher::global().report_with(err, context)
}

/// Reports the error of `result`, if any. Returns whether a report was made.
#[track_caller]
pub fn report_result<T, E: Display>(result: &Result<T, E>) -> bool {
    Catcher::global().report_result(result)
}

/// Reports the error of `result`, if any. Returns whether `result` is `Ok`.
#[track_caller]
pub fn check<T, E: Display>(result: &Result<T, E>) -> bool {
    Catcher::global().check(result)
}

/// Starts a context chain using the process-wide configuration.
///
/// ```no_run
/// let result = std::fs::read("profile.json");
/// catch::with_context("user_id", 42)
///     .with_context("stage", "load")
///     .report_result(&result);
/// ```
pub fn with_context(key: impl Into<String>, value: impl Into<ContextValue>) -> ContextChain {
    Catcher::global().with_context(key, value)
}

/// Returns the value of `result`, or panics describing where it failed.
///
/// The panic message has the form
/// `Must failed in main.rs:12 (app::main): <error>`. Nothing is reported;
/// the panic is the report.
#[track_caller]
pub fn must<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", must_message(&Location::caller(), &err)),
    }
}

fn must_message<E: Display + ?Sized>(location: &Location, err: &E) -> String {
    let mut message = format!("Must failed in {}:{}", location.file_name(), location.line);
    if let Some(frame) = caller_frames().first() {
        message.push_str(&format!(" ({})", frame.function()));
    }
    message.push_str(&format!(": {err}"));
    message
}
