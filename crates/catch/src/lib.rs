//! Rich, rustc-style failure reports from a single call.
//!
//! ```text
//! error[FS001]: No such file or directory (os error 2)
//!   --> src/main.rs:14:9
//!    |
//! 12 | fn main() {
//! 13 |     if let Err(err) = File::open("settings.toml") {
//! 14 |         catch::report(&err);
//!    |         ^
//! 15 |     }
//! 16 | }
//!    |
//!    = context:
//!        caller_function: app::main
//!        caller_location: main.rs:14
//!        function_call: File::open
//!    = help: verify the file path exists, check for typos, or create the file first
//!    = stack backtrace:
//!       0: app::main
//!             at main.rs:14
//! ```
//!
//! Every entry point captures its caller's location. The failure message is
//! classified into a stable code, the surrounding source is shown, context is
//! gathered from the caller and inferred from the code and the stack, and the
//! report is written to standard error (and optionally a log file).
//!
//! The free functions use the process-wide configuration, set with
//! [`configure`]. By default a report exits the process with status 1;
//! turn [`EngineConfig::exit_on_report`] off to keep running. A [`Catcher`]
//! carries its own configuration and output sink.

#![warn(missing_docs)]

mod catcher;
mod guard;
mod pipeline;
mod report;
mod wrap;

pub use catcher::{Catcher, ContextChain};
pub use guard::{recover, Guard, Recovered};
pub use report::{check, must, report, report_result, report_with, with_context};
pub use wrap::{wrap, Wrapped};

pub use catch_common::{ContextMap, ContextValue};
pub use catch_config::{
    configure, current, load_config, load_config_file, reset, ConfigError, EngineConfig,
};
pub use catch_diagnostics::{strip_styles, BufferSink, ClassificationCode, ConsoleSink, ReportSink};
pub use catch_infer::{ExplicitContext, NoopInspector, RustSourceInspector, SourceInspector};
pub use catch_source::Location;

/// Reports a failure with a formatted message prepended: `<message>: <err>`.
///
/// The format arguments are also recorded as explicit context items, as if
/// passed to [`context!`]. Each is evaluated once and must convert into a
/// [`ContextValue`].
///
/// ```no_run
/// let name = "settings.toml";
/// if let Err(err) = std::fs::read(name) {
///     catch::reportf!(err, "failed to load {}", name);
/// }
/// ```
#[macro_export]
macro_rules! reportf {
    (@bind $err:expr, $fmt:literal, [$($bound:ident)*]) => {
        $crate::report_with(
            &::std::format!("{}: {}", ::std::format_args!($fmt $(, $bound)*), $err),
            $crate::context![$(::std::clone::Clone::clone($bound)),*],
        )
    };
    (@bind $err:expr, $fmt:literal, [$($bound:ident)*] $head:expr, $($rest:expr,)*) => {{
        let arg = &$head;
        $crate::reportf!(@bind $err, $fmt, [$($bound)* arg] $($rest,)*)
    }};
    ($err:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::reportf!(@bind $err, $fmt, [] $($arg,)*)
    };
}

/// Wraps a failure with a formatted message, without reporting it.
///
/// See [`wrap()`].
#[macro_export]
macro_rules! wrap {
    ($err:expr, $($arg:tt)+) => {
        $crate::wrap($err, ::std::format!($($arg)+))
    };
}

/// Reports an `assertion failed` failure if the condition is false.
///
/// Evaluates to the condition. Without a message, the condition's source
/// text is used.
///
/// ```no_run
/// let items: Vec<u32> = Vec::new();
/// catch::ensure!(!items.is_empty(), "no items to process");
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $crate::ensure!($cond, "{}", ::std::stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {{
        let holds: bool = $cond;
        if !holds {
            $crate::report(&::std::format!(
                "assertion failed: {}",
                ::std::format_args!($($arg)+)
            ));
        }
        holds
    }};
}

/// Builds an [`ExplicitContext`] from a list of values.
///
/// ```
/// let ctx = catch::context!["user_id", 42, "data/input.csv"].normalize();
/// assert_eq!(ctx["user_id"].to_string(), "42");
/// assert_eq!(ctx["path"].to_string(), "data/input.csv");
/// ```
#[macro_export]
macro_rules! context {
    ($($item:expr),* $(,)?) => {
        $crate::ExplicitContext::Items(::std::vec![$($crate::ContextValue::from($item)),*])
    };
}
