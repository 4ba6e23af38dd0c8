//! Failure classification, report assembly, and rendering to console and log file.
//!
//! [`classify`] maps a failure message to a stable [`ClassificationCode`] and a
//! remediation hint. A [`FailureRecord`] bundles the failure with its location,
//! context, stack, and source window; [`render`] turns it into a rustc-style
//! report and [`dispatch`] writes the report to the configured sinks.

#![warn(missing_docs)]

pub mod classify;
pub mod code;
pub mod record;
pub mod renderer;
pub mod sink;
pub mod style;

pub use classify::{classify, rules, Classification, Rule};
pub use code::{Category, ClassificationCode};
pub use record::FailureRecord;
pub use renderer::{render, ReportRenderer, TerminalRenderer};
pub use sink::{dispatch, dispatch_to, finish, BufferSink, ConsoleSink, LogFileSink, ReportSink};
pub use style::{strip_styles, Painter};
