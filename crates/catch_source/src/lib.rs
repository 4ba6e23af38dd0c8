//! Call-site locations, source windows, and stack capture for failure reports.
//!
//! This crate provides [`Location`] for the site a failure was reported from,
//! [`load_window`] for reading the [`SourceLine`]s around it, and [`capture`]
//! for walking the calling [`StackFrame`]s. Every operation here is
//! best-effort: an unreadable file yields an empty window and an unresolvable
//! frame ends the stack.

#![warn(missing_docs)]

pub mod location;
pub mod resolve;
pub mod stack;
pub mod window;

pub use location::Location;
pub use resolve::resolve_source_path;
pub use stack::{capture, is_engine_frame, strip_module_path, StackFrame};
pub use window::{load_window, SourceLine};
