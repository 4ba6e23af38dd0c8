//! Capturing the calling stack as a list of resolved frames.

use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::{Path, PathBuf};

/// Crates whose frames belong to the reporting engine itself.
const ENGINE_CRATES: &[&str] = &[
    "catch",
    "catch_common",
    "catch_config",
    "catch_diagnostics",
    "catch_infer",
    "catch_source",
];

/// One resolved frame of a captured stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    file: PathBuf,
    line: u32,
    function: String,
    symbol: String,
}

impl StackFrame {
    /// Creates a frame from a fully qualified symbol name and its location.
    ///
    /// The display name is derived by [`strip_module_path`].
    pub fn new(symbol: impl Into<String>, file: impl Into<PathBuf>, line: u32) -> Self {
        let symbol = symbol.into();
        Self {
            file: file.into(),
            line,
            function: strip_module_path(&symbol),
            symbol,
        }
    }

    /// The source file of the frame; empty if unknown.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The line within [`file`](Self::file), or `0` if unknown.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The function name with its module path stripped.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The fully qualified symbol name.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether the frame carries a source location.
    pub fn has_location(&self) -> bool {
        !self.file.as_os_str().is_empty()
    }
}

/// Captures the current thread's stack.
///
/// Frames belonging to the backtrace machinery and to this function are
/// dropped, then `skip` further frames are skipped and at most `max_depth`
/// are kept. An unresolvable frame ends the stack, so the result may be
/// shorter than requested (or empty, e.g. in binaries without symbols).
pub fn capture(skip: usize, max_depth: usize) -> Vec<StackFrame> {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        log::debug!("stack capture unsupported on this platform");
        return Vec::new();
    }
    parse_backtrace(&backtrace.to_string())
        .into_iter()
        .skip_while(|frame| is_capture_machinery(frame.symbol()))
        .skip(skip)
        .take(max_depth)
        .collect()
}

fn is_capture_machinery(symbol: &str) -> bool {
    symbol.starts_with("std::backtrace")
        || symbol.starts_with("backtrace::")
        || symbol == "catch_source::stack::capture"
}

/// Returns `true` if `symbol` belongs to one of the engine's own crates.
pub fn is_engine_frame(symbol: &str) -> bool {
    let root = symbol
        .trim_start_matches('<')
        .split("::")
        .next()
        .unwrap_or_default();
    ENGINE_CRATES.contains(&root)
}

/// Parses the textual listing produced by `Backtrace`'s `Display` impl.
///
/// Each frame is a `N: symbol` line optionally followed by an
/// `at file:line:column` line. Functions inlined into a frame follow it as
/// indented symbol lines without an index, each with its own `at` line.
/// Parsing stops at the first `<unknown>` frame.
fn parse_backtrace(text: &str) -> Vec<StackFrame> {
    struct Pending<'a> {
        symbol: &'a str,
        location: Option<(&'a str, u32)>,
    }

    let mut pending: Vec<Pending<'_>> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = pending.last_mut() {
                if last.location.is_none() {
                    last.location = split_location(location);
                }
            }
            continue;
        }
        let symbol = match line.split_once(": ") {
            Some((index, symbol))
                if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) =>
            {
                symbol
            }
            // An unnumbered symbol continues the previous physical frame:
            // the compiler inlined it there.
            _ if !line.is_empty() && raw.starts_with(' ') && !pending.is_empty() => line,
            _ => continue,
        };
        if symbol == "<unknown>" {
            break;
        }
        pending.push(Pending {
            symbol,
            location: None,
        });
    }

    pending
        .into_iter()
        .map(|p| {
            let (file, line) = p.location.unwrap_or(("", 0));
            StackFrame::new(p.symbol, file, line)
        })
        .collect()
}

/// Splits `path:line[:column]` into the path and line.
fn split_location(text: &str) -> Option<(&str, u32)> {
    let mut parts = text.rsplitn(3, ':');
    let last = parts.next()?;
    let middle = parts.next()?;
    match parts.next() {
        Some(path) => Some((path, middle.parse().ok()?)),
        None => Some((middle, last.parse().ok()?)),
    }
}

/// Strips the module path from a symbol, keeping its final two segments.
///
/// `app::io::loader::read_config` becomes `loader::read_config`. Separators
/// nested inside `<...>` (trait impls, generic arguments) are not split on.
pub fn strip_module_path(symbol: &str) -> String {
    let segments = split_path_segments(symbol);
    let keep_from = segments.len().saturating_sub(2);
    segments[keep_from..].join("::")
}

fn split_path_segments(symbol: &str) -> Vec<&str> {
    let bytes = symbol.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&symbol[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&symbol[start..]);
    segments
}
