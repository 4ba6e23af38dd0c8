//! The engine configuration and its defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of stack frames shown in a backtrace block.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 10;

/// Default number of source lines shown on each side of the reported line.
pub const DEFAULT_CONTEXT_LINE_RADIUS: u32 = 2;

/// Switches controlling which pipeline stages run and where reports go.
///
/// Every field is optional in `catch.toml`; missing fields take the values of
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Capture and print the calling stack.
    pub show_stack_trace: bool,
    /// Print the source lines around the reported line.
    pub show_source_code: bool,
    /// Print the remediation hint paired with the classification code.
    pub show_suggestions: bool,
    /// Exit the process with status 1 after a report has been written.
    pub exit_on_report: bool,
    /// Append a copy of every report, without styling, to this file.
    pub log_file_path: Option<PathBuf>,
    /// Maximum number of frames in the backtrace block. `0` means "unset".
    pub max_stack_depth: usize,
    /// Number of source lines shown on each side of the reported line.
    pub context_line_radius: u32,
    /// Style console output with ANSI colors.
    pub use_colors: bool,
    /// Infer context annotations from the syntax around the call site.
    pub enable_source_inference: bool,
    /// Infer context annotations from the calling functions.
    pub enable_stack_inference: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            show_stack_trace: true,
            show_source_code: true,
            show_suggestions: true,
            exit_on_report: true,
            log_file_path: None,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            context_line_radius: DEFAULT_CONTEXT_LINE_RADIUS,
            use_colors: true,
            enable_source_inference: true,
            enable_stack_inference: true,
        }
    }
}

impl EngineConfig {
    /// Returns the configuration to actually use.
    ///
    /// A configuration with `max_stack_depth == 0` was never filled in, so the
    /// defaults are returned in its place.
    pub fn resolved(&self) -> EngineConfig {
        if self.max_stack_depth == 0 {
            EngineConfig::default()
        } else {
            self.clone()
        }
    }

    /// Sets the log file path.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }

    /// Enables or disables ANSI colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Enables or disables exiting after a report.
    pub fn with_exit_on_report(mut self, exit_on_report: bool) -> Self {
        self.exit_on_report = exit_on_report;
        self
    }

    /// Enables or disables the backtrace block.
    pub fn with_stack_trace(mut self, show: bool) -> Self {
        self.show_stack_trace = show;
        self
    }

    /// Enables or disables the source window.
    pub fn with_source_code(mut self, show: bool) -> Self {
        self.show_source_code = show;
        self
    }

    /// Enables or disables both context inference stages.
    pub fn with_inference(mut self, enabled: bool) -> Self {
        self.enable_source_inference = enabled;
        self.enable_stack_inference = enabled;
        self
    }
}
