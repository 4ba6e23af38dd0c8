//! Optional ANSI styling of report fragments, and its removal.

use owo_colors::{OwoColorize, Style};
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Display;
use std::sync::OnceLock;

/// Applies styles to report fragments when colors are enabled.
///
/// With colors disabled every fragment is passed through unchanged, so a
/// colored report with its styling stripped is identical to the plain one.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    /// Creates a painter; `enabled == false` produces plain text.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Renders `text`, styled if this painter is enabled.
    pub fn paint(&self, text: impl Display, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Styles used by the terminal renderer.
pub(crate) mod palette {
    use owo_colors::Style;

    pub fn severity() -> Style {
        Style::new().bright_red().bold()
    }

    pub fn message() -> Style {
        Style::new().bold()
    }

    pub fn gutter() -> Style {
        Style::new().blue().bold()
    }

    pub fn line_number() -> Style {
        Style::new().blue()
    }

    pub fn flagged() -> Style {
        Style::new().red().bold()
    }

    pub fn dimmed() -> Style {
        Style::new().bright_black()
    }

    pub fn section() -> Style {
        Style::new().yellow().bold()
    }

    pub fn key() -> Style {
        Style::new().cyan()
    }

    pub fn help() -> Style {
        Style::new().green().bold()
    }

    pub fn function() -> Style {
        Style::new().bold()
    }
}

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ANSI escape pattern is valid")
    })
}

/// Removes ANSI escape sequences from `text`.
pub fn strip_styles(text: &str) -> Cow<'_, str> {
    ansi_pattern().replace_all(text, "")
}
