//! Rendering failure records into rustc-style reports.

use crate::record::FailureRecord;
use crate::style::{palette, Painter};
use catch_config::EngineConfig;
use catch_source::location::base_name;
use catch_source::SourceLine;
use std::fmt::Write;

/// Trait for rendering failure records into formatted output strings.
pub trait ReportRenderer {
    /// Renders a single record into a formatted string.
    fn render(&self, record: &FailureRecord) -> String;
}

/// Renders records in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error[FS001]: open nonexistent_file.txt: no such file or directory
///   --> src/main.rs:42:16
///    |
/// 41 |     let path = "nonexistent_file.txt";
/// 42 |     let file = File::open(path);
///    |                ^
/// 43 |     catch::report(&err);
///    |
///    = context:
///        path: nonexistent_file.txt
///    = help: verify the file path exists, check for typos, or create the file first
///    = stack backtrace:
///       0: main::load
///             at main.rs:42
/// ```
///
/// Sections are emitted in a fixed order and only when enabled and non-empty.
/// Colors change styling only: stripping the escapes from a colored render
/// gives exactly the plain render.
#[derive(Clone, Copy, Debug)]
pub struct TerminalRenderer {
    painter: Painter,
    show_source_code: bool,
    show_suggestions: bool,
    show_stack_trace: bool,
}

impl TerminalRenderer {
    /// Creates a renderer with every section enabled.
    pub fn new(color: bool) -> Self {
        Self {
            painter: Painter::new(color),
            show_source_code: true,
            show_suggestions: true,
            show_stack_trace: true,
        }
    }

    /// Creates a renderer whose sections and colors follow `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            painter: Painter::new(config.use_colors),
            show_source_code: config.show_source_code,
            show_suggestions: config.show_suggestions,
            show_stack_trace: config.show_stack_trace,
        }
    }

    fn header(&self, out: &mut String, record: &FailureRecord) {
        let p = &self.painter;
        let _ = writeln!(
            out,
            "{}{}",
            p.paint(format_args!("error[{}]", record.code()), palette::severity()),
            p.paint(format_args!(": {}", record.message()), palette::message()),
        );
    }

    fn location(&self, out: &mut String, record: &FailureRecord, pad: &str) {
        let _ = writeln!(
            out,
            "{pad}{} {}",
            self.painter.paint("-->", palette::gutter()),
            record.location()
        );
    }

    fn source_block(&self, out: &mut String, record: &FailureRecord, pad: &str) {
        let p = &self.painter;
        let width = pad.len();
        let bar = p.paint("|", palette::gutter());
        let _ = writeln!(out, "{pad} {bar}");
        for line in record.source() {
            let number = format!("{:>width$}", line.number());
            if line.is_error() {
                let _ = writeln!(
                    out,
                    "{} {bar} {}",
                    p.paint(&number, palette::flagged()),
                    line.content()
                );
                let indent = caret_indent(line, record.location().column);
                let _ = writeln!(
                    out,
                    "{pad} {bar} {indent}{}",
                    p.paint("^", palette::flagged())
                );
            } else {
                let _ = writeln!(
                    out,
                    "{} {bar} {}",
                    p.paint(&number, palette::line_number()),
                    p.paint(line.content(), palette::dimmed())
                );
            }
        }
        let _ = writeln!(out, "{pad} {bar}");
    }

    fn context_block(&self, out: &mut String, record: &FailureRecord, pad: &str) {
        let p = &self.painter;
        let _ = writeln!(
            out,
            "{pad} {} {}",
            p.paint("=", palette::gutter()),
            p.paint("context:", palette::section())
        );
        for (key, value) in record.context() {
            let _ = writeln!(out, "{pad}     {}: {value}", p.paint(key, palette::key()));
        }
    }

    fn help_line(&self, out: &mut String, record: &FailureRecord, pad: &str) {
        let p = &self.painter;
        let _ = writeln!(
            out,
            "{pad} {} {} {}",
            p.paint("=", palette::gutter()),
            p.paint("help:", palette::help()),
            record.suggestion()
        );
    }

    fn backtrace_block(&self, out: &mut String, record: &FailureRecord, pad: &str) {
        let p = &self.painter;
        let _ = writeln!(
            out,
            "{pad} {} {}",
            p.paint("=", palette::gutter()),
            p.paint("stack backtrace:", palette::section())
        );
        for (index, frame) in record.stack().iter().enumerate() {
            let _ = writeln!(
                out,
                "{pad}   {} {}",
                p.paint(format_args!("{index:>2}:"), palette::dimmed()),
                p.paint(frame.function(), palette::function())
            );
            if frame.has_location() {
                let _ = writeln!(
                    out,
                    "{pad}          {}",
                    p.paint(
                        format_args!("at {}:{}", base_name(frame.file()), frame.line()),
                        palette::dimmed()
                    )
                );
            }
        }
    }
}

impl ReportRenderer for TerminalRenderer {
    fn render(&self, record: &FailureRecord) -> String {
        let mut out = String::new();
        let pad = " ".repeat(gutter_width(record));

        self.header(&mut out, record);
        self.location(&mut out, record, &pad);

        if self.show_source_code && !record.source().is_empty() {
            self.source_block(&mut out, record, &pad);
        }
        if !record.context().is_empty() {
            self.context_block(&mut out, record, &pad);
        }
        if self.show_suggestions && !record.suggestion().is_empty() {
            self.help_line(&mut out, record, &pad);
        }
        if self.show_stack_trace && !record.stack().is_empty() {
            self.backtrace_block(&mut out, record, &pad);
        }

        // Blank line between consecutive reports.
        out.push('\n');
        out
    }
}

/// Renders `record` according to `config`, consuming it.
pub fn render(record: FailureRecord, config: &EngineConfig) -> String {
    TerminalRenderer::from_config(config).render(&record)
}

/// Width of the widest line number shown, or of the reported line if no source is shown.
fn gutter_width(record: &FailureRecord) -> usize {
    record
        .source()
        .iter()
        .map(|line| digits(line.number()))
        .max()
        .unwrap_or_else(|| digits(record.location().line))
}

fn digits(n: u32) -> usize {
    n.to_string().len()
}

/// Whitespace placing the caret under `column`, or under the first
/// non-blank character if the column is unknown. Tabs are preserved so the
/// caret lines up however the terminal expands them.
fn caret_indent(line: &SourceLine, column: u32) -> String {
    let content = line.content();
    let target = if column > 0 {
        column as usize - 1
    } else {
        content.chars().take_while(|c| c.is_whitespace()).count()
    };
    let mut indent: String = content
        .chars()
        .take(target)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let shortfall = target.saturating_sub(indent.chars().count());
    indent.extend(std::iter::repeat(' ').take(shortfall));
    indent
}
