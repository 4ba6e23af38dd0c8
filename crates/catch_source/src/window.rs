//! Reading a bounded window of lines around a source location.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of source text shown in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    number: u32,
    content: String,
    is_error: bool,
}

impl SourceLine {
    /// Creates a new source line.
    pub fn new(number: u32, content: impl Into<String>, is_error: bool) -> Self {
        Self {
            number,
            content: content.into(),
            is_error,
        }
    }

    /// The 1-indexed line number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The raw text of the line, without its line terminator.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this is the line the failure was reported on.
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

/// Reads the lines `[max(1, center_line - radius), center_line + radius]` of `path`.
///
/// The line equal to `center_line` is flagged. Reading stops as soon as the
/// window has been passed, so the cost is proportional to `center_line`, not
/// to the file size. If the file cannot be opened the window is empty; a read
/// error part-way through ends the window early. Non-UTF-8 bytes are replaced.
pub fn load_window(path: &Path, center_line: u32, radius: u32) -> Vec<SourceLine> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::debug!("source window unavailable for {}: {err}", path.display());
            return Vec::new();
        }
    };

    let start = center_line.saturating_sub(radius).max(1);
    let end = center_line.saturating_add(radius);

    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    let mut number = 0u32;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                log::debug!("stopped reading {} at line {number}: {err}", path.display());
                break;
            }
        }
        number += 1;
        if number > end {
            break;
        }
        if number >= start {
            let text = String::from_utf8_lossy(trim_line_ending(&buf)).into_owned();
            lines.push(SourceLine::new(number, text, number == center_line));
        }
    }
    lines
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn numbered_file(count: u32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 1..=count {
            writeln!(file, "line {i}").unwrap();
        }
        file
    }

    #[test]
    fn missing_file_yields_empty_window() {
        let lines = load_window(Path::new("/nonexistent/file.rs"), 10, 2);
        assert!(lines.is_empty());
    }

    #[test]
    fn window_in_middle_of_file() {
        let file = numbered_file(100);
        let lines = load_window(file.path(), 50, 2);
        let numbers: Vec<u32> = lines.iter().map(SourceLine::number).collect();
        assert_eq!(numbers, vec![48, 49, 50, 51, 52]);
        let flagged: Vec<u32> = lines
            .iter()
            .filter(|l| l.is_error())
            .map(SourceLine::number)
            .collect();
        assert_eq!(flagged, vec![50]);
        assert_eq!(lines[2].content(), "line 50");
    }

    #[test]
    fn window_clamps_at_start() {
        let file = numbered_file(100);
        let lines = load_window(file.path(), 1, 2);
        let numbers: Vec<u32> = lines.iter().map(SourceLine::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(lines[0].is_error());
    }

    #[test]
    fn window_clamps_at_end() {
        let file = numbered_file(10);
        let lines = load_window(file.path(), 10, 2);
        let numbers: Vec<u32> = lines.iter().map(SourceLine::number).collect();
        assert_eq!(numbers, vec![8, 9, 10]);
    }

    #[test]
    fn center_past_end_of_file() {
        let file = numbered_file(5);
        let lines = load_window(file.path(), 40, 2);
        assert!(lines.is_empty());
    }

    #[test]
    fn crlf_and_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"first\r\nsec\xffond\nthird").unwrap();
        let lines = load_window(file.path(), 2, 1);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].content(), "first");
        assert_eq!(lines[1].content(), "sec\u{fffd}ond");
        assert_eq!(lines[2].content(), "third");
    }

    #[test]
    fn zero_radius_is_single_line() {
        let file = numbered_file(10);
        let lines = load_window(file.path(), 4, 0);
        assert_eq!(lines, vec![SourceLine::new(4, "line 4", true)]);
    }
}
