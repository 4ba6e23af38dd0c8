//! `catch codes`: list the classification table.

use catch_diagnostics::{rules, Painter, Rule};
use owo_colors::Style;
use std::fmt::Write;

use crate::{GlobalArgs, OutputFormat};

/// Runs the `catch codes` command. Returns exit code 0.
pub fn run(format: OutputFormat, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let all: Vec<Rule> = rules().collect();
    let output = match format {
        OutputFormat::Text => format_table(&all, Painter::new(global.color)),
        OutputFormat::Json => format_json(&all)?,
    };
    print!("{output}");
    Ok(0)
}

/// One entry per rule, in matching order: the code and its patterns, then
/// the hint indented below.
fn format_table(rules: &[Rule], painter: Painter) -> String {
    let mut out = String::new();
    for rule in rules {
        let patterns = if rule.patterns.is_empty() {
            "(anything else)".to_string()
        } else {
            rule.patterns
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect::<Vec<_>>()
                .join(" or ")
        };
        let code = format!("{:<9}", rule.classification.code.to_string());
        let _ = writeln!(
            out,
            "{}{patterns}",
            painter.paint(code, Style::new().bold())
        );
        let _ = writeln!(
            out,
            "         {}",
            painter.paint(rule.classification.suggestion, Style::new().bright_black())
        );
    }
    out
}

fn format_json(rules: &[Rule]) -> serde_json::Result<String> {
    let entries: Vec<serde_json::Value> = rules
        .iter()
        .map(|rule| {
            serde_json::json!({
                "code": rule.classification.code.to_string(),
                "patterns": rule.patterns,
                "suggestion": rule.classification.suggestion,
            })
        })
        .collect();
    let mut text = serde_json::to_string_pretty(&entries)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_rules_in_order() {
        let all: Vec<Rule> = rules().collect();
        let table = format_table(&all, Painter::new(false));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), all.len() * 2);
        assert_eq!(lines[0], "FS001    \"no such file\"");
        assert!(lines[1].starts_with("         verify the file path exists"));
        assert!(lines[lines.len() - 2].starts_with("GEN000   (anything else)"));
        let net001 = lines.iter().position(|l| l.starts_with("NET001")).unwrap();
        let net002 = lines.iter().position(|l| l.starts_with("NET002")).unwrap();
        assert!(net001 < net002);
    }

    #[test]
    fn multi_pattern_rules() {
        let all: Vec<Rule> = rules().collect();
        let table = format_table(&all, Painter::new(false));
        assert!(table.contains("LOGIC001 \"index out of range\" or \"index out of bounds\""));
    }

    #[test]
    fn json_lists_every_code() {
        let all: Vec<Rule> = rules().collect();
        let value: serde_json::Value = serde_json::from_str(&format_json(&all).unwrap()).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), all.len());
        assert_eq!(entries[0]["code"], "FS001");
        assert_eq!(entries[0]["patterns"][0], "no such file");
        assert_eq!(entries.last().unwrap()["patterns"].as_array().unwrap().len(), 0);
    }
}
