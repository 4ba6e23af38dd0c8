//! `catch classify`: look up the code and hint for a failure message.

use catch_diagnostics::{classify, Classification, Painter};
use owo_colors::Style;

use crate::{ClassifyArgs, GlobalArgs, OutputFormat};

/// Runs the `catch classify` command. Returns exit code 0.
pub fn run(args: &ClassifyArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let classification = classify(&args.message);
    let output = match args.format {
        OutputFormat::Text => format_text(&classification, Painter::new(global.color)),
        OutputFormat::Json => format_json(&classification)?,
    };
    println!("{output}");
    Ok(0)
}

/// `CODE: hint`, with the code highlighted.
fn format_text(classification: &Classification, painter: Painter) -> String {
    format!(
        "{}: {}",
        painter.paint(classification.code, Style::new().bright_red().bold()),
        classification.suggestion
    )
}

fn format_json(classification: &Classification) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "code": classification.code.to_string(),
        "category": classification.code.category,
        "suggestion": classification.suggestion,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_output() {
        let text = format_text(&classify("Connection refused (os error 111)"), Painter::new(false));
        assert_eq!(
            text,
            "NET001: ensure the target service is running, check firewall settings, or verify the address and port"
        );
    }

    #[test]
    fn colored_text_strips_to_plain() {
        let classification = classify("parse error");
        let colored = format_text(&classification, Painter::new(true));
        assert_ne!(colored, format_text(&classification, Painter::new(false)));
        assert_eq!(
            catch_diagnostics::strip_styles(&colored),
            format_text(&classification, Painter::new(false))
        );
    }

    #[test]
    fn json_output() {
        let json = format_json(&classify("something odd")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "GEN000");
        assert_eq!(value["category"], "Generic");
        assert!(value["suggestion"].as_str().unwrap().contains("debug logging"));
    }
}
