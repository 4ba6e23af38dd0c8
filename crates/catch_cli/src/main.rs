//! Catch CLI: classify failure messages and preview reports from the command line.
//!
//! Provides `catch classify` to look up the code and hint for a message,
//! `catch codes` to list the classification table, and `catch render` to
//! produce the full report a failure at a given source location would get.

#![warn(missing_docs)]

mod classify;
mod codes;
mod render;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use catch_config::{load_config, load_config_file, ConfigError, EngineConfig, CONFIG_FILE_NAME};
use clap::{Parser, Subcommand, ValueEnum};

/// Catch: rustc-style reports for runtime failures.
#[derive(Parser, Debug)]
#[command(name = "catch", version, about = "Catch failure reporting")]
pub struct Cli {
    /// Log engine internals at debug level to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// When to style output with ANSI colors.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `catch.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of `catch`.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the classification code and hint for a failure message.
    Classify(ClassifyArgs),
    /// List every classification code in matching order.
    Codes {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Render the report for a failure at a source location.
    Render(RenderArgs),
}

/// Arguments for the `catch classify` subcommand.
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// The failure message to classify.
    pub message: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the `catch render` subcommand.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Source file the failure is reported from.
    #[arg(long)]
    pub file: PathBuf,

    /// Line number of the report (1-indexed).
    #[arg(long)]
    pub line: u32,

    /// Column of the report (1-indexed); omitted if unknown.
    #[arg(long, default_value_t = 0)]
    pub column: u32,

    /// The failure message.
    #[arg(short, long)]
    pub message: String,

    /// Context entries as `key=value` (repeatable).
    #[arg(long = "context", value_parser = render::parse_context_entry)]
    pub context: Vec<(String, String)>,
}

/// Color selection for `--color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when standard output is a terminal.
    Auto,
    /// Color even when piped.
    Always,
    /// Plain text only.
    Never,
}

/// Output format for listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminals.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Settings shared by every subcommand.
pub struct GlobalArgs {
    /// Resolved color choice.
    pub color: bool,
    /// The `--config` path, if given.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stdout().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Classify(ref args) => classify::run(args, &global),
        Command::Codes { format } => codes::run(format, &global),
        Command::Render(ref args) => render::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Loads the engine configuration for a command.
///
/// An explicit `--config` path must exist. Otherwise `catch.toml` in the
/// current directory is used if present, and the defaults if not.
pub fn load_engine_config(global: &GlobalArgs) -> Result<EngineConfig, ConfigError> {
    let mut config = match &global.config {
        Some(path) => load_config_file(path)?,
        None if Path::new(CONFIG_FILE_NAME).is_file() => load_config(Path::new("."))?,
        None => EngineConfig::default(),
    };
    config = config.resolved();
    config.use_colors = global.color;
    log::debug!("using configuration {config:?}");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_classify() {
        let cli = Cli::parse_from(["catch", "classify", "connection refused"]);
        match cli.command {
            Command::Classify(ref args) => {
                assert_eq!(args.message, "connection refused");
                assert_eq!(args.format, OutputFormat::Text);
            }
            _ => panic!("expected Classify command"),
        }
    }

    #[test]
    fn parse_classify_json() {
        let cli = Cli::parse_from(["catch", "classify", "timeout", "--format", "json"]);
        match cli.command {
            Command::Classify(ref args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected Classify command"),
        }
    }

    #[test]
    fn parse_codes_default() {
        let cli = Cli::parse_from(["catch", "codes"]);
        match cli.command {
            Command::Codes { format } => assert_eq!(format, OutputFormat::Text),
            _ => panic!("expected Codes command"),
        }
    }

    #[test]
    fn parse_render_with_context() {
        let cli = Cli::parse_from([
            "catch",
            "render",
            "--file",
            "src/main.rs",
            "--line",
            "42",
            "--message",
            "no such file or directory",
            "--context",
            "user_id=42",
            "--context",
            "path=data/in.csv",
        ]);
        match cli.command {
            Command::Render(ref args) => {
                assert_eq!(args.file, PathBuf::from("src/main.rs"));
                assert_eq!(args.line, 42);
                assert_eq!(args.column, 0);
                assert_eq!(args.message, "no such file or directory");
                assert_eq!(
                    args.context,
                    vec![
                        ("user_id".to_string(), "42".to_string()),
                        ("path".to_string(), "data/in.csv".to_string()),
                    ]
                );
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn parse_render_rejects_malformed_context() {
        let result = Cli::try_parse_from([
            "catch", "render", "--file", "a.rs", "--line", "1", "-m", "x", "--context", "novalue",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_render_requires_line() {
        let result = Cli::try_parse_from(["catch", "render", "--file", "a.rs", "-m", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["catch", "--verbose", "--color", "never", "codes"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_color_always() {
        let cli = Cli::parse_from(["catch", "--color", "always", "codes"]);
        assert_eq!(cli.color, ColorChoice::Always);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["catch", "--config", "/path/to/catch.toml", "codes"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/path/to/catch.toml")));
    }

    #[test]
    fn explicit_config_is_loaded_and_color_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "context_line_radius = 4\nuse_colors = true\n").unwrap();
        let global = GlobalArgs {
            color: false,
            config: Some(path),
        };
        let config = load_engine_config(&global).unwrap();
        assert_eq!(config.context_line_radius, 4);
        assert!(!config.use_colors);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let global = GlobalArgs {
            color: false,
            config: Some(PathBuf::from("/nonexistent/catch.toml")),
        };
        assert!(matches!(
            load_engine_config(&global),
            Err(ConfigError::IoError { .. })
        ));
    }
}
