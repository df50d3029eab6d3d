//! Terminal output for the diagnostic commands.
//!
//! Human-readable lines with colored status symbols, or one JSON object per
//! line with `--json`. `--quiet` keeps only warnings and errors.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Output settings taken from the global CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Emit machine-readable JSON lines.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn json_line(kind: &str, payload: serde_json::Value) -> String {
    json!({
        "type": kind,
        "payload": payload,
    })
    .to_string()
}

/// Apply output settings. Call once, before printing anything.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Whether JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print the application name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json {
        println!(
            "{}",
            json_line("header", json!({ "app": "tickerbot", "version": version }))
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("{} {}", "tickerbot".bold(), version.dimmed());
}

/// Print a section title.
pub fn section(title: &str) {
    let config = read_config();
    if config.json {
        println!("{}", json_line("section", json!({ "title": title })));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();
    if config.json {
        println!(
            "{}",
            json_line("field", json!({ "label": label, "value": value }))
        );
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {:<28} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if config.json {
        println!("{}", json_line("success", json!({ "message": message })));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    if read_config().json {
        println!("{}", json_line("warning", json!({ "message": message })));
        return;
    }

    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!("{}", json_line("error", json!({ "message": message })));
        return;
    }

    eprintln!("  {} {}", "×".red(), message);
}

/// Print a dimmed hint.
pub fn hint(message: &str) {
    let config = read_config();
    if config.json {
        println!("{}", json_line("hint", json!({ "message": message })));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_only_suppresses_human_output() {
        assert!(regular_output_suppressed(OutputConfig::new(false, true)));
        assert!(!regular_output_suppressed(OutputConfig::new(true, true)));
        assert!(!regular_output_suppressed(OutputConfig::default()));
    }

    #[test]
    fn json_lines_are_tagged() {
        let line = json_line("field", json!({ "label": "pairs", "value": "3" }));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["type"], "field");
        assert_eq!(parsed["payload"]["value"], "3");
    }
}
