use std::{fmt, io::IsTerminal};

use colored::Colorize;
use heft_config::{Config, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    /// Text labels instead of icons.
    pub plain_mode: bool,
    pub use_color: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            plain_mode: false,
            use_color: detect_color(true),
        }
    }
}

impl OutputPreferences {
    pub fn from_config(config: &Config) -> Self {
        Self {
            plain_mode: config.theme == Theme::Plain,
            use_color: detect_color(config.ui_color_enabled),
        }
    }
}

fn detect_color(enabled: bool) -> bool {
    enabled && std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Info,
    Success,
    Warning,
    Error,
}

/// Prints command output to stdout in the configured style.
pub struct Formatter {
    prefs: OutputPreferences,
}

impl Formatter {
    pub fn new(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.apply_style(Style::Header, title));
    }

    pub fn print_info(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Info, message));
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Success, message));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Warning, message));
    }

    /// Errors go to stderr.
    pub fn print_error(&self, message: impl fmt::Display) {
        eprintln!("{}", self.apply_style(Style::Error, message));
    }

    pub fn print_two_column(&self, entries: &[(String, String)]) {
        let label_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, value) in entries {
            println!("  {label:<label_width$}  {value}");
        }
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        match style {
            Style::Success => self.decorate("✔", "OK:", message, style),
            Style::Warning => self.decorate("⚠", "WARNING:", message, style),
            Style::Error => self.decorate("✖", "ERROR:", message, style),
            Style::Header => self.colorize(format!("=== {message} ==="), style),
            Style::Info => message.to_string(),
        }
    }

    fn decorate(
        &self,
        icon: &str,
        plain_label: &str,
        message: impl fmt::Display,
        style: Style,
    ) -> String {
        if self.prefs.plain_mode {
            format!("{plain_label} {message}")
        } else {
            self.colorize(format!("{icon} {message}"), style)
        }
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if !self.prefs.use_color {
            return text;
        }
        match style {
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
            Style::Header => text.bold().to_string(),
            Style::Info => text,
        }
    }
}
