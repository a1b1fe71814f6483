//! CLI presenter for output formatting

use std::time::Duration as StdDuration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::{ConvertCallbacks, Stage};

/// Presenter for CLI output formatting.
///
/// Results go to stdout; status and errors go to stderr.
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(StdDuration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Callbacks that mirror pipeline stages on the active spinner
    pub fn stage_callbacks(&self) -> ConvertCallbacks {
        let Some(spinner) = self.spinner.clone() else {
            return ConvertCallbacks::default();
        };
        let end_spinner = spinner.clone();

        ConvertCallbacks {
            on_stage_start: Some(Box::new(move |stage| {
                spinner.set_message(stage_message(stage).to_string());
            })),
            on_stage_end: Some(Box::new(move |stage, elapsed| {
                end_spinner.println(format!(
                    "{} {} ({})",
                    "✓".green(),
                    stage_done_message(stage),
                    format_elapsed(elapsed)
                ));
            })),
        }
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one row of the supported formats table
    pub fn format_row(&self, name: &str, mime: &str, backend: &str) {
        println!("{}", format_row(name, mime, backend));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn stage_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Decode => "Decoding recording...",
        Stage::Encode => "Encoding...",
        Stage::Transcode => "Transcoding...",
    }
}

fn stage_done_message(stage: Stage) -> &'static str {
    match stage {
        Stage::Decode => "Decoded",
        Stage::Encode => "Encoded",
        Stage::Transcode => "Transcoded",
    }
}

/// Format a stage time as `850ms` or `1.2s`
pub fn format_elapsed(elapsed: StdDuration) -> String {
    if elapsed.as_millis() < 1000 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

fn format_row(name: &str, mime: &str, backend: &str) -> String {
    format!("{:<5} {:<10} {}", name, mime, backend)
}
