// ABOUTME: Output formatting for release progress.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes, timed from the release start.

use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    #[default]
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Seconds between `start` and `now`; zero if `now` is earlier.
pub fn elapsed_secs(now: Instant, start: Instant) -> f64 {
    now.saturating_duration_since(start).as_secs_f64()
}

/// `"<message> (<secs>s)"` with one decimal place.
pub fn format_step(message: &str, secs: f64) -> String {
    format!("{message} ({secs:.1}s)")
}

/// `"Done in <secs>s"` with one decimal place.
pub fn format_done(secs: f64) -> String {
    format!("Done in {secs:.1}s")
}

/// Prints release progress relative to a fixed start instant.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
    started: Instant,
}

impl Output {
    pub fn new(mode: OutputMode, started: Instant) -> Self {
        Self { mode, started }
    }

    /// Seconds since the release started.
    pub fn elapsed_secs(&self) -> f64 {
        elapsed_secs(Instant::now(), self.started)
    }

    /// Print a progress step (suppressed in quiet mode).
    pub fn step(&self, message: &str) {
        let secs = self.elapsed_secs();
        match self.mode {
            OutputMode::Normal => println!("{}", format_step(message, secs)),
            OutputMode::Quiet => {}
            OutputMode::Json => emit_json(&JsonEvent {
                event: "step",
                message,
                elapsed_secs: secs,
            }),
        }
    }

    /// Print the final timing line.
    pub fn done(&self) {
        let secs = self.elapsed_secs();
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{}", format_done(secs)),
            OutputMode::Json => emit_json(&JsonEvent {
                event: "done",
                message: "",
                elapsed_secs: secs,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    elapsed_secs: self.elapsed_secs(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    message: &'a str,
    elapsed_secs: f64,
}

fn emit_json(event: &JsonEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}
