// ABOUTME: Process runner error types with SNAFU pattern.
// ABOUTME: Distinguishes spawn failures from non-zero exits.

use snafu::Snafu;

/// Failure to run an external command to successful completion.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RunnerError {
    #[snafu(display("failed to start `{command}`: {source}"))]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` {}{}", exit_description(*code), output_suffix(output)))]
    Exit {
        command: String,
        code: Option<i32>,
        /// Captured transcript; empty for streamed commands.
        output: String,
    },
}

impl RunnerError {
    /// Captured output attached to a failed command, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunnerError::Exit { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }

    /// Exit code of a failed command, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunnerError::Exit { code, .. } => *code,
            RunnerError::Spawn { .. } => None,
        }
    }
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn output_suffix(output: &str) -> String {
    let trimmed = output.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
