// ABOUTME: Process runner backed by tokio::process.
// ABOUTME: Streams stdio to the terminal or captures combined output.

use std::process::Stdio;

use async_trait::async_trait;
use snafu::ResultExt;
use tokio::process::Command;

use super::error::{ExitSnafu, SpawnSnafu};
use super::{CapturedOutput, CommandSpec, ProcessRunner, RunnerError};

/// Runs commands on the local machine with the inherited environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.arguments()).current_dir(spec.dir());
        cmd
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run_streaming(&self, spec: &CommandSpec) -> Result<(), RunnerError> {
        tracing::debug!(command = %spec, dir = %spec.dir().display(), "running");

        let status = Self::command(spec)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .context(SpawnSnafu {
                command: spec.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            ExitSnafu {
                command: spec.to_string(),
                code: status.code(),
                output: String::new(),
            }
            .fail()
        }
    }

    async fn run_capture(&self, spec: &CommandSpec) -> Result<CapturedOutput, RunnerError> {
        tracing::debug!(command = %spec, dir = %spec.dir().display(), "capturing");

        let output = Self::command(spec)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context(SpawnSnafu {
                command: spec.to_string(),
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(CapturedOutput::new(combined))
        } else {
            ExitSnafu {
                command: spec.to_string(),
                code: output.status.code(),
                output: combined,
            }
            .fail()
        }
    }
}
