// ABOUTME: Process runner capability used for every external tool invocation.
// ABOUTME: Exports the ProcessRunner trait, command specs, and system/dry-run runners.

mod command;
mod dry_run;
mod error;
mod system;

pub use command::{CapturedOutput, CommandSpec};
pub use dry_run::{DRY_RUN_DIGEST, DryRunRunner};
pub use error::RunnerError;
pub use system::SystemRunner;

use async_trait::async_trait;

/// Executes external commands on behalf of the release pipeline.
///
/// Both methods block the calling task until the child process exits.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command with stdio inherited from the controlling session.
    async fn run_streaming(&self, command: &CommandSpec) -> Result<(), RunnerError>;

    /// Run a command and buffer its combined output.
    ///
    /// A non-zero exit is an error carrying the captured output.
    async fn run_capture(&self, command: &CommandSpec) -> Result<CapturedOutput, RunnerError>;
}
