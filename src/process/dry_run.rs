// ABOUTME: Process runner that prints commands instead of executing them.
// ABOUTME: Returns canned transcripts so a full release can be rehearsed.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{CapturedOutput, CommandSpec, ProcessRunner, RunnerError};

/// Placeholder digest reported for rehearsed pushes.
pub const DRY_RUN_DIGEST: &str =
    "sha256:0000000000000000000000000000000000000000000000000000000000000000";

/// Records and prints every command without spawning anything.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    commands: Mutex<Vec<CommandSpec>>,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands seen so far, in the order they were issued.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().clone()
    }

    fn record(&self, spec: &CommandSpec) {
        println!("+ {spec}");
        self.commands.lock().push(spec.clone());
    }

    fn canned_output(spec: &CommandSpec) -> String {
        let args = spec.arguments();
        match (spec.program(), args.first().map(String::as_str)) {
            ("docker", Some("push")) => {
                format!("latest: digest: {DRY_RUN_DIGEST} size: 0\n")
            }
            ("gcloud", _) if args.iter().any(|a| a == "list-tags") => "[]\n".to_string(),
            _ => String::new(),
        }
    }
}

#[async_trait]
impl ProcessRunner for DryRunRunner {
    async fn run_streaming(&self, spec: &CommandSpec) -> Result<(), RunnerError> {
        self.record(spec);
        Ok(())
    }

    async fn run_capture(&self, spec: &CommandSpec) -> Result<CapturedOutput, RunnerError> {
        self.record(spec);
        Ok(CapturedOutput::new(Self::canned_output(spec)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[tokio::test]
    async fn push_returns_placeholder_digest() {
        let runner = DryRunRunner::new();
        let push = CommandSpec::new("docker", Path::new(".")).args(["push", "gcr.io/p/app"]);

        let out = runner.run_capture(&push).await.unwrap();
        assert!(out.combined.contains(DRY_RUN_DIGEST));
        assert_eq!(runner.commands(), vec![push]);
    }

    #[tokio::test]
    async fn tag_listing_is_empty_json_array() {
        let runner = DryRunRunner::new();
        let list = CommandSpec::new("gcloud", Path::new("."))
            .args(["container", "images", "list-tags", "gcr.io/p/app"]);

        let out = runner.run_capture(&list).await.unwrap();
        assert_eq!(out.combined.trim(), "[]");
    }

    #[tokio::test]
    async fn other_captures_are_empty() {
        let runner = DryRunRunner::new();
        let list = CommandSpec::new("gcloud", Path::new("."))
            .args(["run", "revisions", "list", "--service=api"]);

        let out = runner.run_capture(&list).await.unwrap();
        assert!(out.combined.is_empty());
    }
}
