// ABOUTME: Test support utilities.
// ABOUTME: Scripted process runner and release config helpers for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rollout::config::{FileConfig, Overrides, ReleaseConfig};
use rollout::output::{Output, OutputMode};
use rollout::process::{CapturedOutput, CommandSpec, ProcessRunner, RunnerError};
use std::path::Path;
use std::sync::Once;
use std::time::Instant;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("rollout=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const PUSH_TRANSCRIPT: &str = "\
The push refers to repository [gcr.io/acme/app]
5f70bf18a086: Layer already exists
latest: digest: sha256:abc123 size: 528
";

pub const IMAGE: &str = "us.gcr.io/acme/app";

#[derive(Debug, Clone)]
enum Response {
    Output(String),
    Fail { code: i32, output: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub line: String,
    pub streamed: bool,
}

/// In-memory runner answering commands by substring rules.
///
/// The most recently added rule whose pattern occurs in the command line
/// decides the response; unmatched commands succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, Response)>,
    log: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// A runner whose push reports `sha256:abc123` and whose registry lists no tags.
    pub fn new() -> Self {
        Self::default()
            .on("docker push", PUSH_TRANSCRIPT)
            .on("list-tags", "[]")
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn on(mut self, pattern: &str, output: &str) -> Self {
        self.rules
            .push((pattern.to_string(), Response::Output(output.to_string())));
        self
    }

    pub fn fail(mut self, pattern: &str) -> Self {
        self.rules.push((
            pattern.to_string(),
            Response::Fail {
                code: 1,
                output: String::new(),
            },
        ));
        self
    }

    pub fn fail_with(mut self, pattern: &str, output: &str) -> Self {
        self.rules.push((
            pattern.to_string(),
            Response::Fail {
                code: 1,
                output: output.to_string(),
            },
        ));
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.log.lock().iter().map(|i| i.line.clone()).collect()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.log.lock().clone()
    }

    pub fn ran(&self, pattern: &str) -> bool {
        self.count(pattern) > 0
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.log
            .lock()
            .iter()
            .filter(|i| i.line.contains(pattern))
            .count()
    }

    /// Position of the first command containing `pattern`.
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.log.lock().iter().position(|i| i.line.contains(pattern))
    }

    fn respond(&self, spec: &CommandSpec, streamed: bool) -> Result<String, RunnerError> {
        let line = spec.to_string();
        self.log.lock().push(Invocation {
            line: line.clone(),
            streamed,
        });

        let response = self
            .rules
            .iter()
            .rev()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or(Response::Output(String::new()));

        match response {
            Response::Output(output) => Ok(output),
            Response::Fail { code, output } => Err(RunnerError::Exit {
                command: line,
                code: Some(code),
                output,
            }),
        }
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run_streaming(&self, spec: &CommandSpec) -> Result<(), RunnerError> {
        self.respond(spec, true).map(|_| ())
    }

    async fn run_capture(&self, spec: &CommandSpec) -> Result<CapturedOutput, RunnerError> {
        self.respond(spec, false).map(CapturedOutput::new)
    }
}

/// Release settings for tests; build tool pinned to pnpm.
pub fn overrides(services: &str) -> Overrides {
    Overrides {
        image: Some("app".to_string()),
        services: Some(services.to_string()),
        project: Some("acme".to_string()),
        region: Some("us-central1".to_string()),
        lang: Some("pnpm".to_string()),
        keep_images: Some(2),
        keep_revisions: Some(2),
        ..Default::default()
    }
}

pub fn release_config(dir: &Path, overrides: Overrides) -> ReleaseConfig {
    ReleaseConfig::build(
        FileConfig::default(),
        overrides,
        dir.to_path_buf(),
        Instant::now(),
    )
    .unwrap()
}

pub fn quiet() -> Output {
    Output::new(OutputMode::Quiet, Instant::now())
}
