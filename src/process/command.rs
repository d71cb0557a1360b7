// ABOUTME: Command specification and captured output types.
// ABOUTME: Renders commands as shell-like lines for logs and error messages.

use std::fmt;
use std::path::{Path, PathBuf};

/// An external command: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, dir: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: dir.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Output of a captured command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Stdout followed by stderr.
    pub combined: String,
}

impl CapturedOutput {
    pub fn new(combined: impl Into<String>) -> Self {
        Self {
            combined: combined.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = CommandSpec::new("gcloud", Path::new("/tmp"))
            .args(["run", "deploy", "api"])
            .arg("--region=us-central1");
        assert_eq!(
            cmd.to_string(),
            "gcloud run deploy api --region=us-central1"
        );
    }

    #[test]
    fn display_quotes_args_with_whitespace() {
        let cmd = CommandSpec::new("echo", Path::new(".")).args(["a b", ""]);
        assert_eq!(cmd.to_string(), "echo 'a b' ''");
    }

    #[test]
    fn keeps_working_directory() {
        let cmd = CommandSpec::new("go", Path::new("/work")).args(["build", "./..."]);
        assert_eq!(cmd.dir(), Path::new("/work"));
        assert_eq!(cmd.program(), "go");
        assert_eq!(cmd.arguments(), ["build", "./..."]);
    }
}
