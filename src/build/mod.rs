// ABOUTME: Build tool selection from an explicit choice or workspace marker files.
// ABOUTME: Maps accepted spellings through a static alias table.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::process::CommandSpec;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported build tool {0:?}")]
pub struct UnsupportedBuildTool(pub String);

/// The fixed set of build tools the pipeline knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTool {
    Pnpm,
    Npm,
    Yarn,
    Go,
    Cargo,
}

/// Accepted spellings, after trimming and lowercasing.
const ALIASES: &[(&str, BuildTool)] = &[
    ("npm", BuildTool::Npm),
    ("node", BuildTool::Npm),
    ("nodejs", BuildTool::Npm),
    ("ts", BuildTool::Npm),
    ("typescript", BuildTool::Npm),
    ("javascript", BuildTool::Npm),
    ("pnpm", BuildTool::Pnpm),
    ("yarn", BuildTool::Yarn),
    ("go", BuildTool::Go),
    ("golang", BuildTool::Go),
    ("rust", BuildTool::Cargo),
    ("cargo", BuildTool::Cargo),
];

/// Marker files in probe order. Earlier entries win when several exist.
const MARKERS: &[(&str, BuildTool)] = &[
    ("pnpm-lock.yaml", BuildTool::Pnpm),
    ("yarn.lock", BuildTool::Yarn),
    ("package-lock.json", BuildTool::Npm),
    ("go.mod", BuildTool::Go),
    ("Cargo.toml", BuildTool::Cargo),
];

const GENERIC_MANIFEST: &str = "package.json";

impl BuildTool {
    /// Tool used when the workspace gives no usable signal.
    pub const DEFAULT: BuildTool = BuildTool::Pnpm;

    /// Resolve the tool for a workspace.
    ///
    /// A non-blank `choice` must be a known alias. A blank one falls back to
    /// [`BuildTool::detect`], which never fails.
    pub fn resolve(choice: &str, workdir: &Path) -> Result<Self, UnsupportedBuildTool> {
        let normalized = choice.trim().to_lowercase();
        if normalized.is_empty() {
            return Ok(Self::detect(workdir));
        }

        ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, tool)| *tool)
            .ok_or(UnsupportedBuildTool(normalized))
    }

    /// Probe the workspace for marker files.
    pub fn detect(workdir: &Path) -> Self {
        if let Some((_, tool)) = MARKERS
            .iter()
            .find(|(file, _)| workdir.join(file).is_file())
        {
            return *tool;
        }

        if workdir.join(GENERIC_MANIFEST).is_file() {
            tracing::debug!("only {GENERIC_MANIFEST} found, using {}", Self::DEFAULT);
        }

        Self::DEFAULT
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildTool::Pnpm => "pnpm",
            BuildTool::Npm => "npm",
            BuildTool::Yarn => "yarn",
            BuildTool::Go => "go",
            BuildTool::Cargo => "cargo",
        }
    }

    /// The build command for this tool, run from `workdir`.
    pub fn command(&self, workdir: &Path) -> CommandSpec {
        let args: &[&str] = match self {
            BuildTool::Pnpm => &["run", "build"],
            BuildTool::Npm => &["run", "build"],
            BuildTool::Yarn => &["build"],
            BuildTool::Go => &["build", "./..."],
            BuildTool::Cargo => &["build", "--release"],
        };
        CommandSpec::new(self.name(), workdir).args(args.iter().copied())
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
