// ABOUTME: Application-wide error types for rollout.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::ReleaseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Release(#[from] ReleaseError),
}

pub type Result<T> = std::result::Result<T, Error>;
