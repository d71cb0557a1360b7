// ABOUTME: Image repository paths and immutable digest references.
// ABOUTME: Handles registry/project/image paths, the mutable tag form, and repo@digest.

use std::fmt;
use thiserror::Error;

/// Tag pushed by beta releases.
pub const BETA_TAG: &str = "dev";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageRepoError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("invalid character in image repository: {0}")]
    InvalidChar(char),
}

/// Repository path `registryHost/project/image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRepo {
    registry_host: String,
    project: String,
    image: String,
}

impl ImageRepo {
    pub fn new(
        registry_host: &str,
        project: &str,
        image: &str,
    ) -> Result<Self, ParseImageRepoError> {
        // A registry may carry a port; ':' anywhere after it would read as a tag.
        let registry_host = checked("registry host", registry_host, true)?;
        let project = checked("project", project, false)?;
        let image = checked("image", image, false)?;

        Ok(Self {
            registry_host,
            project,
            image,
        })
    }

    pub fn registry_host(&self) -> &str {
        &self.registry_host
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Mutable tag form used for build and push: `repo` or `repo:dev` for beta.
    pub fn tagged(&self, beta: bool) -> String {
        if beta {
            format!("{self}:{BETA_TAG}")
        } else {
            self.to_string()
        }
    }

    /// Pin this repository to a published content digest.
    pub fn at_digest(&self, digest: impl Into<String>) -> ImageRef {
        ImageRef {
            repo: self.clone(),
            digest: digest.into(),
        }
    }
}

fn checked(
    what: &'static str,
    value: &str,
    allow_port: bool,
) -> Result<String, ParseImageRepoError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseImageRepoError::Empty(what));
    }
    if let Some(c) = value.chars().find(|&c| {
        !(c.is_ascii_alphanumeric()
            || matches!(c, '/' | '.' | '-' | '_')
            || (allow_port && c == ':'))
    }) {
        return Err(ParseImageRepoError::InvalidChar(c));
    }
    Ok(value.to_string())
}

impl fmt::Display for ImageRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.registry_host, self.project, self.image)
    }
}

/// Immutable `repo@digest` reference. Only exists after a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    repo: ImageRepo,
    digest: String,
}

impl ImageRef {
    pub fn repo(&self) -> &ImageRepo {
        &self.repo
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repo, self.digest)
    }
}
