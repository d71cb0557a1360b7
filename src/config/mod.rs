// ABOUTME: Release configuration: optional rollout.yml merged with command-line overrides.
// ABOUTME: Validates everything once and produces the immutable ReleaseConfig.

mod deserialize;

use crate::error::{Error, Result};
use crate::types::{ImageRepo, ServiceName};
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const CONFIG_FILENAME: &str = "rollout.yml";
pub const CONFIG_FILENAME_ALT: &str = "rollout.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".rollout/config.yml";

pub const DEFAULT_KEEP_IMAGES: usize = 10;
pub const DEFAULT_KEEP_REVISIONS: usize = 10;
pub const DEFAULT_PLATFORM: &str = "linux/amd64";

/// Project-level defaults read from `rollout.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "deserialize::deserialize_services_option")]
    pub services: Option<NonEmpty<ServiceName>>,

    #[serde(default)]
    pub project: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub registry_host: Option<String>,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub keep_images: Option<i64>,

    #[serde(default)]
    pub keep_revisions: Option<i64>,

    #[serde(default)]
    pub platform: Option<String>,
}

impl FileConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Look for a config file in `dir`. Absence is not an error.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("using config file {}", path.display());
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }
}

/// Values supplied on the command line. Each one replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub image: Option<String>,
    /// Semicolon separated service list.
    pub services: Option<String>,
    pub beta: bool,
    pub project: Option<String>,
    pub region: Option<String>,
    pub registry_host: Option<String>,
    pub lang: Option<String>,
    pub keep_images: Option<i64>,
    pub keep_revisions: Option<i64>,
    pub platform: Option<String>,
}

/// Everything a release needs, validated and read-only for the whole run.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub repo: ImageRepo,
    pub beta: bool,
    pub services: NonEmpty<ServiceName>,
    /// Explicit build tool choice; empty means detect.
    pub lang: String,
    pub region: String,
    pub platform: String,
    pub workdir: PathBuf,
    pub keep_images: usize,
    pub keep_revisions: usize,
    pub started: Instant,
}

impl ReleaseConfig {
    /// Merge file defaults with overrides and validate the result.
    pub fn build(
        file: FileConfig,
        overrides: Overrides,
        workdir: PathBuf,
        started: Instant,
    ) -> Result<Self> {
        let image = required("--image", overrides.image.or(file.image))?;
        let project = required("--project", overrides.project.or(file.project))?;
        let region = required("--region", overrides.region.or(file.region))?;

        let services = match overrides.services {
            Some(raw) => parse_service_list(&raw)?,
            None => file
                .services
                .ok_or_else(|| Error::InvalidConfig("--svc is required".to_string()))?,
        };

        let keep_images = positive(
            "--keep-images",
            overrides
                .keep_images
                .or(file.keep_images)
                .unwrap_or(DEFAULT_KEEP_IMAGES as i64),
        )?;
        let keep_revisions = positive(
            "--keep-revisions",
            overrides
                .keep_revisions
                .or(file.keep_revisions)
                .unwrap_or(DEFAULT_KEEP_REVISIONS as i64),
        )?;

        let registry_host = overrides
            .registry_host
            .or(file.registry_host)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| infer_registry_host(&region).to_string());

        let repo = ImageRepo::new(&registry_host, &project, &image)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let platform = overrides
            .platform
            .or(file.platform)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string());

        Ok(Self {
            repo,
            beta: overrides.beta,
            services,
            lang: overrides.lang.or(file.lang).unwrap_or_default(),
            region,
            platform,
            workdir,
            keep_images,
            keep_revisions,
            started,
        })
    }
}

/// Split a `;` separated list, dropping blank entries. Order and duplicates are kept.
pub fn split_services(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_service_list(raw: &str) -> Result<NonEmpty<ServiceName>> {
    let names = split_services(raw)
        .iter()
        .map(|s| {
            ServiceName::new(s)
                .map_err(|e| Error::InvalidConfig(format!("invalid service {s:?}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    NonEmpty::from_vec(names)
        .ok_or_else(|| Error::InvalidConfig("no services provided via --svc".to_string()))
}

/// Registry host for a region when none is configured.
pub fn infer_registry_host(region: &str) -> &'static str {
    let region = region.trim().to_lowercase();

    if region.starts_with("asia") {
        "asia.gcr.io"
    } else if region.starts_with("europe") || region.starts_with("eu") {
        "eu.gcr.io"
    } else if region.starts_with("us") {
        "us.gcr.io"
    } else {
        "gcr.io"
    }
}

fn required(flag: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::InvalidConfig(format!("{flag} is required")))
}

fn positive(flag: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| Error::InvalidConfig(format!("{flag} must be >= 1")))
}
