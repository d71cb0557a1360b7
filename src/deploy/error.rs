// ABOUTME: Error types for the release pipeline.
// ABOUTME: Stage failures, per-service failures, and their aggregation across the fan-out.

use std::fmt;

use crate::build::{BuildTool, UnsupportedBuildTool};
use crate::process::RunnerError;
use crate::transcript::{DigestNotFound, RevisionRecord};
use crate::types::ServiceName;

/// Sequential stages that run once per release before the fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Build(BuildTool),
    Containerize,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Build(tool) => write!(f, "build project with {tool}"),
            Stage::Containerize => f.write_str("docker build"),
            Stage::Publish => f.write_str("docker push"),
        }
    }
}

/// Step of a single service's deploy task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStage {
    ListRevisions,
    Deploy,
    MigrateTraffic,
    DeleteRevision(RevisionRecord),
    /// The task ended without reporting a result (panic or abort).
    Task,
}

impl fmt::Display for ServiceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStage::ListRevisions => f.write_str("list revisions"),
            ServiceStage::Deploy => f.write_str("deploy service"),
            ServiceStage::MigrateTraffic => f.write_str("update traffic"),
            ServiceStage::DeleteRevision(rev) => write!(f, "delete revision {rev}"),
            ServiceStage::Task => f.write_str("deploy task"),
        }
    }
}

/// A failure inside one service's deploy task. Never cancels sibling tasks.
#[derive(Debug, thiserror::Error)]
#[error("{stage} for {service}: {source}")]
pub struct ServiceFailure {
    pub service: ServiceName,
    pub stage: ServiceStage,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl ServiceFailure {
    pub fn new(
        service: &ServiceName,
        stage: ServiceStage,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            service: service.clone(),
            stage,
            source: source.into(),
        }
    }
}

/// Failures collected from the fan-out. Empty means every service succeeded.
#[derive(Debug, Default)]
pub struct OutcomeSet {
    failures: Vec<ServiceFailure>,
}

impl OutcomeSet {
    pub fn with_capacity(services: usize) -> Self {
        Self {
            failures: Vec::with_capacity(services),
        }
    }

    pub fn push(&mut self, failure: ServiceFailure) {
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ServiceFailure] {
        &self.failures
    }

    /// Names of the services that failed, in collection order.
    pub fn failed_services(&self) -> impl Iterator<Item = &ServiceName> {
        self.failures.iter().map(|f| &f.service)
    }
}

impl fmt::Display for OutcomeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

/// Errors that end a release run.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error(transparent)]
    UnsupportedBuildTool(#[from] UnsupportedBuildTool),

    /// Build, containerize or publish failed; nothing was deployed.
    #[error("{stage}: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: RunnerError,
    },

    /// The push succeeded but its transcript named no digest.
    #[error("parse digest: {source}\n{transcript}")]
    DigestNotFound {
        #[source]
        source: DigestNotFound,
        transcript: String,
    },

    /// One or more services failed after the join.
    #[error("{0}")]
    ServicesFailed(OutcomeSet),

    #[error("list image tags: {0}")]
    ImageTagListFailed(#[source] RunnerError),

    #[error("parse image tags json: {0}")]
    ImageTagParseFailed(#[source] serde_json::Error),

    #[error("delete image {reference}: {source}")]
    ImageDeleteFailed {
        reference: String,
        #[source]
        source: RunnerError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseErrorKind {
    UnsupportedBuildTool,
    StageFailed,
    DigestNotFound,
    ServiceDeployFailed,
    ImageTagListFailed,
    ImageTagParseFailed,
    ImageDeleteFailed,
}

impl ReleaseError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReleaseErrorKind {
        match self {
            ReleaseError::UnsupportedBuildTool(_) => ReleaseErrorKind::UnsupportedBuildTool,
            ReleaseError::StageFailed { .. } => ReleaseErrorKind::StageFailed,
            ReleaseError::DigestNotFound { .. } => ReleaseErrorKind::DigestNotFound,
            ReleaseError::ServicesFailed(_) => ReleaseErrorKind::ServiceDeployFailed,
            ReleaseError::ImageTagListFailed(_) => ReleaseErrorKind::ImageTagListFailed,
            ReleaseError::ImageTagParseFailed(_) => ReleaseErrorKind::ImageTagParseFailed,
            ReleaseError::ImageDeleteFailed { .. } => ReleaseErrorKind::ImageDeleteFailed,
        }
    }

    /// The stage that failed, for stage failures.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ReleaseError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Per-service failures, when the fan-out failed.
    pub fn outcomes(&self) -> Option<&OutcomeSet> {
        match self {
            ReleaseError::ServicesFailed(outcomes) => Some(outcomes),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit(command: &str) -> RunnerError {
        RunnerError::Exit {
            command: command.to_string(),
            code: Some(1),
            output: String::new(),
        }
    }

    #[test]
    fn outcome_set_joins_failures_by_line() {
        let mut outcomes = OutcomeSet::with_capacity(2);
        let api = ServiceName::new("api").unwrap();
        let web = ServiceName::new("web").unwrap();
        outcomes.push(ServiceFailure::new(&api, ServiceStage::Deploy, exit("deploy api")));
        outcomes.push(ServiceFailure::new(
            &web,
            ServiceStage::DeleteRevision(RevisionRecord::new("web-001")),
            exit("delete web-001"),
        ));

        assert_eq!(
            outcomes.to_string(),
            "deploy service for api: `deploy api` exited with status 1\n\
             delete revision web-001 for web: `delete web-001` exited with status 1"
        );
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn empty_outcome_set_displays_nothing() {
        let outcomes = OutcomeSet::default();
        assert!(outcomes.is_empty());
        assert_eq!(outcomes.to_string(), "");
    }

    #[test]
    fn kinds_and_stage_accessor() {
        let err = ReleaseError::StageFailed {
            stage: Stage::Build(BuildTool::Go),
            source: exit("go build ./..."),
        };
        assert_eq!(err.kind(), ReleaseErrorKind::StageFailed);
        assert_eq!(err.stage(), Some(Stage::Build(BuildTool::Go)));
        assert!(err.to_string().starts_with("build project with go: "));

        let err = ReleaseError::ServicesFailed(OutcomeSet::default());
        assert_eq!(err.kind(), ReleaseErrorKind::ServiceDeployFailed);
        assert!(err.outcomes().is_some());
        assert!(err.stage().is_none());
    }
}
