// ABOUTME: Release orchestration: the fixed build -> publish -> fan-out -> cleanup pipeline.
// ABOUTME: Per-service deploys use the type state pattern; retention is a pure policy.

mod cleanup;
mod commands;
mod deployment;
mod error;
mod pipeline;
mod retention;
mod state;
mod transitions;

pub use cleanup::{ImageCleanup, cleanup_images};
pub use commands::Commands;
pub use deployment::ServiceDeployment;
pub use error::{
    OutcomeSet, ReleaseError, ReleaseErrorKind, ServiceFailure, ServiceStage, Stage,
};
pub use pipeline::{Release, ReleaseSummary};
pub use retention::prune;
pub use state::{Completed, Deployed, Listed, Migrated};
pub use transitions::deploy_service;
