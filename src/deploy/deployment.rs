// ABOUTME: Per-service deployment struct parameterized by state marker.
// ABOUTME: Owns the service name, pinned image, and pre-deploy revision snapshot.

use crate::transcript::RevisionRecord;
use crate::types::{ImageRef, ServiceName};

use super::state::Completed;

/// One service's deploy task, parameterized by its current state.
///
/// Owned exclusively by the task that runs it. The revision snapshot is taken
/// before the new revision exists, so retention keeps `keep_revisions` old
/// revisions in addition to the one just deployed.
#[derive(Debug)]
pub struct ServiceDeployment<S> {
    pub(crate) service: ServiceName,
    pub(crate) image: ImageRef,
    pub(crate) revisions: Vec<RevisionRecord>,
    pub(crate) state: S,
}

impl<S> ServiceDeployment<S> {
    pub fn service(&self) -> &ServiceName {
        &self.service
    }

    /// The immutable `repo@digest` reference being deployed.
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Revisions that existed before this deploy, newest first.
    pub fn revisions_before(&self) -> &[RevisionRecord] {
        &self.revisions
    }
}

impl ServiceDeployment<Completed> {
    /// Revisions deleted by retention.
    pub fn deleted_revisions(&self) -> &[RevisionRecord] {
        self.state.deleted()
    }
}
