// ABOUTME: State transition methods for one service's deploy task.
// ABOUTME: list -> deploy -> migrate traffic -> prune revisions, strictly in order.

use crate::config::ReleaseConfig;
use crate::output::Output;
use crate::process::ProcessRunner;
use crate::transcript::parse_revisions;
use crate::types::{ImageRef, ServiceName};

use super::commands::Commands;
use super::deployment::ServiceDeployment;
use super::error::{ServiceFailure, ServiceStage};
use super::retention::prune;
use super::state::{Completed, Deployed, Listed, Migrated};

impl<S> ServiceDeployment<S> {
    fn transition<T>(self, state: T) -> ServiceDeployment<T> {
        ServiceDeployment {
            service: self.service,
            image: self.image,
            revisions: self.revisions,
            state,
        }
    }

    fn failure(&self, stage: ServiceStage, source: crate::process::RunnerError) -> ServiceFailure {
        ServiceFailure::new(&self.service, stage, source)
    }
}

// =============================================================================
// (start) -> Listed
// =============================================================================

impl ServiceDeployment<Listed> {
    /// Snapshot the service's existing revisions before deploying.
    pub async fn list<R: ProcessRunner + ?Sized>(
        runner: &R,
        config: &ReleaseConfig,
        service: ServiceName,
        image: ImageRef,
    ) -> Result<Self, ServiceFailure> {
        let listing = runner
            .run_capture(&Commands::new(config).list_revisions(&service))
            .await
            .map_err(|e| ServiceFailure::new(&service, ServiceStage::ListRevisions, e))?;

        let revisions = parse_revisions(&listing.combined);
        tracing::debug!(%service, count = revisions.len(), "listed revisions");

        Ok(ServiceDeployment {
            service,
            image,
            revisions,
            state: Listed,
        })
    }

    /// Deploy the pinned image, creating a new revision.
    pub async fn deploy<R: ProcessRunner + ?Sized>(
        self,
        runner: &R,
        config: &ReleaseConfig,
    ) -> Result<ServiceDeployment<Deployed>, ServiceFailure> {
        let command = Commands::new(config).deploy(&self.service, &self.image);
        match runner.run_streaming(&command).await {
            Ok(()) => Ok(self.transition(Deployed)),
            Err(e) => Err(self.failure(ServiceStage::Deploy, e)),
        }
    }
}

// =============================================================================
// Deployed -> Migrated
// =============================================================================

impl ServiceDeployment<Deployed> {
    /// Route all traffic to the newest revision.
    pub async fn migrate_traffic<R: ProcessRunner + ?Sized>(
        self,
        runner: &R,
        config: &ReleaseConfig,
        output: &Output,
    ) -> Result<ServiceDeployment<Migrated>, ServiceFailure> {
        output.step(&format!("Migrating {}...", self.service));

        let command = Commands::new(config).update_traffic(&self.service);
        if let Err(e) = runner.run_streaming(&command).await {
            return Err(self.failure(ServiceStage::MigrateTraffic, e));
        }

        output.step(&format!("Deployed {}.", self.service));
        Ok(self.transition(Migrated))
    }
}

// =============================================================================
// Migrated -> Completed
// =============================================================================

impl ServiceDeployment<Migrated> {
    /// Delete revisions outside the retention window of the pre-deploy snapshot.
    ///
    /// Deletes in snapshot order and stops at the first failure.
    pub async fn prune_revisions<R: ProcessRunner + ?Sized>(
        self,
        runner: &R,
        config: &ReleaseConfig,
        output: &Output,
    ) -> Result<ServiceDeployment<Completed>, ServiceFailure> {
        let commands = Commands::new(config);
        let mut deleted = Vec::new();

        for revision in prune(&self.revisions, config.keep_revisions) {
            output.step(&format!("Deleting {revision}..."));
            if let Err(e) = runner.run_streaming(&commands.delete_revision(revision)).await {
                return Err(self.failure(ServiceStage::DeleteRevision(revision.clone()), e));
            }
            output.step(&format!("Deleted {revision}."));
            deleted.push(revision.clone());
        }

        Ok(self.transition(Completed { deleted }))
    }
}

/// Run every step of one service's deploy task.
pub async fn deploy_service<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &ReleaseConfig,
    output: &Output,
    service: ServiceName,
    image: ImageRef,
) -> Result<ServiceDeployment<Completed>, ServiceFailure> {
    ServiceDeployment::list(runner, config, service, image)
        .await?
        .deploy(runner, config)
        .await?
        .migrate_traffic(runner, config, output)
        .await?
        .prune_revisions(runner, config, output)
        .await
}
