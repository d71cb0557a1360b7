// ABOUTME: Release orchestrator: build, containerize, publish, fan out, clean up.
// ABOUTME: Runs one deploy task per service concurrently and aggregates their failures.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::build::BuildTool;
use crate::config::ReleaseConfig;
use crate::output::Output;
use crate::process::ProcessRunner;
use crate::transcript::extract_digest;
use crate::types::{ImageRef, ServiceName};

use super::cleanup::{ImageCleanup, cleanup_images};
use super::commands::Commands;
use super::deployment::ServiceDeployment;
use super::error::{OutcomeSet, ReleaseError, ServiceFailure, ServiceStage, Stage};
use super::state::Completed;
use super::transitions::deploy_service;

/// Result of a successful release.
#[derive(Debug)]
pub struct ReleaseSummary {
    pub tool: BuildTool,
    /// The pinned image every service now runs.
    pub image: ImageRef,
    /// Completed deployments in configured service order.
    pub services: Vec<ServiceDeployment<Completed>>,
    /// `None` for beta releases, which never prune images.
    pub image_cleanup: Option<ImageCleanup>,
}

/// Drives one release through its fixed pipeline.
pub struct Release<R: ?Sized> {
    runner: Arc<R>,
    config: Arc<ReleaseConfig>,
    output: Output,
}

impl<R: ProcessRunner + ?Sized + 'static> Release<R> {
    pub fn new(runner: Arc<R>, config: ReleaseConfig, output: Output) -> Self {
        Self {
            runner,
            config: Arc::new(config),
            output,
        }
    }

    /// Run the whole pipeline. Stops at the first fatal error.
    pub async fn run(&self) -> Result<ReleaseSummary, ReleaseError> {
        let config = &*self.config;
        let commands = Commands::new(config);

        let tool = BuildTool::resolve(&config.lang, &config.workdir)?;
        self.output.step(&format!("Building {tool}..."));
        self.runner
            .run_streaming(&tool.command(&config.workdir))
            .await
            .map_err(|source| ReleaseError::StageFailed {
                stage: Stage::Build(tool),
                source,
            })?;

        let tag = config.repo.tagged(config.beta);

        self.output.step("Building Docker...");
        self.runner
            .run_streaming(&commands.docker_build(&tag))
            .await
            .map_err(|source| ReleaseError::StageFailed {
                stage: Stage::Containerize,
                source,
            })?;

        self.output.step("Uploading image...");
        let push = self
            .runner
            .run_capture(&commands.docker_push(&tag))
            .await
            .map_err(|source| ReleaseError::StageFailed {
                stage: Stage::Publish,
                source,
            })?;

        let digest =
            extract_digest(&push.combined).map_err(|source| ReleaseError::DigestNotFound {
                source,
                transcript: push.combined.clone(),
            })?;
        let image = config.repo.at_digest(digest);
        tracing::info!(%image, "published");

        self.output.step("Deploying...");
        let services = self.deploy_services(&image).await?;

        let image_cleanup = if config.beta {
            tracing::debug!("beta release, keeping all image digests");
            None
        } else {
            self.output.step("Cleaning up image...");
            Some(cleanup_images(&*self.runner, config, &self.output).await?)
        };

        Ok(ReleaseSummary {
            tool,
            image,
            services,
            image_cleanup,
        })
    }

    /// Deploy `image` to every configured service concurrently.
    ///
    /// Waits for all tasks even after one fails, then reports every failure.
    pub async fn deploy_services(
        &self,
        image: &ImageRef,
    ) -> Result<Vec<ServiceDeployment<Completed>>, ReleaseError> {
        let tasks: Vec<(ServiceName, JoinHandle<_>)> = self
            .config
            .services
            .iter()
            .map(|service| {
                let runner = Arc::clone(&self.runner);
                let config = Arc::clone(&self.config);
                let output = self.output;
                let service = service.clone();
                let image = image.clone();
                let handle = tokio::spawn({
                    let service = service.clone();
                    async move { deploy_service(&*runner, &config, &output, service, image).await }
                });
                (service, handle)
            })
            .collect();

        let mut outcomes = OutcomeSet::with_capacity(tasks.len());
        let mut completed = Vec::with_capacity(tasks.len());

        for (service, handle) in tasks {
            match handle.await {
                Ok(Ok(deployment)) => completed.push(deployment),
                Ok(Err(failure)) => outcomes.push(failure),
                Err(join_err) => {
                    outcomes.push(ServiceFailure::new(&service, ServiceStage::Task, join_err))
                }
            }
        }

        if outcomes.is_empty() {
            Ok(completed)
        } else {
            tracing::warn!(failed = outcomes.len(), "service deploys failed");
            Err(ReleaseError::ServicesFailed(outcomes))
        }
    }
}
