// ABOUTME: Command lines for docker and gcloud used by the release pipeline.
// ABOUTME: Flag spelling lives here; parsing and orchestration live elsewhere.

use crate::config::ReleaseConfig;
use crate::process::CommandSpec;
use crate::transcript::RevisionRecord;
use crate::types::{ImageRef, ImageRepo, ServiceName};

/// Builds the external commands for one release configuration.
#[derive(Debug, Clone, Copy)]
pub struct Commands<'a> {
    config: &'a ReleaseConfig,
}

impl<'a> Commands<'a> {
    pub fn new(config: &'a ReleaseConfig) -> Self {
        Self { config }
    }

    fn docker(&self) -> CommandSpec {
        CommandSpec::new("docker", &self.config.workdir)
    }

    fn gcloud(&self) -> CommandSpec {
        CommandSpec::new("gcloud", &self.config.workdir)
    }

    fn region_flag(&self) -> String {
        format!("--region={}", self.config.region)
    }

    pub fn docker_build(&self, tag: &str) -> CommandSpec {
        self.docker()
            .args(["build", "--platform"])
            .arg(self.config.platform.as_str())
            .args(["-t", tag, "."])
    }

    pub fn docker_push(&self, tag: &str) -> CommandSpec {
        self.docker().args(["push", tag])
    }

    pub fn list_revisions(&self, service: &ServiceName) -> CommandSpec {
        self.gcloud()
            .args(["run", "revisions", "list"])
            .arg(self.region_flag())
            .arg(format!("--service={service}"))
            .arg("--format=value(metadata.name)")
    }

    pub fn deploy(&self, service: &ServiceName, image: &ImageRef) -> CommandSpec {
        self.gcloud()
            .args(["run", "deploy", service.as_str()])
            .arg(format!("--image={image}"))
            .arg("--platform=managed")
            .arg(self.region_flag())
            .arg(format!("--project={}", self.config.repo.project()))
    }

    pub fn update_traffic(&self, service: &ServiceName) -> CommandSpec {
        self.gcloud()
            .args(["run", "services", "update-traffic", service.as_str()])
            .arg("--to-latest")
            .arg(self.region_flag())
    }

    pub fn delete_revision(&self, revision: &RevisionRecord) -> CommandSpec {
        self.gcloud()
            .args(["run", "revisions", "delete", revision.name()])
            .arg(self.region_flag())
            .arg("-q")
    }

    pub fn list_image_tags(&self, repo: &ImageRepo) -> CommandSpec {
        self.gcloud()
            .args(["container", "images", "list-tags"])
            .arg(repo.to_string())
            .arg("--format=json")
    }

    pub fn delete_image(&self, reference: &str) -> CommandSpec {
        self.gcloud()
            .args(["container", "images", "delete", reference])
            .args(["--force-delete-tags", "-q"])
    }
}
