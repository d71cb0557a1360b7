// ABOUTME: Tests for the per-service type state deployment.
// ABOUTME: Steps a ServiceDeployment through each transition with a scripted runner.

mod support;

use rollout::deploy::{
    Completed, Deployed, Listed, Migrated, ServiceDeployment, ServiceStage, deploy_service,
};
use rollout::types::{ImageRepo, ServiceName};
use std::mem::size_of;
use support::{ScriptedRunner, overrides, quiet, release_config};
use tempfile::TempDir;

fn api() -> ServiceName {
    ServiceName::new("api").unwrap()
}

fn pinned() -> rollout::types::ImageRef {
    ImageRepo::new("us.gcr.io", "acme", "app")
        .unwrap()
        .at_digest("sha256:abc123")
}

/// Test: Markers before completion carry no data.
#[test]
fn early_state_markers_are_zero_sized() {
    assert_eq!(size_of::<Listed>(), 0);
    assert_eq!(size_of::<Deployed>(), 0);
    assert_eq!(size_of::<Migrated>(), 0);
    assert!(size_of::<Completed>() > 0, "Completed should hold deleted revisions");
}

/// Test: Each transition keeps the snapshot taken at listing time.
#[tokio::test]
async fn transitions_carry_the_pre_deploy_snapshot() {
    let dir = TempDir::new().unwrap();
    let config = release_config(dir.path(), overrides("api"));
    let runner = ScriptedRunner::new().on("--service=api", "api-3\napi-2\napi-1\n");
    let output = quiet();

    let listed: ServiceDeployment<Listed> =
        ServiceDeployment::list(&runner, &config, api(), pinned())
            .await
            .unwrap();
    let names: Vec<_> = listed.revisions_before().iter().map(|r| r.name()).collect();
    assert_eq!(names, ["api-3", "api-2", "api-1"]);
    assert_eq!(runner.count("run deploy"), 0);

    let deployed = listed.deploy(&runner, &config).await.unwrap();
    assert_eq!(deployed.image(), &pinned());
    assert_eq!(runner.count("update-traffic"), 0);

    let migrated = deployed
        .migrate_traffic(&runner, &config, &output)
        .await
        .unwrap();
    assert_eq!(runner.count("revisions delete"), 0);

    let completed = migrated
        .prune_revisions(&runner, &config, &output)
        .await
        .unwrap();
    assert_eq!(completed.service(), &api());
    assert_eq!(completed.revisions_before().len(), 3);
    let deleted: Vec<_> = completed.deleted_revisions().iter().map(|r| r.name()).collect();
    assert_eq!(deleted, ["api-1"]);
}

/// Test: A failing step names the service and the step.
#[tokio::test]
async fn failure_reports_service_and_stage() {
    let dir = TempDir::new().unwrap();
    let config = release_config(dir.path(), overrides("api"));
    let runner = ScriptedRunner::new().fail("update-traffic api ");

    let failure = deploy_service(&runner, &config, &quiet(), api(), pinned())
        .await
        .unwrap_err();

    assert_eq!(failure.service, api());
    assert_eq!(failure.stage, ServiceStage::MigrateTraffic);
    assert!(failure.to_string().starts_with("update traffic for api: "));
}

/// Test: A service with no revisions yet deploys without deleting anything.
#[tokio::test]
async fn first_deploy_has_nothing_to_prune() {
    let dir = TempDir::new().unwrap();
    let config = release_config(dir.path(), overrides("api"));
    let runner = ScriptedRunner::new();

    let completed = deploy_service(&runner, &config, &quiet(), api(), pinned())
        .await
        .unwrap();

    assert!(completed.revisions_before().is_empty());
    assert!(completed.deleted_revisions().is_empty());
    assert_eq!(
        runner.lines(),
        [
            "gcloud run revisions list --region=us-central1 --service=api --format=value(metadata.name)",
            "gcloud run deploy api --image=us.gcr.io/acme/app@sha256:abc123 --platform=managed --region=us-central1 --project=acme",
            "gcloud run services update-traffic api --to-latest --region=us-central1",
        ]
    );
}
