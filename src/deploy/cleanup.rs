// ABOUTME: Image digest cleanup run once after every service has deployed.
// ABOUTME: Keeps the newest digests and force-deletes the rest, stopping at the first failure.

use crate::config::ReleaseConfig;
use crate::output::Output;
use crate::process::ProcessRunner;
use crate::transcript::parse_image_tags;

use super::commands::Commands;
use super::error::ReleaseError;
use super::retention::prune;

/// What an image cleanup pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCleanup {
    /// Deleted `repo@digest` references, in deletion order.
    pub deleted: Vec<String>,
    /// Records past the retention window that had no digest.
    pub skipped: usize,
}

/// Delete image digests beyond `keep_images`, newest first as listed by the registry.
///
/// Records without a digest are skipped. Any listing, parsing or deletion
/// failure ends the pass; deploys that already happened are left in place.
pub async fn cleanup_images<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &ReleaseConfig,
    output: &Output,
) -> Result<ImageCleanup, ReleaseError> {
    let commands = Commands::new(config);
    let repo = &config.repo;

    let listing = runner
        .run_capture(&commands.list_image_tags(repo))
        .await
        .map_err(ReleaseError::ImageTagListFailed)?;

    let records = parse_image_tags(&listing.combined).map_err(ReleaseError::ImageTagParseFailed)?;

    let mut result = ImageCleanup::default();
    for record in prune(&records, config.keep_images) {
        if !record.has_digest() {
            tracing::warn!("skipping image tag record without digest in {repo}");
            result.skipped += 1;
            continue;
        }

        let reference = repo.at_digest(record.digest.trim()).to_string();
        output.step(&format!("Deleting {reference}..."));
        runner
            .run_streaming(&commands.delete_image(&reference))
            .await
            .map_err(|source| ReleaseError::ImageDeleteFailed {
                reference: reference.clone(),
                source,
            })?;
        output.step(&format!("Deleted {reference}."));
        result.deleted.push(reference);
    }

    Ok(result)
}
