// ABOUTME: Content digest extraction from a registry push transcript.
// ABOUTME: The first line announcing a digest wins.

use thiserror::Error;

/// Token that precedes the digest in `docker push` output.
pub const DIGEST_MARKER: &str = "digest:";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("digest not found in push output")]
pub struct DigestNotFound;

/// Recover the digest of the image just pushed.
///
/// For a line such as `latest: digest: sha256:abc123 size: 528` this returns
/// `sha256:abc123`. Only the text between the first marker and any repeat of it
/// is considered; lines where that text is blank are skipped.
pub fn extract_digest(transcript: &str) -> Result<String, DigestNotFound> {
    transcript
        .lines()
        .filter_map(|line| line.split(DIGEST_MARKER).nth(1))
        .find_map(|segment| segment.split_whitespace().next())
        .map(str::to_string)
        .ok_or(DigestNotFound)
}
