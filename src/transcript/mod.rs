// ABOUTME: Pure parsers for the text emitted by docker and gcloud.
// ABOUTME: Push transcripts, revision listings, and image tag JSON.

mod digest;
mod image_tags;
mod revisions;

pub use digest::{DIGEST_MARKER, DigestNotFound, extract_digest};
pub use image_tags::{ImageTagRecord, parse_image_tags};
pub use revisions::{RevisionRecord, parse_revisions};
