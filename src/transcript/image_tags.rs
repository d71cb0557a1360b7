// ABOUTME: Parser for `gcloud container images list-tags --format=json`.
// ABOUTME: Only the digest of each record matters; registry order is kept.

use serde::Deserialize;

/// One entry of a repository's tag listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ImageTagRecord {
    /// Empty when the registry omitted or nulled the field.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub digest: String,
}

impl ImageTagRecord {
    pub fn has_digest(&self) -> bool {
        !self.digest.trim().is_empty()
    }
}

/// Parse the JSON array of tag records, newest first.
pub fn parse_image_tags(json: &str) -> Result<Vec<ImageTagRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
