// ABOUTME: Parser for `gcloud run revisions list` output.
// ABOUTME: Keeps the listing's newest-first order untouched.

use std::fmt;

/// A deployed revision, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRecord(String);

impl RevisionRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a revision listing into records, newest first.
///
/// The name is the first column of each non-blank line.
pub fn parse_revisions(listing: &str) -> Vec<RevisionRecord> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(RevisionRecord::new)
        .collect()
}
