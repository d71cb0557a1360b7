// ABOUTME: Service deployment state markers for the type state pattern.
// ABOUTME: Each marker names the last completed step of one service's task.

use crate::transcript::RevisionRecord;

/// Revisions listed: snapshot taken before the new deploy.
/// Available actions: `deploy()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Listed;

/// New revision created from the pinned image.
/// Available actions: `migrate_traffic()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Deployed;

/// All traffic routed to the newest revision.
/// Available actions: `prune_revisions()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Migrated;

/// Old revisions beyond the retention window deleted.
#[derive(Debug, Clone, Default)]
pub struct Completed {
    pub(crate) deleted: Vec<RevisionRecord>,
}

impl Completed {
    /// Revisions removed by this task, in deletion order.
    pub fn deleted(&self) -> &[RevisionRecord] {
        &self.deleted
    }
}
