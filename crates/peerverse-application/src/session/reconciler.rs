//! Merging of local and ledger-sourced sessions into one display list.

use chrono::{DateTime, Utc};
use peerverse_core::session::SessionRecord;
use std::collections::HashSet;

/// Produces the single ordered list of sessions shown to the viewer.
///
/// The merge is:
/// 1. Local active sessions, in insertion order
/// 2. External sessions whose room identifier is not already shown, in
///    ledger order
///
/// A local copy always wins over an external record for the same room, since
/// it carries the accurate `is_host` flag and may be fresher.
#[derive(Debug, Clone, Default)]
pub struct SessionReconciler {
    /// External records older than this are dropped. `None` keeps everything.
    external_ttl: Option<chrono::Duration>,
}

impl SessionReconciler {
    pub fn new(external_ttl: Option<chrono::Duration>) -> Self {
        Self { external_ttl }
    }

    /// Merges `local` and `external` into the display list.
    ///
    /// Room identifiers in the result are unique: any record whose room is
    /// already shown, whether local or external, is skipped. The first
    /// occurrence wins.
    pub fn reconcile(
        &self,
        local: &[SessionRecord],
        external: &[SessionRecord],
        now: DateTime<Utc>,
    ) -> Vec<SessionRecord> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(local.len() + external.len());
        let mut merged = Vec::with_capacity(local.len() + external.len());

        for record in local {
            if seen.insert(record.room_identifier.as_str()) {
                merged.push(record.clone());
            }
        }

        for record in external {
            if self.is_expired(record, now) {
                tracing::trace!(
                    room_identifier = %record.room_identifier,
                    "hiding expired external session"
                );
                continue;
            }
            if seen.insert(record.room_identifier.as_str()) {
                merged.push(record.clone());
            }
        }

        merged
    }

    fn is_expired(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        self.external_ttl
            .is_some_and(|ttl| record.is_older_than(ttl, now))
    }
}
