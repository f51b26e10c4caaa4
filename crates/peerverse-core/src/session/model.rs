//! Session domain model.
//!
//! This module contains the `SessionRecord` entity describing one live
//! tutoring room, and the `SessionDraft` a host fills in to create one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One live tutoring session.
///
/// Records are created either locally, when this client hosts a session, or
/// remotely, when fetched from the session ledger. Descriptive metadata is
/// immutable once set; only `participant_count` changes over a record's life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique session identifier, stable for the session's lifetime
    pub id: String,
    /// Token addressing the underlying video-conferencing room
    pub room_identifier: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Free-form duration label (e.g. "30 min")
    pub duration: String,
    /// Wallet address or display name of whoever started the session
    pub host_identifier: String,
    /// Advisory participant count. Not authoritative.
    #[serde(default)]
    pub participant_count: u32,
    pub start_time: DateTime<Utc>,
    /// True if the viewing client created this session
    #[serde(default)]
    pub is_host: bool,
}

impl SessionRecord {
    /// Returns true when `now - start_time` exceeds `ttl`.
    pub fn is_older_than(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.start_time) > ttl
    }
}

/// User-supplied fields for a new session.
///
/// All four fields are required and must not be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
}

impl SessionDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            duration: duration.into(),
        }
    }
}
