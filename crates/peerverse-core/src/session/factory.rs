//! Construction of locally hosted session records.

use super::model::{SessionDraft, SessionRecord};
use crate::error::{PeerverseError, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Prefix used when a title contains no ASCII alphanumerics at all.
const FALLBACK_ROOM_PREFIX: &str = "session";

/// Derives a video-room identifier from a title and a creation time.
///
/// The title is stripped to its ASCII alphanumerics and lowercased, then the
/// creation timestamp in unix milliseconds is appended. For example
/// `"React Basics"` created at `1700000000000` becomes
/// `"reactbasics1700000000000"`.
pub fn room_identifier(title: &str, created_at: DateTime<Utc>) -> String {
    let mut prefix: String = title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if prefix.is_empty() {
        prefix.push_str(FALLBACK_ROOM_PREFIX);
    }
    format!("{}{}", prefix, created_at.timestamp_millis())
}

/// Builds a well-formed record from user input.
///
/// # Arguments
///
/// * `draft` - The user-supplied descriptive fields
/// * `host_identifier` - Who is starting the session
/// * `now` - Creation time, used for both `start_time` and the room identifier
///
/// # Errors
///
/// Returns `PeerverseError::Validation` naming the first blank field.
pub fn create_session_record(
    draft: SessionDraft,
    host_identifier: impl Into<String>,
    now: DateTime<Utc>,
) -> Result<SessionRecord> {
    for (field, value) in [
        ("title", &draft.title),
        ("description", &draft.description),
        ("category", &draft.category),
        ("duration", &draft.duration),
    ] {
        if value.trim().is_empty() {
            return Err(PeerverseError::validation(field));
        }
    }

    let room_identifier = room_identifier(&draft.title, now);

    Ok(SessionRecord {
        id: Uuid::new_v4().to_string(),
        room_identifier,
        title: draft.title,
        description: draft.description,
        category: draft.category,
        duration: draft.duration,
        host_identifier: host_identifier.into(),
        participant_count: 0,
        start_time: now,
        is_host: true,
    })
}
