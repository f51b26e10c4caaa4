//! Ledger session record DTO and validation.

use chrono::{DateTime, TimeZone, Utc};
use peerverse_core::error::{PeerverseError, Result};
use peerverse_core::session::SessionRecord;
use serde::{Deserialize, Serialize};

/// A `created_at` value as found on the ledger.
///
/// Chain objects store unix milliseconds, sometimes as a numeric string;
/// records published by this client carry RFC 3339 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedgerTimestamp {
    Millis(i64),
    Text(String),
}

impl LedgerTimestamp {
    fn to_datetime(&self) -> Result<DateTime<Utc>> {
        match self {
            LedgerTimestamp::Millis(ms) => millis_to_datetime(*ms),
            LedgerTimestamp::Text(text) => {
                let text = text.trim();
                if let Ok(ms) = text.parse::<i64>() {
                    return millis_to_datetime(ms);
                }
                DateTime::parse_from_rfc3339(text)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| PeerverseError::malformed("created_at", e.to_string()))
            }
        }
    }
}

fn millis_to_datetime(ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| PeerverseError::malformed("created_at", format!("{ms} is out of range")))
}

/// A session object as stored on the ledger.
///
/// Every field is optional at the serde level so that a record with a missing
/// field is reported as `MalformedRecord` naming that field, instead of a
/// generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSessionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<LedgerTimestamp>,
}

impl LedgerSessionRecord {
    /// Parses and validates a raw ledger object.
    pub fn from_value(value: serde_json::Value) -> Result<SessionRecord> {
        let dto: LedgerSessionRecord = serde_json::from_value(value)
            .map_err(|e| PeerverseError::malformed("record", e.to_string()))?;
        SessionRecord::try_from(dto)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| PeerverseError::malformed(field, "missing"))
}

fn non_blank(field: &'static str, value: Option<String>) -> Result<String> {
    let value = required(field, value)?;
    if value.trim().is_empty() {
        return Err(PeerverseError::malformed(field, "blank"));
    }
    Ok(value)
}

impl TryFrom<LedgerSessionRecord> for SessionRecord {
    type Error = PeerverseError;

    fn try_from(dto: LedgerSessionRecord) -> Result<Self> {
        let id = non_blank("id", dto.id)?;
        let owner = non_blank("owner", dto.owner)?;
        let title = non_blank("title", dto.title)?;
        let room_name = non_blank("room_name", dto.room_name)?;
        if !room_name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(PeerverseError::malformed(
                "room_name",
                format!("'{room_name}' is not lowercase alphanumeric"),
            ));
        }
        let start_time = dto
            .created_at
            .ok_or_else(|| PeerverseError::malformed("created_at", "missing"))?
            .to_datetime()?;

        Ok(SessionRecord {
            id,
            room_identifier: room_name,
            title,
            description: required("description", dto.description)?,
            category: required("category", dto.category)?,
            duration: required("duration", dto.duration)?,
            host_identifier: owner,
            participant_count: 0,
            start_time,
            // Ledger copies are never ours to host; the local copy says otherwise
            is_host: false,
        })
    }
}

impl From<&SessionRecord> for LedgerSessionRecord {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            owner: Some(record.host_identifier.clone()),
            title: Some(record.title.clone()),
            description: Some(record.description.clone()),
            category: Some(record.category.clone()),
            duration: Some(record.duration.clone()),
            room_name: Some(record.room_identifier.clone()),
            created_at: Some(LedgerTimestamp::Text(record.start_time.to_rfc3339())),
        }
    }
}
