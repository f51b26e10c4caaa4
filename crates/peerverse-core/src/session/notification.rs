use serde::{Deserialize, Serialize};

/// User-facing failures raised by session coordination.
///
/// These are delivered to the host UI. Source degradation is deliberately
/// absent: it is logged, never shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionNotification {
    /// Publishing a hosted session to the ledger failed. The session still
    /// exists locally.
    PublishFailed {
        session_id: String,
        room_identifier: String,
        reason: String,
    },
    /// The video widget reported an error. The session stays current.
    ConferenceError {
        room_identifier: Option<String>,
        message: String,
    },
}
