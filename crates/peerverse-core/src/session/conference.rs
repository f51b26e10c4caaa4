//! Video-room collaborator types.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the conferencing capability needs to open a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomHandoff {
    pub room_identifier: String,
    pub display_name: String,
}

/// Lifecycle signals raised by the embedded video widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ConferenceSignal {
    Joined,
    Left,
    ReadyToClose,
    ParticipantJoined,
    ParticipantLeft,
    Error(String),
}

impl ConferenceSignal {
    /// Returns true for signals that mean the viewer has left the room.
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Left | Self::ReadyToClose)
    }
}

/// An externally supplied video-conferencing capability.
///
/// Transport is entirely the implementation's concern. Lifecycle signals are
/// fed back through `SessionCoordinator::handle_conference_signal`.
#[async_trait]
pub trait VideoRoom: Send + Sync {
    /// Hands a room off to the conferencing widget.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Conference` if the widget cannot open the room.
    async fn enter_room(&self, handoff: &RoomHandoff) -> Result<()>;
}
