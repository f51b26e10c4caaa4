//! Error types for PeerVerse session coordination.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole PeerVerse workspace.
///
/// The variants follow the session error taxonomy: validation failures are
/// returned to the caller, source failures are absorbed into a local-only
/// view, and publish/conference failures are reported to the user.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PeerverseError {
    /// A required session field was missing or blank
    #[error("Validation error: '{field}' is required")]
    Validation { field: String },

    /// The external session source could not be reached or timed out
    #[error("Session source unavailable: {0}")]
    SourceUnavailable(String),

    /// Publishing a hosted session to the external ledger failed
    #[error("Failed to publish session: {0}")]
    Publish(String),

    /// The video-room collaborator reported an error
    #[error("Conference error: {0}")]
    Conference(String),

    /// An externally sourced record did not match the expected shape
    #[error("Malformed session record: {field} - {reason}")]
    MalformedRecord { field: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// The operation was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PeerverseError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for the named field
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Creates a SourceUnavailable error
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable(message.into())
    }

    /// Creates a Publish error
    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish(message.into())
    }

    /// Creates a Conference error
    pub fn conference(message: impl Into<String>) -> Self {
        Self::Conference(message.into())
    }

    /// Creates a MalformedRecord error
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_))
    }

    pub fn is_publish(&self) -> bool {
        matches!(self, Self::Publish(_))
    }

    pub fn is_conference(&self) -> bool {
        matches!(self, Self::Conference(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true when the error should be shown to the user as an
    /// actionable failure rather than only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Publish(_) | Self::Conference(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PeerverseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PeerverseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PeerverseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PeerverseError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (raw collaborator transports report through anyhow)
impl From<anyhow::Error> for PeerverseError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, PeerverseError>`.
pub type Result<T> = std::result::Result<T, PeerverseError>;
