//! Session domain module.
//!
//! This module contains the session record, the local registry of sessions,
//! and the contracts for the external collaborators a session touches.
//!
//! # Module Structure
//!
//! - `model`: Core session entity (`SessionRecord`) and host input (`SessionDraft`)
//! - `factory`: Validated construction and room identifier derivation
//! - `registry`: The client's active-session list and current session (`SessionRegistry`)
//! - `repository`: Ledger trait for published sessions (`SessionLedger`)
//! - `conference`: Video-room collaborator contract and lifecycle signals
//! - `notification`: User-facing failure notifications
//!
//! # Usage
//!
//! ```ignore
//! use peerverse_core::session::{SessionDraft, SessionRecord, SessionRegistry};
//! use peerverse_core::session::{SessionLedger, VideoRoom, ConferenceSignal};
//! ```

mod conference;
mod factory;
mod model;
mod notification;
mod registry;
mod repository;

// Re-export public API
pub use conference::{ConferenceSignal, RoomHandoff, VideoRoom};
pub use factory::{create_session_record, room_identifier};
pub use model::{SessionDraft, SessionRecord};
pub use notification::SessionNotification;
pub use registry::SessionRegistry;
pub use repository::SessionLedger;
