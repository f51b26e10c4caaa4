//! Application layer for PeerVerse.
//!
//! This crate provides the use cases that coordinate the session domain with
//! its external collaborators (session ledger, video room, identity).

pub mod session;
pub mod session_coordinator;

pub use session::{PublishHandle, SessionReconciler};
pub use session_coordinator::{HostedSession, SessionCoordinator};
