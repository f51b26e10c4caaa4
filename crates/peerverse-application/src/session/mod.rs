//! Session application services.
//!
//! This module contains application-layer helpers used by the
//! `SessionCoordinator`: merging local and ledger views, and tracking
//! background publishes.

mod publisher;
mod reconciler;

pub use publisher::PublishHandle;
pub use reconciler::SessionReconciler;
