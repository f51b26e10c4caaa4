//! Session ledger trait.
//!
//! Defines the contract for the external, ledger-backed store of published
//! sessions.

use super::model::SessionRecord;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract bridge to the external session ledger.
///
/// This trait decouples session coordination from how published sessions are
/// actually stored (a blockchain object store, a remote API, an in-memory
/// fixture).
///
/// # Implementation Notes
///
/// The ledger is treated as at-least-once and eventually consistent:
/// - A published session may take a while to show up in `fetch_sessions`
/// - A fetch may return stale or partial data
/// - Records are never deleted through this interface; they simply stop
///   being returned
#[async_trait]
pub trait SessionLedger: Send + Sync {
    /// Fetches the sessions currently visible on the ledger.
    ///
    /// # Arguments
    ///
    /// * `viewer` - The viewer's wallet address, if authenticated. Implementations
    ///   may use it to scope the query.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<SessionRecord>)`: Well-formed records, in ledger order
    /// - `Err(PeerverseError::SourceUnavailable)`: The ledger could not be reached
    async fn fetch_sessions(&self, viewer: Option<&str>) -> Result<Vec<SessionRecord>>;

    /// Publishes a hosted session so other clients can discover it.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The publish was accepted
    /// - `Err(PeerverseError::Publish)`: Signature rejected, insufficient funds, etc.
    async fn publish_session(&self, record: &SessionRecord) -> Result<()>;
}
