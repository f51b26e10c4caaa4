//! Session ledger adapter.
//!
//! `GatewaySessionLedger` implements the domain `SessionLedger` on top of a
//! raw `LedgerGateway`: the wallet/RPC plumbing that queries chain objects
//! and submits signed transactions. The adapter owns only the mapping and
//! validation between raw ledger objects and `SessionRecord`.

use crate::dto::LedgerSessionRecord;
use async_trait::async_trait;
use peerverse_core::error::{PeerverseError, Result};
use peerverse_core::session::{SessionLedger, SessionRecord};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// Raw access to the chain, as supplied by the wallet integration.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Queries the session objects visible to `owner` (or to everyone when `None`).
    async fn query_session_objects(&self, owner: Option<&str>) -> anyhow::Result<Vec<Value>>;

    /// Signs and submits a transaction creating a session object from `payload`.
    async fn submit_session(&self, payload: Value) -> anyhow::Result<()>;
}

/// `SessionLedger` backed by a `LedgerGateway`.
///
/// Malformed objects returned by the gateway are logged and skipped; the
/// remaining records are still returned.
pub struct GatewaySessionLedger {
    gateway: Arc<dyn LedgerGateway>,
}

impl GatewaySessionLedger {
    pub fn new(gateway: Arc<dyn LedgerGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl SessionLedger for GatewaySessionLedger {
    async fn fetch_sessions(&self, viewer: Option<&str>) -> Result<Vec<SessionRecord>> {
        let objects = self
            .gateway
            .query_session_objects(viewer)
            .await
            .map_err(|e| PeerverseError::source_unavailable(format!("{e:#}")))?;

        let mut records = Vec::with_capacity(objects.len());
        for object in objects {
            match LedgerSessionRecord::from_value(object) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed ledger session");
                }
            }
        }

        Ok(records)
    }

    async fn publish_session(&self, record: &SessionRecord) -> Result<()> {
        let payload = serde_json::to_value(LedgerSessionRecord::from(record))
            .map_err(|e| PeerverseError::publish(e.to_string()))?;

        self.gateway
            .submit_session(payload)
            .await
            .map_err(|e| PeerverseError::publish(format!("{e:#}")))
    }
}

/// A pass-through gateway that keeps submitted payloads in memory and returns
/// them verbatim on query.
///
/// Useful for local development and tests. Payloads can also be seeded
/// directly to simulate sessions published by other clients.
#[derive(Default)]
pub struct InMemoryLedgerGateway {
    objects: Mutex<Vec<Value>>,
}

impl InMemoryLedgerGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(objects: Vec<Value>) -> Self {
        Self {
            objects: Mutex::new(objects),
        }
    }

    /// Adds a raw object as if another client had published it.
    pub fn insert(&self, object: Value) {
        self.lock().push(object);
    }

    /// Drops every object whose `room_name` equals `room_name`, simulating expiry.
    pub fn expire(&self, room_name: &str) {
        self.lock()
            .retain(|object| object.get("room_name").and_then(Value::as_str) != Some(room_name));
    }

    pub fn objects(&self) -> Vec<Value> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Value>> {
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedgerGateway {
    async fn query_session_objects(&self, _owner: Option<&str>) -> anyhow::Result<Vec<Value>> {
        Ok(self.objects())
    }

    async fn submit_session(&self, payload: Value) -> anyhow::Result<()> {
        self.insert(payload);
        Ok(())
    }
}
