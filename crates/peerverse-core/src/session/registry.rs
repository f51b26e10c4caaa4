//! The client's local list of active sessions and the session it has joined.

use super::factory::{create_session_record, room_identifier};
use super::model::{SessionDraft, SessionRecord};
use crate::error::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The client's own view of sessions it knows about.
///
/// `SessionRegistry` holds:
/// - The active-session list, in insertion order, without duplicate ids
/// - At most one "current" session, the one whose room the viewer has joined
///
/// Every mutation is synchronous. Operations that name an unknown id are
/// no-ops, not errors.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    active: Vec<SessionRecord>,
    current_id: Option<String>,
    max_active: usize,
}

impl SessionRegistry {
    /// Creates an empty registry holding at most `max_active` sessions.
    ///
    /// A bound of 0 is treated as 1.
    pub fn new(max_active: usize) -> Self {
        Self {
            active: Vec::new(),
            current_id: None,
            max_active: max_active.max(1),
        }
    }

    /// Makes `record` the current session, appending it to the active list if
    /// no record with the same id is present.
    ///
    /// Re-starting an id that is already listed only changes "current".
    pub fn start_session(&mut self, record: SessionRecord) {
        let id = record.id.clone();
        if !self.contains(&id) {
            tracing::debug!(
                session_id = %id,
                room_identifier = %record.room_identifier,
                "appending started session"
            );
            self.active.push(record);
        }
        self.current_id = Some(id.clone());
        self.enforce_bound(&id);
    }

    /// Builds a new hosted session from `draft` and appends it.
    ///
    /// "Current" is left untouched. If the derived room identifier is already
    /// listed, the timestamp suffix is bumped by one millisecond until it is
    /// free.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Validation` if any draft field is blank.
    pub fn add_active_session(
        &mut self,
        draft: SessionDraft,
        host_identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionRecord> {
        let mut record = create_session_record(draft, host_identifier, now)?;
        let mut suffix_time = now;
        while self.contains_room(&record.room_identifier) {
            suffix_time += chrono::Duration::milliseconds(1);
            record.room_identifier = room_identifier(&record.title, suffix_time);
        }
        tracing::debug!(
            session_id = %record.id,
            room_identifier = %record.room_identifier,
            "adding active session"
        );
        self.active.push(record.clone());
        self.enforce_bound(&record.id);
        Ok(record)
    }

    /// Removes the record with `id`. Clears "current" if it pointed at it.
    ///
    /// Returns the removed record, or `None` if no such id was listed.
    pub fn remove_active_session(&mut self, id: &str) -> Option<SessionRecord> {
        let index = self.active.iter().position(|s| s.id == id)?;
        let removed = self.active.remove(index);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        tracing::debug!(session_id = %id, "removed active session");
        Some(removed)
    }

    /// Clears "current" without removing the session from the active list.
    pub fn end_session(&mut self) -> Option<String> {
        self.current_id.take()
    }

    /// Returns the current session, if any.
    pub fn current(&self) -> Option<&SessionRecord> {
        let id = self.current_id.as_deref()?;
        self.active.iter().find(|s| s.id == id)
    }

    pub fn current_mut(&mut self) -> Option<&mut SessionRecord> {
        let id = self.current_id.clone()?;
        self.active.iter_mut().find(|s| s.id == id)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    /// Returns the active list in insertion order.
    pub fn active(&self) -> &[SessionRecord] {
        &self.active
    }

    pub fn get(&self, id: &str) -> Option<&SessionRecord> {
        self.active.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.active.iter().any(|s| s.id == id)
    }

    pub fn contains_room(&self, room_identifier: &str) -> bool {
        self.active
            .iter()
            .any(|s| s.room_identifier == room_identifier)
    }

    /// Returns the room identifiers of every active session.
    pub fn room_identifiers(&self) -> HashSet<&str> {
        self.active
            .iter()
            .map(|s| s.room_identifier.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn max_active(&self) -> usize {
        self.max_active
    }

    /// Evicts the oldest sessions until the list fits the bound.
    ///
    /// Neither the current session nor `inserted` is evicted, so the list may
    /// exceed the bound by one.
    fn enforce_bound(&mut self, inserted: &str) {
        while self.active.len() > self.max_active {
            let current = self.current_id.as_deref();
            let Some(index) = self
                .active
                .iter()
                .position(|s| s.id != inserted && Some(s.id.as_str()) != current)
            else {
                break;
            };
            let evicted = self.active.remove(index);
            tracing::info!(
                session_id = %evicted.id,
                room_identifier = %evicted.room_identifier,
                max_active = self.max_active,
                "evicted oldest active session"
            );
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(crate::config::CoordinatorConfig::default().max_active_sessions)
    }
}
