//! Session coordination settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for session coordination.
///
/// Every field has a serde default so a partial `[sessions]` table is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Upper bound on the local active-session list. Oldest non-current
    /// sessions are evicted past this size.
    #[serde(default = "default_max_active_sessions")]
    pub max_active_sessions: usize,
    /// Externally sourced sessions older than this are hidden. 0 disables expiry.
    #[serde(default = "default_external_session_ttl_hours")]
    pub external_session_ttl_hours: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_publish_timeout_secs")]
    pub publish_timeout_secs: u64,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_max_active_sessions() -> usize {
    50
}

fn default_external_session_ttl_hours() -> u64 {
    12
}

fn default_fetch_timeout_secs() -> u64 {
    15
}

fn default_publish_timeout_secs() -> u64 {
    60
}

fn default_refresh_interval_secs() -> u64 {
    30
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_active_sessions: default_max_active_sessions(),
            external_session_ttl_hours: default_external_session_ttl_hours(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            publish_timeout_secs: default_publish_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl CoordinatorConfig {
    /// Returns the external-session TTL, or `None` when expiry is disabled.
    pub fn external_session_ttl(&self) -> Option<chrono::Duration> {
        if self.external_session_ttl_hours == 0 {
            None
        } else {
            i64::try_from(self.external_session_ttl_hours)
                .ok()
                .and_then(chrono::Duration::try_hours)
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        // tokio's interval panics on a zero period
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}
