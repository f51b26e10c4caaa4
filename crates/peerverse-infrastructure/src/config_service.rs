//! Configuration file loading.
//!
//! `config.toml` holds three sections:
//!
//! ```toml
//! [sessions]
//! max_active_sessions = 50
//! external_session_ttl_hours = 12
//!
//! [identity]
//! display_name = "Ada"
//!
//! [logging]
//! level = "info"
//! ```

use crate::identity_service::IdentityConfig;
use crate::logging::LoggingConfig;
use crate::paths::PeerversePaths;
use peerverse_core::config::CoordinatorConfig;
use peerverse_core::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerverseConfig {
    #[serde(default)]
    pub sessions: CoordinatorConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reads and writes `config.toml`.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service for the default config location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(PeerversePaths::config_file()?))
    }

    /// Creates a service for an explicit config file (useful for tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// A missing or empty file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Serialization` if the file is not valid TOML
    /// for `PeerverseConfig`, or `PeerverseError::Io` if it cannot be read.
    pub fn load(&self) -> Result<PeerverseConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "config file not found, using defaults");
            return Ok(PeerverseConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(PeerverseConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration atomically (tmp file + rename).
    pub fn save(&self, config: &PeerverseConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(config)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }
}
