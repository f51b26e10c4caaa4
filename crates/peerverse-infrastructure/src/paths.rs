//! Path management for PeerVerse configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/peerverse/         # Config directory (platform default)
//! └── config.toml              # Session, identity and logging settings
//! ```

use peerverse_core::error::{PeerverseError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "peerverse";
const CONFIG_FILE: &str = "config.toml";

pub struct PeerversePaths;

impl PeerversePaths {
    /// Returns the PeerVerse configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `PeerverseError::Config` if the platform config directory
    /// cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| PeerverseError::config("Cannot find config directory"))
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
