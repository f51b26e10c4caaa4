//! Identity provider backed by configuration.

use peerverse_core::identity::IdentityProvider;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// The `[identity]` section of the config file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    #[serde(default = "default_display_name")]
    pub display_name: String,
    /// Wallet address, when already known
    #[serde(default)]
    pub address: Option<String>,
}

fn default_display_name() -> String {
    "Guest".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            address: None,
        }
    }
}

/// An `IdentityProvider` whose address can be swapped when the wallet
/// connects or disconnects.
pub struct StaticIdentityProvider {
    display_name: String,
    address: RwLock<Option<String>>,
}

impl StaticIdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            display_name: config.display_name,
            address: RwLock::new(config.address),
        }
    }

    /// Records the connected wallet address, or `None` on disconnect.
    pub fn set_address(&self, address: Option<String>) {
        let mut guard = self
            .address
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = address;
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_address(&self) -> Option<String> {
        self.address
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
    }
}
