//! Identity collaborator.
//!
//! The wallet/account layer is owned elsewhere; session coordination only
//! needs to know who the viewer is.

/// Supplies the viewing client's identity.
///
/// Implementations may be backed by a wallet connection, an OAuth login or a
/// static configuration. Caching the last known address is the
/// implementation's concern.
pub trait IdentityProvider: Send + Sync {
    /// Returns the current wallet/account address, or `None` when the viewer
    /// is not authenticated.
    fn current_address(&self) -> Option<String>;

    /// Returns the name shown to other participants in a video room.
    fn display_name(&self) -> String;

    /// Returns the identifier recorded as a session's host.
    ///
    /// This is the wallet address when one is available, otherwise the
    /// display name.
    fn host_identifier(&self) -> String {
        self.current_address()
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| self.display_name())
    }
}
