pub mod config_service;
pub mod dto;
pub mod identity_service;
pub mod ledger;
pub mod logging;
pub mod paths;

pub use crate::config_service::{ConfigService, PeerverseConfig};
pub use crate::identity_service::{IdentityConfig, StaticIdentityProvider};
pub use crate::ledger::{GatewaySessionLedger, InMemoryLedgerGateway, LedgerGateway};
pub use crate::logging::{LoggingConfig, init_logging};
