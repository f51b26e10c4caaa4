//! Data Transfer Objects (DTOs) for the session ledger.
//!
//! These DTOs mirror the field layout of session objects as the ledger stores
//! them. They are private to the infrastructure layer; the validating
//! conversions into `SessionRecord` are the only way ledger data reaches the
//! domain.
//!
//! ### Ledger field mapping
//! - `room_name` → `room_identifier`
//! - `owner` → `host_identifier`
//! - `created_at` → `start_time`

mod ledger_session;

pub use ledger_session::{LedgerSessionRecord, LedgerTimestamp};
