//! Persistence contracts for reconciliation state.
//!
//! Two repositories are consumed by the use cases:
//! - [`TransactionRecordRepo`] links a platform order to the gateway
//!   transaction and remembers what has been reported
//! - [`ChannelConfigRepo`] resolves per-channel gateway credentials
//!
//! Everything is scoped by [`RecordScope`] (platform API URL + app id), so one
//! deployment can serve several app installations. The storage technology
//! sits behind the traits; the in-memory implementations here back tests and
//! local runs.

pub mod channel_config;
pub mod error;
pub mod memory;
pub mod record;
pub mod repo;
pub mod scope;

pub use channel_config::ChannelConfig;
pub use error::{ConfigRepoError, RecordRepoError};
pub use memory::{InMemoryChannelConfigRepo, InMemoryTransactionRecordRepo};
pub use record::TransactionRecord;
pub use repo::{ChannelConfigRepo, TransactionRecordRepo};
pub use scope::RecordScope;
