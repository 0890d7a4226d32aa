//! Repository capabilities consumed by the use cases.

use async_trait::async_trait;
use common::{ChannelId, GatewayTransactionId};

use crate::channel_config::ChannelConfig;
use crate::error::{ConfigRepoError, RecordRepoError};
use crate::record::TransactionRecord;
use crate::scope::RecordScope;

/// Durable store of [`TransactionRecord`]s.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait TransactionRecordRepo: Send + Sync {
    /// Creates the record if absent, otherwise merges it into the stored one
    /// (see [`TransactionRecord::merge`]). Redelivered events therefore never
    /// destroy previously reported state.
    async fn update_transaction(
        &self,
        scope: &RecordScope,
        record: TransactionRecord,
    ) -> Result<(), RecordRepoError>;

    /// Fetches the record for a gateway transaction.
    ///
    /// Returns None if nothing has been recorded yet.
    async fn get_transaction(
        &self,
        scope: &RecordScope,
        transaction_id: &GatewayTransactionId,
    ) -> Result<Option<TransactionRecord>, RecordRepoError>;
}

/// Source of per-channel gateway configuration.
#[async_trait]
pub trait ChannelConfigRepo: Send + Sync {
    /// Returns the configuration assigned to a channel, if any.
    async fn get_channel_config(
        &self,
        scope: &RecordScope,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelConfig>, ConfigRepoError>;

    /// Stores a configuration for a channel, replacing any previous one.
    async fn save_channel_config(
        &self,
        scope: &RecordScope,
        channel_id: &ChannelId,
        config: ChannelConfig,
    ) -> Result<(), ConfigRepoError>;
}
