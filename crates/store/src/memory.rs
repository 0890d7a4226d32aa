//! In-memory repositories for testing and local runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{ChannelId, GatewayTransactionId};
use tokio::sync::RwLock;

use crate::channel_config::ChannelConfig;
use crate::error::{ConfigRepoError, RecordRepoError};
use crate::record::TransactionRecord;
use crate::repo::{ChannelConfigRepo, TransactionRecordRepo};
use crate::scope::RecordScope;

#[derive(Debug, Default)]
struct RecordState {
    records: HashMap<(RecordScope, GatewayTransactionId), TransactionRecord>,
    fail_on_read: bool,
    fail_on_update: bool,
}

/// In-memory transaction record store.
///
/// Provides the same merge-upsert semantics a durable implementation must.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRecordRepo {
    state: Arc<RwLock<RecordState>>,
}

impl InMemoryTransactionRecordRepo {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures reads to fail.
    pub async fn set_fail_on_read(&self, fail: bool) {
        self.state.write().await.fail_on_read = fail;
    }

    /// Configures updates to fail.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.write().await.fail_on_update = fail;
    }

    /// Returns the number of stored records.
    pub async fn record_count(&self) -> usize {
        self.state.read().await.records.len()
    }
}

#[async_trait]
impl TransactionRecordRepo for InMemoryTransactionRecordRepo {
    async fn update_transaction(
        &self,
        scope: &RecordScope,
        record: TransactionRecord,
    ) -> Result<(), RecordRepoError> {
        let mut state = self.state.write().await;

        if state.fail_on_update {
            return Err(RecordRepoError::UpdateFailed(
                "in-memory store configured to fail".to_string(),
            ));
        }

        let key = (scope.clone(), record.gateway_transaction_id.clone());
        let merged = match state.records.get(&key) {
            Some(existing) => existing.merge(record),
            None => record,
        };
        tracing::debug!(
            transaction_id = %merged.gateway_transaction_id,
            fulfilled = merged.has_reported_fulfillment(),
            "transaction record stored"
        );
        state.records.insert(key, merged);

        Ok(())
    }

    async fn get_transaction(
        &self,
        scope: &RecordScope,
        transaction_id: &GatewayTransactionId,
    ) -> Result<Option<TransactionRecord>, RecordRepoError> {
        let state = self.state.read().await;

        if state.fail_on_read {
            return Err(RecordRepoError::ReadFailed(
                "in-memory store configured to fail".to_string(),
            ));
        }

        Ok(state
            .records
            .get(&(scope.clone(), transaction_id.clone()))
            .cloned())
    }
}

#[derive(Debug, Default)]
struct ConfigState {
    configs: HashMap<(RecordScope, ChannelId), ChannelConfig>,
    fail_on_read: bool,
    fail_on_save: bool,
}

/// In-memory channel configuration provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChannelConfigRepo {
    state: Arc<RwLock<ConfigState>>,
}

impl InMemoryChannelConfigRepo {
    /// Creates a new empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures lookups to fail.
    pub async fn set_fail_on_read(&self, fail: bool) {
        self.state.write().await.fail_on_read = fail;
    }

    /// Configures saves to fail.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }

    /// Returns the number of configured channels.
    pub async fn config_count(&self) -> usize {
        self.state.read().await.configs.len()
    }
}

#[async_trait]
impl ChannelConfigRepo for InMemoryChannelConfigRepo {
    async fn get_channel_config(
        &self,
        scope: &RecordScope,
        channel_id: &ChannelId,
    ) -> Result<Option<ChannelConfig>, ConfigRepoError> {
        let state = self.state.read().await;

        if state.fail_on_read {
            return Err(ConfigRepoError::ReadFailed(
                "in-memory config repo configured to fail".to_string(),
            ));
        }

        Ok(state
            .configs
            .get(&(scope.clone(), channel_id.clone()))
            .cloned())
    }

    async fn save_channel_config(
        &self,
        scope: &RecordScope,
        channel_id: &ChannelId,
        config: ChannelConfig,
    ) -> Result<(), ConfigRepoError> {
        let mut state = self.state.write().await;

        if state.fail_on_save {
            return Err(ConfigRepoError::SaveFailed(
                "in-memory config repo configured to fail".to_string(),
            ));
        }

        state
            .configs
            .insert((scope.clone(), channel_id.clone()), config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use common::{AppId, PlatformApiUrl, Secret, ShippingCompanyCode};

    use super::*;

    fn scope() -> RecordScope {
        RecordScope::new(
            PlatformApiUrl::new("https://shop.example.com/graphql/"),
            AppId::new("app-1"),
        )
    }

    fn config() -> ChannelConfig {
        ChannelConfig {
            name: "Main".to_string(),
            merchant_code: "merchant".to_string(),
            terminal_id: "terminal".to_string(),
            secret_code: Secret::new("secret".to_string()),
            use_sandbox: true,
            shipping_company_code: ShippingCompanyCode::new("50000"),
            sku_as_name: false,
        }
    }

    #[tokio::test]
    async fn test_update_creates_then_merges() {
        let repo = InMemoryTransactionRecordRepo::new();
        let id = GatewayTransactionId::new("NP-1");

        repo.update_transaction(&scope(), TransactionRecord::new(id.clone(), None, None))
            .await
            .unwrap();
        repo.update_transaction(
            &scope(),
            TransactionRecord::new(id.clone(), Some("TRACK-1".to_string()), None),
        )
        .await
        .unwrap();
        repo.update_transaction(&scope(), TransactionRecord::new(id.clone(), None, None))
            .await
            .unwrap();

        let stored = repo.get_transaction(&scope(), &id).await.unwrap().unwrap();
        assert_eq!(stored.tracking_number.as_deref(), Some("TRACK-1"));
        assert_eq!(repo.record_count().await, 1);
    }

    #[tokio::test]
    async fn test_records_are_scoped_by_installation() {
        let repo = InMemoryTransactionRecordRepo::new();
        let id = GatewayTransactionId::new("NP-1");
        repo.update_transaction(&scope(), TransactionRecord::new(id.clone(), None, None))
            .await
            .unwrap();

        let other = RecordScope::new(
            PlatformApiUrl::new("https://other.example.com/graphql/"),
            AppId::new("app-1"),
        );
        assert!(repo.get_transaction(&other, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_repo_failures() {
        let repo = InMemoryTransactionRecordRepo::new();
        let id = GatewayTransactionId::new("NP-1");

        repo.set_fail_on_update(true).await;
        let result = repo
            .update_transaction(&scope(), TransactionRecord::new(id.clone(), None, None))
            .await;
        assert!(matches!(result, Err(RecordRepoError::UpdateFailed(_))));

        repo.set_fail_on_read(true).await;
        let result = repo.get_transaction(&scope(), &id).await;
        assert!(matches!(result, Err(RecordRepoError::ReadFailed(_))));
    }

    #[tokio::test]
    async fn test_config_save_and_get() {
        let repo = InMemoryChannelConfigRepo::new();
        let channel = ChannelId::new("channel-1");

        assert!(
            repo.get_channel_config(&scope(), &channel)
                .await
                .unwrap()
                .is_none()
        );

        repo.save_channel_config(&scope(), &channel, config())
            .await
            .unwrap();

        let stored = repo
            .get_channel_config(&scope(), &channel)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, config());
        assert_eq!(repo.config_count().await, 1);
    }

    #[tokio::test]
    async fn test_config_repo_failures() {
        let repo = InMemoryChannelConfigRepo::new();
        let channel = ChannelId::new("channel-1");

        repo.set_fail_on_save(true).await;
        let result = repo.save_channel_config(&scope(), &channel, config()).await;
        assert!(matches!(result, Err(ConfigRepoError::SaveFailed(_))));

        repo.set_fail_on_read(true).await;
        let result = repo.get_channel_config(&scope(), &channel).await;
        assert!(matches!(result, Err(ConfigRepoError::ReadFailed(_))));
    }
}
