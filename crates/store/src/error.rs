//! Repository error types.

use thiserror::Error;

/// Errors from the transaction record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordRepoError {
    /// Reading a record failed.
    #[error("Failed to read transaction record: {0}")]
    ReadFailed(String),

    /// Creating or updating a record failed.
    #[error("Failed to update transaction record: {0}")]
    UpdateFailed(String),
}

/// Errors from the channel configuration provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigRepoError {
    /// The configuration lookup failed.
    #[error("Failed to read channel configuration: {0}")]
    ReadFailed(String),

    /// Saving a configuration failed.
    #[error("Failed to save channel configuration: {0}")]
    SaveFailed(String),
}
