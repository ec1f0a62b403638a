//! Port for persisting organization configuration.

use crate::organization::domain::SystemConfig;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration store operations.
pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

/// Persistence contract for [`SystemConfig`].
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Loads the stored configuration.
    ///
    /// Returns `None` when nothing has been stored yet.
    async fn load(&self) -> ConfigStoreResult<Option<SystemConfig>>;

    /// Overwrites the stored configuration.
    async fn save(&self, config: &SystemConfig) -> ConfigStoreResult<()>;
}

/// Errors returned by configuration stores.
#[derive(Debug, Clone, Error)]
pub enum ConfigStoreError {
    /// Stored configuration could not be decoded.
    #[error("malformed configuration: {0}")]
    Malformed(String),

    /// Persistence-layer failure.
    #[error("configuration persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
