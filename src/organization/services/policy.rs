//! Service layer for reading and updating the organizational policy.

use crate::organization::{
    domain::{OrganizationState, OrganizationalPolicy, PolicyUpdate, SystemConfig},
    ports::{ConfigStore, ConfigStoreError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for policy operations.
#[derive(Debug, Error)]
pub enum PolicyServiceError {
    /// Saving the updated configuration failed.
    #[error(transparent)]
    Store(#[from] ConfigStoreError),
}

/// Result type for policy service operations.
pub type PolicyServiceResult<T> = Result<T, PolicyServiceError>;

/// Loads configuration and applies explicit policy updates.
#[derive(Clone)]
pub struct PolicyService<S>
where
    S: ConfigStore,
{
    store: Arc<S>,
}

impl<S> PolicyService<S>
where
    S: ConfigStore,
{
    /// Creates a new policy service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the stored configuration, or the defaults when the store is
    /// empty, unreadable or malformed.
    pub async fn current_config(&self) -> SystemConfig {
        match self.store.load().await {
            Ok(Some(config)) => config,
            Ok(None) => SystemConfig::default(),
            Err(err) => {
                tracing::warn!(error = %err, "falling back to default organization configuration");
                SystemConfig::default()
            }
        }
    }

    /// Returns the policy currently in effect.
    pub async fn current_policy(&self) -> OrganizationalPolicy {
        self.current_config().await.autonomy
    }

    /// Builds an organization state snapshot from the current configuration.
    pub async fn organization_state(&self) -> OrganizationState {
        OrganizationState::from_config(&self.current_config().await)
    }

    /// Merges `update` into the policy and persists the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyServiceError::Store`] when the configuration cannot be
    /// saved.
    pub async fn update_policy(
        &self,
        update: PolicyUpdate,
    ) -> PolicyServiceResult<OrganizationalPolicy> {
        let mut config = self.current_config().await;
        config.autonomy = config.autonomy.merged(update);
        self.store.save(&config).await?;
        tracing::info!(
            max_tasks_per_day = config.autonomy.max_tasks_per_day,
            max_budget_per_task = config.autonomy.max_budget_per_task,
            "organizational policy updated"
        );
        Ok(config.autonomy)
    }
}
