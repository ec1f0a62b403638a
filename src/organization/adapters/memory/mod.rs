//! In-memory organization adapters for tests and embedded use.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::organization::{
    domain::{Employee, SystemConfig},
    ports::{ConfigStore, ConfigStoreError, ConfigStoreResult, EmployeeRoster, RosterResult},
};

/// Fixed employee roster held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    employees: Arc<Vec<Employee>>,
}

impl InMemoryRoster {
    /// Creates a roster from the given employees.
    #[must_use]
    pub fn new(employees: Vec<Employee>) -> Self {
        Self {
            employees: Arc::new(employees),
        }
    }
}

#[async_trait]
impl EmployeeRoster for InMemoryRoster {
    async fn list_employees(&self) -> RosterResult<Vec<Employee>> {
        Ok(self.employees.as_ref().clone())
    }
}

/// Thread-safe in-memory configuration store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    state: Arc<RwLock<Option<SystemConfig>>>,
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `config`.
    #[must_use]
    pub fn with_config(config: SystemConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(config))),
        }
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn load(&self) -> ConfigStoreResult<Option<SystemConfig>> {
        let state = self.state.read().map_err(|err| {
            ConfigStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clone())
    }

    async fn save(&self, config: &SystemConfig) -> ConfigStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConfigStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *state = Some(config.clone());
        Ok(())
    }
}
