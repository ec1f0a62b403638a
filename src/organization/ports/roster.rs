//! Port for loading the employee roster.

use crate::organization::domain::{Employee, OrganizationDirectory, OrganizationDomainError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Source of employee records.
#[async_trait]
pub trait EmployeeRoster: Send + Sync {
    /// Returns every employee in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Persistence`] when the roster cannot be read.
    async fn list_employees(&self) -> RosterResult<Vec<Employee>>;

    /// Loads the roster and builds a validated directory.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] when the roster cannot be read or contains
    /// duplicate identifiers.
    async fn load_directory(&self) -> RosterResult<OrganizationDirectory> {
        let employees = self.list_employees().await?;
        Ok(OrganizationDirectory::new(employees)?)
    }
}

/// Errors returned by roster implementations.
#[derive(Debug, Clone, Error)]
pub enum RosterError {
    /// The roster contents are invalid.
    #[error(transparent)]
    Domain(#[from] OrganizationDomainError),

    /// Persistence-layer failure.
    #[error("roster persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RosterError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
