//! Error types for organization domain validation.

use thiserror::Error;

/// Errors returned while constructing organization domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrganizationDomainError {
    /// The employee identifier is empty after trimming.
    #[error("employee identifier must not be empty")]
    EmptyEmployeeId,

    /// The role name is empty after trimming.
    #[error("role must not be empty")]
    EmptyRole,

    /// Two roster entries share the same identifier.
    #[error("duplicate employee identifier: {0}")]
    DuplicateEmployee(String),
}
