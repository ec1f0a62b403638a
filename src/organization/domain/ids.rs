//! Identifier and validated scalar types for the organization domain.

use super::OrganizationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an employee in the organization roster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Creates a validated employee identifier.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizationDomainError::EmptyEmployeeId`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, OrganizationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrganizationDomainError::EmptyEmployeeId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = OrganizationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Job role held by an employee, such as `CEO` or `Copywriter`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Role that performs oversight analysis instead of task work.
    pub const CHIEF_EXECUTIVE: &'static str = "CEO";

    /// Creates a validated role.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizationDomainError::EmptyRole`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, OrganizationDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrganizationDomainError::EmptyRole);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the chief executive role.
    #[must_use]
    pub fn chief_executive() -> Self {
        Self(Self::CHIEF_EXECUTIVE.to_owned())
    }

    /// Returns the role name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when this role matches `other`, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl TryFrom<String> for Role {
    type Error = OrganizationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
