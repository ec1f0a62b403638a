//! Employee records and the organization directory.

use super::{EmployeeId, OrganizationDomainError, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// A member of the organization.
///
/// `manages` and `reports_to` describe the reporting hierarchy. Only
/// `reports_to` is authoritative for subordinate lookups; `manages` is kept as
/// declared roster data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    role: Role,
    #[serde(default)]
    permissions: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    manages: Vec<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reports_to: Option<EmployeeId>,
}

impl Employee {
    /// Creates an employee without permissions or reporting edges.
    #[must_use]
    pub fn new(id: EmployeeId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            permissions: BTreeSet::new(),
            manages: Vec::new(),
            reports_to: None,
        }
    }

    /// Sets the capability tags held by the employee.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = String>) -> Self {
        self.permissions = permissions.into_iter().collect();
        self
    }

    /// Sets the declared list of managed employees.
    #[must_use]
    pub fn managing(mut self, subordinates: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.manages = subordinates.into_iter().collect();
        self
    }

    /// Sets the direct superior.
    #[must_use]
    pub fn reporting_to(mut self, superior: EmployeeId) -> Self {
        self.reports_to = Some(superior);
        self
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> &EmployeeId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the employee role.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the capability tags.
    #[must_use]
    pub const fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    /// Returns the declared managed employees.
    #[must_use]
    pub fn manages(&self) -> &[EmployeeId] {
        &self.manages
    }

    /// Returns the direct superior, if any.
    #[must_use]
    pub const fn reports_to(&self) -> Option<&EmployeeId> {
        self.reports_to.as_ref()
    }
}

/// Read-only roster of employees in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationDirectory {
    employees: Vec<Employee>,
}

impl OrganizationDirectory {
    /// Builds a directory from roster entries.
    ///
    /// # Errors
    ///
    /// Returns [`OrganizationDomainError::DuplicateEmployee`] when two entries
    /// share an identifier.
    pub fn new(employees: Vec<Employee>) -> Result<Self, OrganizationDomainError> {
        let mut seen = HashSet::with_capacity(employees.len());
        for employee in &employees {
            if !seen.insert(employee.id()) {
                return Err(OrganizationDomainError::DuplicateEmployee(
                    employee.id().to_string(),
                ));
            }
        }
        Ok(Self { employees })
    }

    /// Returns all employees in roster order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Looks up an employee by identifier.
    #[must_use]
    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id() == id)
    }

    /// Returns the direct subordinates of `superior` in roster order.
    pub fn subordinates_of<'a>(
        &'a self,
        superior: &'a EmployeeId,
    ) -> impl Iterator<Item = &'a Employee> + 'a {
        self.employees
            .iter()
            .filter(move |employee| employee.reports_to() == Some(superior))
    }

    /// Returns the number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns `true` when the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
