//! Domain model for the organization roster and autonomy policy.
//!
//! The roster is read-only at runtime. Policy changes flow only through the
//! policy service, never through task processing.

mod employee;
mod error;
mod ids;
mod policy;
mod state;

pub use employee::{Employee, OrganizationDirectory};
pub use error::OrganizationDomainError;
pub use ids::{EmployeeId, Role};
pub use policy::{
    EscalationRules, MetricConfig, OrganizationProcess, OrganizationalPolicy, PolicyUpdate,
    SystemConfig,
};
pub use state::OrganizationState;
