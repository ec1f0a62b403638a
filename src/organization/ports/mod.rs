//! Port contracts for organization data.

pub mod config;
pub mod roster;

pub use config::{ConfigStore, ConfigStoreError, ConfigStoreResult};
pub use roster::{EmployeeRoster, RosterError, RosterResult};
