//! Application services for organization configuration.

mod policy;

pub use policy::{PolicyService, PolicyServiceError, PolicyServiceResult};
