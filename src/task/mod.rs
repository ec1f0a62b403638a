//! Task lifecycle for the organization.
//!
//! Tasks are created by the decomposition planner or admitted from machine
//! suggestions, then advanced by the processing cycle: work, review and
//! completion, with root tasks completing once all of their subtasks have.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
