//! Taskforce: autonomous task orchestration for a modelled organization.
//!
//! Employees receive tasks that may be decomposed into subtasks, worked,
//! reviewed and rolled up into their parent's completion. Machine-suggested
//! tasks pass an admission filter before entering the same lifecycle.
//!
//! # Architecture
//!
//! Taskforce follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (files, HTTP, memory)
//!
//! # Modules
//!
//! - [`organization`]: Roster, reporting lines and autonomy policy
//! - [`task`]: Task lifecycle, decomposition, admission and rollup
//! - [`config`]: Settings resolved from the environment

pub mod config;
pub mod organization;
pub mod task;
