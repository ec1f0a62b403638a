//! Organization roster and autonomy policy.
//!
//! The directory and policy are plain values loaded through ports and passed
//! explicitly into task operations. Layout mirrors the task module:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Configuration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
