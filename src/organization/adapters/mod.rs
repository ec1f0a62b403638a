//! Adapter implementations for organization ports.

pub mod file;
pub mod memory;
