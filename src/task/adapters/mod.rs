//! Adapter implementations for task ports.

pub mod completion;
pub mod file;
pub mod handlers;
pub mod memory;
