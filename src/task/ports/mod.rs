//! Port contracts for the task lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod generation;
pub mod handler;
pub mod repository;

pub use generation::{
    GenerationError, GenerationPurpose, GenerationResult, GenerationService, Generated,
};
#[cfg(test)]
pub use generation::MockGenerationService;
pub use handler::{CompletionClient, HandlerInput, HandlerOutput, TaskHandler};
pub use repository::{
    TaskListing, TaskRepository, TaskRepositoryError, TaskRepositoryResult, UnreadableTask,
};
