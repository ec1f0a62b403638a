//! Ports for pluggable domain handlers and prompt completion.

use super::GenerationResult;
use async_trait::async_trait;
use serde_json::Value;

/// What a domain handler is given: the task's title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerInput<'a> {
    /// Task title.
    pub title: &'a str,
    /// Task description.
    pub description: &'a str,
}

/// Content returned by a domain handler.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// Plain text.
    Text(String),
    /// Structured JSON content.
    Structured(Value),
}

/// Computes a result for one family of task types.
#[async_trait]
pub trait TaskHandler: Send + Sync {
    /// Handles a task.
    ///
    /// # Errors
    ///
    /// Returns a generation error when the handler fails.
    async fn handle(&self, input: HandlerInput<'_>) -> GenerationResult<HandlerOutput>;
}

/// Free-form prompt completion backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Completes `prompt`.
    ///
    /// # Errors
    ///
    /// Returns a generation error when the backend fails.
    async fn complete(&self, prompt: &str) -> GenerationResult<String>;
}
