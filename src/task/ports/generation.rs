//! Port for the external text-generation service.

use crate::organization::domain::Role;
use crate::task::domain::{Task, TaskType};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Why the engine is asking for content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationPurpose {
    /// Produce the work output for a task.
    Work,
    /// Judge previously produced work.
    Review,
    /// Analyze a task on behalf of the oversight role.
    Oversight,
}

impl GenerationPurpose {
    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Review => "review",
            Self::Oversight => "oversight",
        }
    }
}

impl fmt::Display for GenerationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content returned for a task.
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// Plain text.
    Text(String),
    /// Structured JSON content.
    Structured(Value),
    /// No handler is registered for the task type.
    NoHandler(TaskType),
}

impl Generated {
    /// Normalizes content to text.
    ///
    /// Text that itself holds a JSON document is re-encoded compactly; any
    /// other text is kept verbatim.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => serde_json::from_str::<Value>(&text)
                .ok()
                .filter(|value| value.is_object() || value.is_array())
                .map_or(text, |value| value.to_string()),
            Self::Structured(value) => value.to_string(),
            Self::NoHandler(task_type) => format!("no handler registered for type {task_type}"),
        }
    }
}

/// External content producer used for work, review, oversight and planning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Produces content for `task` on behalf of an employee holding `role`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the service cannot produce content.
    async fn generate(
        &self,
        task: &Task,
        role: &Role,
        purpose: GenerationPurpose,
    ) -> GenerationResult<Generated>;

    /// Completes a free-form prompt, typically expecting JSON back.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the service cannot be reached.
    async fn complete(&self, prompt: &str) -> GenerationResult<String>;
}

/// Errors returned by generation services.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The service could not be reached or refused the request.
    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something other than content.
    #[error("unexpected generation response: {0}")]
    UnexpectedResponse(String),

    /// Handler or transport failure.
    #[error("generation runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl GenerationError {
    /// Wraps a runtime error from an adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
