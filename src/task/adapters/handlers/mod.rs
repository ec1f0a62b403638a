//! Task-type routing to domain handlers.

mod marketing;

pub use marketing::{AnalyticsHandler, ContentHandler, GraphicsHandler, MetricsHandler};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::organization::domain::Role;
use crate::task::{
    domain::{Task, TaskType},
    ports::{
        CompletionClient, GenerationPurpose, GenerationResult, GenerationService, Generated,
        HandlerInput, HandlerOutput, TaskHandler,
    },
};

/// Task types served by [`HandlerRegistry::with_default_handlers`].
pub const DEFAULT_TASK_TYPES: [&str; 5] = [
    "creative_design",
    "content_creation",
    "media_buying",
    "performance_analysis",
    "ad_copywriting",
];

/// Maps task types to the handler that serves them.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn TaskHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry serving [`DEFAULT_TASK_TYPES`].
    #[must_use]
    pub fn with_default_handlers() -> Self {
        let content: Arc<dyn TaskHandler> = Arc::new(ContentHandler);
        Self::new()
            .with_handler("creative_design", Arc::new(GraphicsHandler))
            .with_handler("content_creation", Arc::clone(&content))
            .with_handler("media_buying", Arc::new(MetricsHandler))
            .with_handler("performance_analysis", Arc::new(AnalyticsHandler))
            .with_handler("ad_copywriting", content)
    }

    /// Registers `handler` for `task_type`, replacing any previous handler.
    #[must_use]
    pub fn with_handler(mut self, task_type: &str, handler: Arc<dyn TaskHandler>) -> Self {
        self.handlers.insert(task_type.to_owned(), handler);
        self
    }

    /// Returns the handler for `task_type`, if registered.
    #[must_use]
    pub fn handler_for(&self, task_type: &TaskType) -> Option<Arc<dyn TaskHandler>> {
        self.handlers.get(task_type.as_str()).cloned()
    }

    /// Returns registered task types in sorted order.
    #[must_use]
    pub fn task_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

/// Generation service that routes task content through domain handlers and
/// free-form prompts through a completion backend.
#[derive(Clone)]
pub struct HandlerGenerationService<C>
where
    C: CompletionClient,
{
    registry: HandlerRegistry,
    completions: Arc<C>,
}

impl<C> HandlerGenerationService<C>
where
    C: CompletionClient,
{
    /// Creates a new handler-backed generation service.
    #[must_use]
    pub const fn new(registry: HandlerRegistry, completions: Arc<C>) -> Self {
        Self {
            registry,
            completions,
        }
    }
}

#[async_trait]
impl<C> GenerationService for HandlerGenerationService<C>
where
    C: CompletionClient,
{
    async fn generate(
        &self,
        task: &Task,
        role: &Role,
        purpose: GenerationPurpose,
    ) -> GenerationResult<Generated> {
        let Some(handler) = self.registry.handler_for(task.task_type()) else {
            tracing::warn!(task_id = %task.id(), task_type = %task.task_type(), "no handler registered");
            return Ok(Generated::NoHandler(task.task_type().clone()));
        };
        tracing::debug!(task_id = %task.id(), %role, %purpose, "routing task to handler");
        let output = handler
            .handle(HandlerInput {
                title: task.title(),
                description: task.description(),
            })
            .await?;
        Ok(match output {
            HandlerOutput::Text(text) => Generated::Text(text),
            HandlerOutput::Structured(value) => Generated::Structured(value),
        })
    }

    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        self.completions.complete(prompt).await
    }
}
