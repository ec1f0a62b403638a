//! Scripted completion client for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::task::ports::{CompletionClient, GenerationError, GenerationResult};

/// Returns queued responses in order, then fails as unavailable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCompletionClient {
    responses: Arc<Mutex<VecDeque<GenerationResult<String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedCompletionClient {
    /// Creates a client with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    #[must_use]
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.push(Ok(response.into()));
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_failure(self, error: GenerationError) -> Self {
        self.push(Err(error));
        self
    }

    /// Returns every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }

    fn push(&self, response: GenerationResult<String>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, prompt: &str) -> GenerationResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_owned());
        }
        let next = self
            .responses
            .lock()
            .map_err(|err| GenerationError::Unavailable(err.to_string()))?
            .pop_front();
        next.unwrap_or_else(|| {
            Err(GenerationError::Unavailable(
                "no scripted completion left".to_owned(),
            ))
        })
    }
}
