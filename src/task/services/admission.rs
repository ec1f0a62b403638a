//! Admission of machine-suggested tasks.

use super::prompts::{self, PromptRenderError};
use crate::organization::domain::{OrganizationState, OrganizationalPolicy};
use crate::task::{
    domain::{
        OrganizationAnalysis, Suggestion, SuggestionRejection, Task, TaskDomainError, TaskDraft,
        TaskId,
    },
    ports::{GenerationError, GenerationService, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// A suggestion that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedSuggestion {
    /// Position of the suggestion in the submitted batch.
    pub index: usize,
    /// Why it was rejected.
    pub reason: SuggestionRejection,
}

/// Result of admitting a batch of suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionOutcome {
    /// Tasks created and persisted, in submission order.
    pub admitted: Vec<Task>,
    /// Suggestions that were not admitted.
    pub rejected: Vec<RejectedSuggestion>,
}

/// Service-level errors for admission.
#[derive(Debug, Clone, Error)]
pub enum AdmissionError {
    /// The analysis prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptRenderError),
    /// The generation service failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The generation service returned something other than an analysis.
    #[error("malformed organization analysis: {0}")]
    MalformedAnalysis(String),
    /// An admitted suggestion produced an invalid task.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Persisting an admitted task failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for admission operations.
pub type AdmissionResult<T> = Result<T, AdmissionError>;

/// Validates suggestions and turns admissible ones into pending root tasks.
#[derive(Clone)]
pub struct AdmissionService<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
}

impl<R, G, C> AdmissionService<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    /// Creates a new admission service.
    #[must_use]
    pub const fn new(repository: Arc<R>, generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            repository,
            generator,
            clock,
        }
    }

    /// Admits every suggestion that names a title, description and assignee.
    ///
    /// Numeric policy limits are not enforced.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionError::Repository`] when an admitted task cannot be
    /// stored. Tasks stored before the failure remain stored.
    pub async fn admit(
        &self,
        suggestions: impl IntoIterator<Item = Value> + Send,
        policy: &OrganizationalPolicy,
    ) -> AdmissionResult<AdmissionOutcome> {
        let (outcome, _) = self.admit_tracked(suggestions, policy).await?;
        Ok(outcome)
    }

    /// Asks the generation service whether the organization needs new work
    /// and admits what it suggests.
    ///
    /// Admitted tasks that name a process are tracked on `state`.
    ///
    /// # Errors
    ///
    /// Returns [`AdmissionError`] when the prompt cannot be rendered, the
    /// generation service fails or answers with a malformed analysis, or an
    /// admitted task cannot be stored.
    pub async fn run_autonomous_analysis(
        &self,
        state: &mut OrganizationState,
    ) -> AdmissionResult<AdmissionOutcome> {
        let prompt = prompts::render_organization_prompt(state)?;
        let reply = self.generator.complete(&prompt).await?;
        let analysis: OrganizationAnalysis = serde_json::from_str(prompts::json_payload(&reply))
            .map_err(|err| AdmissionError::MalformedAnalysis(err.to_string()))?;
        if !analysis.should_create_tasks {
            tracing::info!("autonomous analysis proposed no tasks");
            return Ok(AdmissionOutcome::default());
        }

        let policy = state.policy().clone();
        let (outcome, links) = self
            .admit_tracked(analysis.suggested_tasks, &policy)
            .await?;
        for (process_id, task_id) in links {
            state.track_task(process_id, task_id);
        }
        Ok(outcome)
    }

    async fn admit_tracked(
        &self,
        suggestions: impl IntoIterator<Item = Value> + Send,
        policy: &OrganizationalPolicy,
    ) -> AdmissionResult<(AdmissionOutcome, Vec<(String, TaskId)>)> {
        tracing::debug!(
            max_tasks_per_day = policy.max_tasks_per_day,
            max_budget_per_task = policy.max_budget_per_task,
            "admitting suggestions"
        );
        let mut outcome = AdmissionOutcome::default();
        let mut links = Vec::new();
        let candidates: Vec<Value> = suggestions.into_iter().collect();
        for (index, raw) in candidates.into_iter().enumerate() {
            let suggestion = match Suggestion::try_from(raw) {
                Ok(suggestion) => suggestion,
                Err(reason) => {
                    tracing::warn!(index, %reason, "suggestion rejected");
                    outcome.rejected.push(RejectedSuggestion { index, reason });
                    continue;
                }
            };
            let task = self.mint(&suggestion)?;
            self.repository.store(&task).await?;
            tracing::info!(task_id = %task.id(), assignee = %task.assignee(), "suggestion admitted");
            if let Some(process_id) = suggestion.process_id() {
                links.push((process_id.to_owned(), task.id()));
            }
            outcome.admitted.push(task);
        }
        Ok((outcome, links))
    }

    fn mint(&self, suggestion: &Suggestion) -> AdmissionResult<Task> {
        let mut draft = TaskDraft::new(
            suggestion.title(),
            suggestion.description(),
            suggestion.assignee().clone(),
            suggestion.task_type().clone(),
        );
        if let Some(creator) = suggestion.created_by() {
            draft = draft.created_by(creator);
        }
        Ok(Task::new(draft, &*self.clock)?)
    }
}
