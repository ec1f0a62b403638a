//! Task lifecycle engine: one cascade of work, review and self-rollup.

use crate::organization::domain::{Employee, Role};
use crate::task::{
    domain::{Task, TaskDomainError, TaskStatus, hierarchy},
    ports::{GenerationError, GenerationPurpose, GenerationService, Generated, TaskRepository},
};
use chrono::SecondsFormat;
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for a single lifecycle cascade.
#[derive(Debug, Clone, Error)]
pub enum TaskLifecycleError {
    /// A status transition was rejected by the domain.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The generation service failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Outcome of [`TaskLifecycleEngine::advance`].
#[derive(Debug, Clone)]
pub enum Advance {
    /// Nothing to do: the task is completed or the employee cannot act.
    NoOp,
    /// The cascade ran; the task holds the post-cascade state.
    Updated(Task),
    /// The cascade failed; the stored task must be left as it was.
    Failed(TaskLifecycleError),
}

impl Advance {
    /// Returns the updated task, if any.
    #[must_use]
    pub fn updated(self) -> Option<Task> {
        match self {
            Self::Updated(task) => Some(task),
            Self::NoOp | Self::Failed(_) => None,
        }
    }
}

/// Drives a single task through work, review and self-rollup.
#[derive(Clone)]
pub struct TaskLifecycleEngine<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    oversight_role: Role,
}

impl<R, G, C> TaskLifecycleEngine<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    /// Creates an engine whose oversight role is [`Role::chief_executive`].
    #[must_use]
    pub fn new(repository: Arc<R>, generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            repository,
            generator,
            clock,
            oversight_role: Role::chief_executive(),
        }
    }

    /// Replaces the role whose members only analyze tasks.
    #[must_use]
    pub fn with_oversight_role(mut self, role: Role) -> Self {
        self.oversight_role = role;
        self
    }

    /// Returns the configured oversight role.
    #[must_use]
    pub const fn oversight_role(&self) -> &Role {
        &self.oversight_role
    }

    /// Advances `task` on behalf of `employee`.
    ///
    /// The cascade works on a copy; on failure the caller keeps the original.
    /// Nothing is persisted here.
    pub async fn advance(&self, task: &Task, employee: &Employee) -> Advance {
        if !task.status().is_active() || task.assignee() != employee.id() {
            return Advance::NoOp;
        }
        match self.cascade(task, employee).await {
            Ok(updated) => Advance::Updated(updated),
            Err(err) => {
                tracing::warn!(task_id = %task.id(), employee = %employee.id(), error = %err, "task cascade failed");
                Advance::Failed(err)
            }
        }
    }

    async fn cascade(&self, task: &Task, employee: &Employee) -> Result<Task, TaskLifecycleError> {
        let role = employee.role();
        if role.matches(&self.oversight_role) {
            let analysis = self
                .generator
                .generate(task, role, GenerationPurpose::Oversight)
                .await?;
            tracing::info!(task_id = %task.id(), %role, analysis = %analysis.into_text(), "oversight analysis recorded");
            return Ok(task.clone());
        }

        let mut working = task.clone();
        let mut review_allowed = true;
        if working.status() == TaskStatus::Pending {
            let output = self
                .generator
                .generate(&working, role, GenerationPurpose::Work)
                .await?;
            review_allowed = self.record_work(&mut working, output)?;
        }

        if review_allowed && working.status() == TaskStatus::InProgress {
            let review = self
                .generator
                .generate(&working, role, GenerationPurpose::Review)
                .await?;
            working.record_review(employee.id().clone(), review.into_text(), &*self.clock)?;
            tracing::info!(task_id = %working.id(), reviewer = %employee.id(), "task reviewed");
        }

        self.complete_if_subtasks_done(&mut working).await?;
        Ok(working)
    }

    /// Records work output and reports whether review may follow.
    fn record_work(&self, task: &mut Task, output: Generated) -> Result<bool, TaskLifecycleError> {
        match output {
            Generated::NoHandler(task_type) => {
                let warning = format!("no handler registered for task type: {task_type}");
                let timestamp = self.clock.utc().to_rfc3339_opts(SecondsFormat::Millis, true);
                let payload = json!({ "warning": warning, "timestamp": timestamp });
                task.record_work(payload.to_string(), &*self.clock)?;
                task.add_warning(warning);
                tracing::warn!(task_id = %task.id(), %task_type, "task advanced without a handler");
                Ok(false)
            }
            generated => {
                task.record_work(generated.into_text(), &*self.clock)?;
                tracing::info!(task_id = %task.id(), "work recorded");
                Ok(true)
            }
        }
    }

    async fn complete_if_subtasks_done(&self, task: &mut Task) -> Result<(), TaskLifecycleError> {
        if !task.is_root() || task.status() == TaskStatus::Completed {
            return Ok(());
        }
        let subtasks = match self.repository.find_subtasks(task.id()).await {
            Ok(subtasks) => subtasks,
            Err(err) => {
                tracing::warn!(task_id = %task.id(), error = %err, "subtask lookup failed");
                return Ok(());
            }
        };
        if hierarchy::all_completed(&subtasks) {
            task.complete_from_subtasks(&*self.clock)?;
            tracing::info!(task_id = %task.id(), "root completed by its subtasks");
        }
        Ok(())
    }
}
