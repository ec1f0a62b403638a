//! Decomposition planner turning a human request into a root task and
//! assigned subtasks.

use super::prompts::{self, PlanningPrompt, PromptRenderError};
use crate::organization::domain::{Employee, EmployeeId, OrganizationDirectory};
use crate::task::{
    domain::{SubtaskDescriptor, Task, TaskAnalysis, TaskDomainError, TaskDraft, TaskType},
    ports::{GenerationError, GenerationService, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Picks the employee who receives a subtask.
pub trait AssignmentStrategy: Send + Sync {
    /// Returns the employee for `subtask`, or `None` when nobody under
    /// `assignee` can take it.
    fn choose<'a>(
        &self,
        directory: &'a OrganizationDirectory,
        assignee: &Employee,
        subtask: &SubtaskDescriptor,
    ) -> Option<&'a Employee>;
}

/// Assigns every subtask to the first employee in roster order who reports
/// to the root's assignee.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEligible;

impl AssignmentStrategy for FirstEligible {
    fn choose<'a>(
        &self,
        directory: &'a OrganizationDirectory,
        assignee: &Employee,
        _subtask: &SubtaskDescriptor,
    ) -> Option<&'a Employee> {
        directory
            .employees()
            .iter()
            .find(|employee| employee.reports_to() == Some(assignee.id()))
    }
}

/// Request payload for creating a planned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    creator: EmployeeId,
    assignee: EmployeeId,
    task_type: TaskType,
    brief: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request from `creator` to `assignee`.
    #[must_use]
    pub const fn new(creator: EmployeeId, assignee: EmployeeId, task_type: TaskType) -> Self {
        Self {
            creator,
            assignee,
            task_type,
            brief: None,
        }
    }

    /// Adds a free-text brief passed to the generation service.
    #[must_use]
    pub fn with_brief(mut self, brief: impl Into<String>) -> Self {
        self.brief = Some(brief.into());
        self
    }
}

/// Tasks persisted by a successful plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTasks {
    /// Root task assigned to the requested assignee.
    pub root: Task,
    /// Subtasks, each pointing at `root`.
    pub children: Vec<Task>,
    /// Titles of proposed subtasks nobody could take.
    pub unassignable: Vec<String>,
}

/// Service-level errors for planning.
#[derive(Debug, Clone, Error)]
pub enum PlanningError {
    /// The employee is not in the directory.
    #[error("unknown employee: {0}")]
    UnknownEmployee(EmployeeId),
    /// The creator has nobody to delegate to.
    #[error("employee {0} has no subordinates")]
    NoSubordinates(EmployeeId),
    /// The assignee does not report to the creator.
    #[error("employee {assignee} does not report to {creator}")]
    NotASubordinate {
        /// Requesting employee.
        creator: EmployeeId,
        /// Requested assignee.
        assignee: EmployeeId,
    },
    /// The prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptRenderError),
    /// The generation service failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The generation service returned something other than a task analysis.
    #[error("malformed task analysis: {0}")]
    MalformedAnalysis(String),
    /// The analysis produced an invalid task.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Persisting the planned tasks failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for planning operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Plans and persists a root task with its subtasks.
#[derive(Clone)]
pub struct DecompositionPlanner<R, G, C, S = FirstEligible>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
    S: AssignmentStrategy,
{
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    strategy: S,
}

impl<R, G, C> DecompositionPlanner<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    /// Creates a planner using [`FirstEligible`] assignment.
    #[must_use]
    pub const fn new(repository: Arc<R>, generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            repository,
            generator,
            clock,
            strategy: FirstEligible,
        }
    }
}

impl<R, G, C, S> DecompositionPlanner<R, G, C, S>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
    S: AssignmentStrategy,
{
    /// Replaces the subtask assignment strategy.
    #[must_use]
    pub fn with_strategy<T: AssignmentStrategy>(self, strategy: T) -> DecompositionPlanner<R, G, C, T> {
        DecompositionPlanner {
            repository: self.repository,
            generator: self.generator,
            clock: self.clock,
            strategy,
        }
    }

    /// Asks the generation service for a plan and persists the result.
    ///
    /// Nothing is written unless the analysis is well formed and every task
    /// it describes is valid. The root is stored before its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError`] when the employees do not qualify, the
    /// generation service fails or answers with a malformed analysis, or the
    /// repository rejects a write.
    pub async fn plan(
        &self,
        directory: &OrganizationDirectory,
        request: CreateTaskRequest,
    ) -> PlanningResult<PlannedTasks> {
        let CreateTaskRequest {
            creator: creator_id,
            assignee: assignee_id,
            task_type,
            brief,
        } = request;
        let creator = resolve(directory, &creator_id)?;
        let assignee = resolve(directory, &assignee_id)?;
        let mut candidates = directory.subordinates_of(creator.id()).peekable();
        if candidates.peek().is_none() {
            return Err(PlanningError::NoSubordinates(creator.id().clone()));
        }
        if !candidates.any(|candidate| candidate.id() == assignee.id()) {
            return Err(PlanningError::NotASubordinate {
                creator: creator.id().clone(),
                assignee: assignee.id().clone(),
            });
        }

        let subordinates: Vec<&Employee> = directory.subordinates_of(assignee.id()).collect();
        let prompt = prompts::render_planning_prompt(&PlanningPrompt {
            creator,
            assignee,
            task_type: &task_type,
            brief: brief.as_deref(),
            subordinates: &subordinates,
        })?;
        let reply = self.generator.complete(&prompt).await?;
        let analysis: TaskAnalysis = serde_json::from_str(prompts::json_payload(&reply))
            .map_err(|err| PlanningError::MalformedAnalysis(err.to_string()))?;

        let planned = self.build(directory, creator, assignee, task_type, &analysis)?;
        self.repository.store(&planned.root).await?;
        for child in &planned.children {
            self.repository.store(child).await?;
        }
        tracing::info!(
            root_id = %planned.root.id(),
            subtasks = planned.children.len(),
            unassignable = planned.unassignable.len(),
            "task planned"
        );
        Ok(planned)
    }

    fn build(
        &self,
        directory: &OrganizationDirectory,
        creator: &Employee,
        assignee: &Employee,
        task_type: TaskType,
        analysis: &TaskAnalysis,
    ) -> PlanningResult<PlannedTasks> {
        let root = Task::new(
            TaskDraft::new(
                analysis.title.clone(),
                analysis.description.clone(),
                assignee.id().clone(),
                task_type,
            )
            .created_by(creator.id().as_str()),
            &*self.clock,
        )?;

        let mut children = Vec::new();
        let mut unassignable = Vec::new();
        for subtask in analysis.planned_subtasks() {
            let Some(owner) = self.strategy.choose(directory, assignee, subtask) else {
                tracing::warn!(root_id = %root.id(), subtask = %subtask.title, "no eligible employee for subtask");
                unassignable.push(subtask.title.clone());
                continue;
            };
            let child = Task::new(
                TaskDraft::new(
                    subtask.title.clone(),
                    subtask.description.clone(),
                    owner.id().clone(),
                    subtask.task_type.clone(),
                )
                .created_by(assignee.id().as_str())
                .with_parent(root.id()),
                &*self.clock,
            )?;
            children.push(child);
        }

        Ok(PlannedTasks {
            root,
            children,
            unassignable,
        })
    }
}

fn resolve<'a>(directory: &'a OrganizationDirectory, id: &EmployeeId) -> PlanningResult<&'a Employee> {
    directory
        .find(id)
        .ok_or_else(|| PlanningError::UnknownEmployee(id.clone()))
}
