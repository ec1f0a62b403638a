//! Task aggregate root and related lifecycle types.

use super::{ParseTaskStatusError, TaskDomainError, TaskId, TaskType};
use crate::organization::domain::EmployeeId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Creator recorded on tasks minted by the autonomy layer.
pub const SYSTEM_CREATOR: &str = "SYSTEM";

/// Task lifecycle status.
///
/// Statuses are ordered; a task only ever moves to a later status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Work output exists and awaits review.
    InProgress,
    /// Task is finished. Terminal.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when the task may still be advanced.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns `true` when moving to `target` goes strictly forward.
    #[must_use]
    pub fn can_advance_to(self, target: Self) -> bool {
        target > self
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output recorded by the work step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Normalized work output.
    pub output: String,
    /// When the output was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Judgment recorded by the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReview {
    /// Employee who reviewed the work.
    pub reviewer: EmployeeId,
    /// Normalized review content.
    pub content: String,
    /// When the review was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Input for minting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    created_by: String,
    assignee: EmployeeId,
    task_type: TaskType,
    parent_id: Option<TaskId>,
}

impl TaskDraft {
    /// Creates a root-task draft created by [`SYSTEM_CREATOR`].
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: EmployeeId,
        task_type: TaskType,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            created_by: SYSTEM_CREATOR.to_owned(),
            assignee,
            task_type,
            parent_id: None,
        }
    }

    /// Sets the creator.
    #[must_use]
    pub fn created_by(mut self, creator: impl Into<String>) -> Self {
        self.created_by = creator.into();
        self
    }

    /// Marks the draft as a subtask of `parent`.
    #[must_use]
    pub const fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent_id = Some(parent);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    created_by: String,
    assignee: EmployeeId,
    #[serde(rename = "type")]
    task_type: TaskType,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_id: Option<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<TaskResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    review: Option<TaskReview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warnings: Option<String>,
}

impl Task {
    /// Mints a pending task with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let TaskDraft {
            title,
            description,
            created_by,
            assignee,
            task_type,
            parent_id,
        } = draft;
        let trimmed_title = title.trim();
        if trimmed_title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: trimmed_title.to_owned(),
            description,
            created_by,
            assignee,
            task_type,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
            parent_id,
            result: None,
            review: None,
            warnings: None,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns what the task asks for.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns who created the task.
    #[must_use]
    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    /// Returns the employee the task is addressed to.
    #[must_use]
    pub const fn assignee(&self) -> &EmployeeId {
        &self.assignee
    }

    /// Returns the handler routing type.
    #[must_use]
    pub const fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the owning root task, if this is a subtask.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns `true` when the task has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the recorded work output, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&TaskResult> {
        self.result.as_ref()
    }

    /// Returns the recorded review, if any.
    #[must_use]
    pub const fn review(&self) -> Option<&TaskReview> {
        self.review.as_ref()
    }

    /// Returns accumulated warnings, if any.
    #[must_use]
    pub fn warnings(&self) -> Option<&str> {
        self.warnings.as_deref()
    }

    /// Records work output and moves the task to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task is
    /// `pending`.
    pub fn record_work(
        &mut self,
        output: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.require_status(TaskStatus::Pending, TaskStatus::InProgress)?;
        let timestamp = clock.utc();
        self.result = Some(TaskResult {
            output: output.into(),
            timestamp,
        });
        self.updated_at = timestamp;
        Ok(())
    }

    /// Records a review and completes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task is
    /// `in_progress`.
    pub fn record_review(
        &mut self,
        reviewer: EmployeeId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.require_status(TaskStatus::InProgress, TaskStatus::Completed)?;
        let timestamp = clock.utc();
        self.review = Some(TaskReview {
            reviewer,
            content: content.into(),
            timestamp,
        });
        self.updated_at = timestamp;
        Ok(())
    }

    /// Completes the task because every subtask has completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// already completed.
    pub fn complete_from_subtasks(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.advance_to(TaskStatus::Completed)?;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Appends a warning, separating multiple warnings with `"; "`.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let next = warning.into();
        self.warnings = Some(match self.warnings.take() {
            Some(existing) => format!("{existing}; {next}"),
            None => next,
        });
    }

    fn require_status(
        &mut self,
        expected: TaskStatus,
        target: TaskStatus,
    ) -> Result<(), TaskDomainError> {
        if self.status != expected {
            return Err(self.transition_error(target));
        }
        self.advance_to(target)
    }

    fn advance_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_advance_to(target) {
            return Err(self.transition_error(target));
        }
        self.status = target;
        Ok(())
    }

    const fn transition_error(&self, target: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStatusTransition {
            task_id: self.id,
            from: self.status,
            to: target,
        }
    }
}
