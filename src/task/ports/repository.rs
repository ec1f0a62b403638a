//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// A stored record that could not be decoded into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableTask {
    /// Storage key of the record, such as a file name.
    pub key: String,
    /// Why the record could not be read.
    pub reason: String,
}

/// Snapshot of every stored task.
///
/// Records that fail to decode are reported individually instead of failing
/// the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListing {
    /// Successfully decoded tasks.
    pub tasks: Vec<Task>,
    /// Records excluded because they could not be read.
    pub unreadable: Vec<UnreadableTask>,
}

/// Task persistence contract.
///
/// Each task is one record, overwritten wholesale on update.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Overwrites an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists every stored task.
    async fn list_all(&self) -> TaskRepositoryResult<TaskListing>;

    /// Returns the direct subtasks of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Corrupt`] when any stored record is
    /// unreadable, since it may be one of the subtasks.
    async fn find_subtasks(&self, parent_id: TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let listing = self.list_all().await?;
        if let Some(record) = listing.unreadable.into_iter().next() {
            return Err(TaskRepositoryError::Corrupt {
                key: record.key,
                reason: record.reason,
            });
        }
        Ok(listing
            .tasks
            .into_iter()
            .filter(|task| task.parent_id() == Some(parent_id))
            .collect())
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A stored record could not be decoded.
    #[error("corrupt task record {key}: {reason}")]
    Corrupt {
        /// Storage key of the record.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
