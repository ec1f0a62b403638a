//! Domain model for the task lifecycle.
//!
//! Tasks move forward through `pending`, `in_progress` and `completed`.
//! Subtasks point at their root task; roots complete through rollup once all
//! of their subtasks have completed.

mod error;
pub mod hierarchy;
mod ids;
mod suggestion;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskType};
pub use suggestion::{
    DEFAULT_SUGGESTION_TYPE, OrganizationAnalysis, RawSuggestion, SubtaskDescriptor, Suggestion,
    SuggestionRejection, TaskAnalysis,
};
pub use task::{SYSTEM_CREATOR, Task, TaskDraft, TaskResult, TaskReview, TaskStatus};
