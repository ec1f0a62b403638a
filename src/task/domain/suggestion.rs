//! Typed payloads produced by the generation service.
//!
//! Raw payloads are decoded leniently and validated here, at the boundary,
//! so that services only ever handle well-formed values.

use super::TaskType;
use crate::organization::domain::EmployeeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Task type given to suggestions that do not name one.
pub const DEFAULT_SUGGESTION_TYPE: &str = "general";

/// Machine-proposed task exactly as decoded from the generation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSuggestion {
    /// Proposed title.
    #[serde(default)]
    pub title: Option<String>,
    /// Proposed description.
    #[serde(default)]
    pub description: Option<String>,
    /// Proposed assignee identifier.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Proposed creator; defaults to the system creator.
    #[serde(default, rename = "who", alias = "created_by")]
    pub created_by: Option<String>,
    /// Proposed task type.
    #[serde(default, rename = "type")]
    pub task_type: Option<String>,
    /// Organizational process the task belongs to, if any.
    #[serde(default, alias = "processId")]
    pub process_id: Option<String>,
}

/// Reason a suggestion was not admitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SuggestionRejection {
    /// The suggestion has no usable title.
    #[error("suggestion is missing a title")]
    MissingTitle,
    /// The suggestion has no usable description.
    #[error("suggestion is missing a description")]
    MissingDescription,
    /// The suggestion has no usable assignee.
    #[error("suggestion is missing an assignee")]
    MissingAssignee,
    /// The suggestion could not be decoded at all.
    #[error("malformed suggestion: {0}")]
    Malformed(String),
}

/// A suggestion that carries every field admission requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    title: String,
    description: String,
    assignee: EmployeeId,
    created_by: Option<String>,
    task_type: TaskType,
    process_id: Option<String>,
}

impl Suggestion {
    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &EmployeeId {
        &self.assignee
    }

    /// Returns the explicit creator, if the suggestion named one.
    #[must_use]
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Returns the task type.
    #[must_use]
    pub const fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    /// Returns the organizational process, if any.
    #[must_use]
    pub fn process_id(&self) -> Option<&str> {
        self.process_id.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

impl TryFrom<RawSuggestion> for Suggestion {
    type Error = SuggestionRejection;

    fn try_from(raw: RawSuggestion) -> Result<Self, Self::Error> {
        let title = non_blank(raw.title).ok_or(SuggestionRejection::MissingTitle)?;
        let description =
            non_blank(raw.description).ok_or(SuggestionRejection::MissingDescription)?;
        let assignee = non_blank(raw.assignee)
            .and_then(|value| EmployeeId::new(value).ok())
            .ok_or(SuggestionRejection::MissingAssignee)?;
        let task_type = TaskType::new(
            non_blank(raw.task_type).unwrap_or_else(|| DEFAULT_SUGGESTION_TYPE.to_owned()),
        )
        .map_err(|err| SuggestionRejection::Malformed(err.to_string()))?;

        Ok(Self {
            title,
            description,
            assignee,
            created_by: non_blank(raw.created_by),
            task_type,
            process_id: non_blank(raw.process_id),
        })
    }
}

impl TryFrom<Value> for Suggestion {
    type Error = SuggestionRejection;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw: RawSuggestion = serde_json::from_value(value)
            .map_err(|err| SuggestionRejection::Malformed(err.to_string()))?;
        Self::try_from(raw)
    }
}

/// Organization-level analysis returned by the generation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationAnalysis {
    /// Whether the analysis proposes new tasks.
    #[serde(default)]
    pub should_create_tasks: bool,
    /// Proposed tasks, validated individually during admission.
    #[serde(default)]
    pub suggested_tasks: Vec<Value>,
}

/// Subtask proposed by a task analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskDescriptor {
    /// Subtask title.
    pub title: String,
    /// Subtask description.
    #[serde(default)]
    pub description: String,
    /// Subtask type.
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

/// Structured plan for a human-requested task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    /// Root task title.
    pub title: String,
    /// Root task description.
    #[serde(default)]
    pub description: String,
    /// Whether the task should be decomposed.
    #[serde(default)]
    pub needs_split: bool,
    /// Proposed subtasks, considered only when `needs_split` is set.
    #[serde(default)]
    pub subtasks: Vec<SubtaskDescriptor>,
}

impl TaskAnalysis {
    /// Returns the subtasks to create, honouring `needs_split`.
    #[must_use]
    pub fn planned_subtasks(&self) -> &[SubtaskDescriptor] {
        if self.needs_split {
            &self.subtasks
        } else {
            &[]
        }
    }
}
