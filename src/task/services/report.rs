//! Processing-cycle report.

use crate::task::domain::{TaskId, TaskStatus};
use std::fmt;

/// What happened to a task during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportAction {
    /// The task was `pending` when the cycle picked it up.
    Started,
    /// The task was already `in_progress`.
    Continued,
    /// The rollup pass completed the task from its subtasks.
    AutoCompleted,
}

impl ReportAction {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Continued => "continued",
            Self::AutoCompleted => "auto-completed",
        }
    }

    /// Chooses [`Self::Started`] or [`Self::Continued`] from the status the
    /// task had before it was advanced.
    #[must_use]
    pub const fn for_advance(from: TaskStatus) -> Self {
        match from {
            TaskStatus::Pending => Self::Started,
            TaskStatus::InProgress | TaskStatus::Completed => Self::Continued,
        }
    }
}

impl fmt::Display for ReportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One advanced or rolled-up task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Task identifier.
    pub task_id: TaskId,
    /// What happened.
    pub action: ReportAction,
    /// Status before the change.
    pub from_status: TaskStatus,
    /// Status after the change.
    pub to_status: TaskStatus,
}

/// A task or record the cycle could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleFailure {
    /// Task identifier or storage key.
    pub subject: String,
    /// Error message.
    pub reason: String,
}

impl CycleFailure {
    /// Creates a failure for `subject`.
    #[must_use]
    pub fn new(subject: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self {
            subject: subject.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Ordered result of one processing cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingReport {
    /// Entries in processing order; rollup entries come last.
    pub entries: Vec<ReportEntry>,
    /// Per-task failures. None of them aborted the cycle.
    pub failures: Vec<CycleFailure>,
    /// Set when the rollup pass was skipped because some task records
    /// could not be read.
    pub rollup_deferred: bool,
}

impl ProcessingReport {
    /// Number of tasks the lifecycle engine advanced.
    #[must_use]
    pub fn advanced_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action != ReportAction::AutoCompleted)
            .count()
    }

    /// Number of roots completed by the rollup pass.
    #[must_use]
    pub fn auto_completed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.action == ReportAction::AutoCompleted)
            .count()
    }

    /// Number of failures.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Returns the entry for `task_id` with `action`, if present.
    #[must_use]
    pub fn entry(&self, task_id: TaskId, action: ReportAction) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|entry| entry.task_id == task_id && entry.action == action)
    }
}

impl fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "advanced {} task(s), auto-completed {}, failed {}",
            self.advanced_count(),
            self.auto_completed_count(),
            self.failed_count()
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {} {}: {} -> {}",
                entry.task_id, entry.action, entry.from_status, entry.to_status
            )?;
        }
        for failure in &self.failures {
            writeln!(f, "  failed {}: {}", failure.subject, failure.reason)?;
        }
        if self.rollup_deferred {
            writeln!(f, "  rollup deferred: unreadable task records present")?;
        }
        Ok(())
    }
}
