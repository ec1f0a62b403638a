//! Processing cycle: advance every active task, then roll up roots.

use super::{
    lifecycle::{Advance, TaskLifecycleEngine},
    report::{CycleFailure, ProcessingReport, ReportAction, ReportEntry},
    rollup::RollupPass,
};
use crate::organization::domain::{OrganizationDirectory, Role};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{GenerationService, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors that prevent a cycle from running at all.
#[derive(Debug, Clone, Error)]
pub enum CycleError {
    /// The task listing could not be read.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for processing cycles.
pub type CycleResult<T> = Result<T, CycleError>;

/// Runs the lifecycle engine over every active task and then the rollup
/// pass over the refreshed task set.
#[derive(Clone)]
pub struct ProcessingCycle<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    engine: TaskLifecycleEngine<R, G, C>,
    rollup: RollupPass<R, C>,
}

impl<R, G, C> ProcessingCycle<R, G, C>
where
    R: TaskRepository,
    G: GenerationService,
    C: Clock + Send + Sync,
{
    /// Creates a cycle sharing one repository, generator and clock.
    #[must_use]
    pub fn new(repository: Arc<R>, generator: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            engine: TaskLifecycleEngine::new(Arc::clone(&repository), generator, Arc::clone(&clock)),
            rollup: RollupPass::new(Arc::clone(&repository), clock),
            repository,
        }
    }

    /// Replaces the role whose members only analyze tasks.
    #[must_use]
    pub fn with_oversight_role(mut self, role: Role) -> Self {
        self.engine = self.engine.with_oversight_role(role);
        self
    }

    /// Runs one cycle against `directory`.
    ///
    /// Per-task failures are collected in the report and never stop the
    /// cycle.
    ///
    /// The rollup pass is skipped while any record is unreadable, and the
    /// report marks it as deferred.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Repository`] when the task listing itself fails.
    pub async fn run(&self, directory: &OrganizationDirectory) -> CycleResult<ProcessingReport> {
        let listing = self.repository.list_all().await?;
        let mut report = ProcessingReport::default();
        report.failures.extend(
            listing
                .unreadable
                .iter()
                .map(|record| CycleFailure::new(&record.key, &record.reason)),
        );

        let mut tasks = listing.tasks;
        for index in 0..tasks.len() {
            let Some(task) = tasks.get(index) else {
                continue;
            };
            if let Some(updated) = self.advance_one(task, directory, &mut report).await {
                if let Some(slot) = tasks.get_mut(index) {
                    *slot = updated;
                }
            }
        }

        if listing.unreadable.is_empty() {
            let rollup = self.rollup.run(&tasks).await;
            for root in &rollup.completed {
                report.entries.push(ReportEntry {
                    task_id: root.id(),
                    action: ReportAction::AutoCompleted,
                    from_status: TaskStatus::InProgress,
                    to_status: root.status(),
                });
            }
            report.failures.extend(rollup.failures);
        } else {
            // An unreadable record may be an unfinished subtask of any root.
            tracing::warn!(
                unreadable = listing.unreadable.len(),
                "unreadable task records present; rollup deferred"
            );
            report.rollup_deferred = true;
        }

        tracing::info!(
            advanced = report.advanced_count(),
            auto_completed = report.auto_completed_count(),
            failed = report.failed_count(),
            "processing cycle finished"
        );
        Ok(report)
    }

    async fn advance_one(
        &self,
        task: &Task,
        directory: &OrganizationDirectory,
        report: &mut ProcessingReport,
    ) -> Option<Task> {
        if !task.status().is_active() {
            return None;
        }
        let Some(employee) = directory.find(task.assignee()) else {
            tracing::debug!(task_id = %task.id(), assignee = %task.assignee(), "assignee not in directory; skipping");
            return None;
        };

        match self.engine.advance(task, employee).await {
            Advance::NoOp => None,
            Advance::Failed(err) => {
                report.failures.push(CycleFailure::new(task.id(), err));
                None
            }
            Advance::Updated(updated) => {
                if updated == *task {
                    tracing::debug!(task_id = %task.id(), "task unchanged; nothing to persist");
                    return None;
                }
                if let Err(err) = self.repository.update(&updated).await {
                    tracing::warn!(task_id = %task.id(), error = %err, "failed to persist advanced task");
                    report.failures.push(CycleFailure::new(task.id(), err));
                    return None;
                }
                report.entries.push(ReportEntry {
                    task_id: updated.id(),
                    action: ReportAction::for_advance(task.status()),
                    from_status: task.status(),
                    to_status: updated.status(),
                });
                Some(updated)
            }
        }
    }
}
