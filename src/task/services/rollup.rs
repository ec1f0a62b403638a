//! Rollup pass completing roots whose subtasks have all completed.

use super::report::CycleFailure;
use crate::task::{
    domain::{Task, hierarchy},
    ports::TaskRepository,
};
use mockable::Clock;
use std::sync::Arc;

/// Roots changed and failures collected by one [`RollupPass::run`].
#[derive(Debug, Clone, Default)]
pub struct RollupOutcome {
    /// Roots moved to `completed` and persisted.
    pub completed: Vec<Task>,
    /// Roots that could not be completed or persisted.
    pub failures: Vec<CycleFailure>,
}

/// Completes `in_progress` roots whose subtasks are all `completed`.
///
/// Roots without subtasks and subtasks themselves are never touched.
#[derive(Clone)]
pub struct RollupPass<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RollupPass<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new rollup pass.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Runs the pass over a snapshot of every task.
    pub async fn run(&self, tasks: &[Task]) -> RollupOutcome {
        let mut outcome = RollupOutcome::default();
        for root_id in hierarchy::rollup_candidates(tasks) {
            let Some(root) = tasks.iter().find(|task| task.id() == root_id) else {
                continue;
            };
            let mut completed = root.clone();
            if let Err(err) = completed.complete_from_subtasks(&*self.clock) {
                outcome.failures.push(CycleFailure::new(root_id, err));
                continue;
            }
            match self.repository.update(&completed).await {
                Ok(()) => {
                    tracing::info!(task_id = %root_id, "root auto-completed");
                    outcome.completed.push(completed);
                }
                Err(err) => {
                    tracing::warn!(task_id = %root_id, error = %err, "failed to persist rollup");
                    outcome.failures.push(CycleFailure::new(root_id, err));
                }
            }
        }
        outcome
    }
}
