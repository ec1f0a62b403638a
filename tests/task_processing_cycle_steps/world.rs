//! Shared world state for task processing cycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskforce::organization::domain::OrganizationDirectory;
use taskforce::task::{
    adapters::{
        handlers::{HandlerGenerationService, HandlerRegistry},
        memory::{InMemoryTaskRepository, ScriptedCompletionClient},
    },
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{ProcessingCycle, ProcessingReport},
};

/// Cycle type used by the BDD world.
pub type TestCycle = ProcessingCycle<
    InMemoryTaskRepository,
    HandlerGenerationService<ScriptedCompletionClient>,
    DefaultClock,
>;

/// Scenario world for processing cycle behaviour tests.
pub struct CycleWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub cycle: TestCycle,
    pub directory: Option<OrganizationDirectory>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_report: Option<ProcessingReport>,
}

impl CycleWorld {
    /// Creates a world with an empty repository and no roster.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let cycle = ProcessingCycle::new(
            Arc::clone(&repository),
            Arc::new(HandlerGenerationService::new(
                HandlerRegistry::with_default_handlers(),
                Arc::new(ScriptedCompletionClient::new()),
            )),
            Arc::new(DefaultClock),
        );

        Self {
            repository,
            cycle,
            directory: None,
            tasks_by_title: HashMap::new(),
            last_report: None,
        }
    }

    /// Returns the id of the task seeded under `title`.
    ///
    /// # Errors
    ///
    /// Returns an error if no task was seeded with that title.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }

    /// Loads the current state of the task seeded under `title`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is unknown or the lookup fails.
    pub fn stored_task(&self, title: &str) -> Result<Task, eyre::Report> {
        let id = self.task_id(title)?;
        run_async(self.repository.find_by_id(id))?
            .ok_or_else(|| eyre::eyre!("task {title:?} missing from repository"))
    }
}

impl Default for CycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CycleWorld {
    CycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
