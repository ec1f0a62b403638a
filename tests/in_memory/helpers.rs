//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskforce::organization::domain::{Employee, EmployeeId, OrganizationDirectory, Role};
use taskforce::task::{
    adapters::{
        handlers::{HandlerGenerationService, HandlerRegistry},
        memory::{InMemoryTaskRepository, ScriptedCompletionClient},
    },
    domain::{Task, TaskId},
    ports::TaskRepository,
};

/// Generation service used across the integration tests.
pub type Generator = HandlerGenerationService<ScriptedCompletionClient>;

/// Builds an employee id.
///
/// # Errors
///
/// Returns an error if `raw` is blank.
pub fn employee_id(raw: &str) -> Result<EmployeeId, eyre::Report> {
    Ok(EmployeeId::new(raw)?)
}

fn employee(id: &str, role: &str, reports_to: Option<&str>) -> Result<Employee, eyre::Report> {
    let base = Employee::new(employee_id(id)?, id, Role::new(role)?);
    Ok(match reports_to {
        Some(superior) => base.reporting_to(employee_id(superior)?),
        None => base,
    })
}

/// Marketing team: ceo -> cmo -> {designer, writer}; junior reports to
/// designer.
#[fixture]
pub fn team() -> OrganizationDirectory {
    build_team().unwrap_or_else(|err| panic!("team fixture: {err}"))
}

fn build_team() -> Result<OrganizationDirectory, eyre::Report> {
    Ok(OrganizationDirectory::new(vec![
        employee("ceo", "CEO", None)?,
        employee("cmo", "CMO", Some("ceo"))?,
        employee("designer", "Designer", Some("cmo"))?,
        employee("writer", "Copywriter", Some("cmo"))?,
        employee("junior", "Junior Designer", Some("designer"))?,
    ])?)
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repository() -> Arc<InMemoryTaskRepository> {
    Arc::new(InMemoryTaskRepository::new())
}

/// Wraps scripted completions in the default handler-backed generator.
#[must_use]
pub fn generator(completions: ScriptedCompletionClient) -> Arc<Generator> {
    Arc::new(HandlerGenerationService::new(
        HandlerRegistry::with_default_handlers(),
        Arc::new(completions),
    ))
}

/// Provides a clock for task creation.
#[fixture]
pub fn clock() -> Arc<DefaultClock> {
    Arc::new(DefaultClock)
}

/// Loads a stored task or fails.
///
/// # Errors
///
/// Returns an error if the lookup fails or the task is missing.
pub async fn reload(repository: &InMemoryTaskRepository, id: TaskId) -> Result<Task, eyre::Report> {
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| eyre::eyre!("task {id} should be stored"))
}
