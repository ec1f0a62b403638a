//! Shared builders for task tests.

use std::sync::Arc;

use crate::organization::domain::{Employee, EmployeeId, OrganizationDirectory, Role};
use crate::task::{
    adapters::{
        handlers::{HandlerGenerationService, HandlerRegistry},
        memory::{InMemoryTaskRepository, ScriptedCompletionClient},
    },
    domain::{Task, TaskDraft, TaskId, TaskType},
    ports::TaskRepository,
};
use mockable::DefaultClock;

pub type HandlerGenerator = HandlerGenerationService<ScriptedCompletionClient>;

pub fn employee_id(raw: &str) -> EmployeeId {
    EmployeeId::new(raw).expect("valid employee id")
}

pub fn task_type(raw: &str) -> TaskType {
    TaskType::new(raw).expect("valid task type")
}

pub fn employee(id: &str, role: &str, reports_to: Option<&str>) -> Employee {
    let base = Employee::new(employee_id(id), id.to_uppercase(), Role::new(role).expect("valid role"));
    match reports_to {
        Some(superior) => base.reporting_to(employee_id(superior)),
        None => base,
    }
}

/// ceo -> alice -> {bob, carol}; dave reports to bob.
pub fn directory() -> OrganizationDirectory {
    OrganizationDirectory::new(vec![
        employee("ceo", "CEO", None),
        employee("alice", "CMO", Some("ceo")),
        employee("bob", "Designer", Some("alice")),
        employee("carol", "Copywriter", Some("alice")),
        employee("dave", "Intern", Some("bob")),
    ])
    .expect("valid directory")
}

pub fn member<'a>(directory: &'a OrganizationDirectory, id: &str) -> &'a Employee {
    directory.find(&employee_id(id)).expect("employee in directory")
}

pub fn draft(title: &str, assignee: &str, kind: &str) -> TaskDraft {
    TaskDraft::new(title, format!("{title} details"), employee_id(assignee), task_type(kind))
}

pub fn mint(draft: TaskDraft) -> Task {
    Task::new(draft, &DefaultClock).expect("valid task")
}

pub fn handler_generator(completions: ScriptedCompletionClient) -> Arc<HandlerGenerator> {
    Arc::new(HandlerGenerationService::new(
        HandlerRegistry::with_default_handlers(),
        Arc::new(completions),
    ))
}

pub async fn stored(repository: &InMemoryTaskRepository, id: TaskId) -> Task {
    repository
        .find_by_id(id)
        .await
        .expect("lookup should succeed")
        .expect("task should exist")
}
