//! Given steps for task processing cycle BDD scenarios.

use super::world::{CycleWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskforce::organization::domain::{Employee, EmployeeId, OrganizationDirectory, Role};
use taskforce::task::{
    domain::{Task, TaskDraft, TaskType},
    ports::TaskRepository,
};

fn member(id: &str, role: &str, reports_to: Option<&str>) -> Result<Employee, eyre::Report> {
    let base = Employee::new(EmployeeId::new(id)?, id, Role::new(role)?);
    Ok(match reports_to {
        Some(superior) => base.reporting_to(EmployeeId::new(superior)?),
        None => base,
    })
}

fn seed(world: &mut CycleWorld, task: Task) -> Result<(), eyre::Report> {
    run_async(world.repository.store(&task)).wrap_err("seed task in scenario setup")?;
    world.tasks_by_title.insert(task.title().to_owned(), task.id());
    Ok(())
}

fn draft(title: &str, kind: &str, assignee: &str) -> Result<TaskDraft, eyre::Report> {
    Ok(TaskDraft::new(
        title,
        format!("{title} for the quarter"),
        EmployeeId::new(assignee)?,
        TaskType::new(kind)?,
    ))
}

#[given("the marketing team")]
fn marketing_team(world: &mut CycleWorld) -> Result<(), eyre::Report> {
    world.directory = Some(OrganizationDirectory::new(vec![
        member("ceo", "CEO", None)?,
        member("cmo", "CMO", Some("ceo"))?,
        member("designer", "Designer", Some("cmo"))?,
        member("writer", "Copywriter", Some("cmo"))?,
        member("junior", "Junior Designer", Some("designer"))?,
    ])?);
    Ok(())
}

#[given(r#"a pending "{kind}" task "{title}" assigned to "{assignee}""#)]
fn pending_task(
    world: &mut CycleWorld,
    kind: String,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(draft(&title, &kind, &assignee)?, &DefaultClock)?;
    seed(world, task)
}

#[given(r#"an in-progress "{kind}" task "{title}" assigned to "{assignee}""#)]
fn in_progress_task(
    world: &mut CycleWorld,
    kind: String,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let mut task = Task::new(draft(&title, &kind, &assignee)?, &DefaultClock)?;
    task.record_work("kick-off notes", &DefaultClock)?;
    seed(world, task)
}

#[given(r#"a pending subtask "{title}" of "{parent}" assigned to "{assignee}""#)]
fn pending_subtask(
    world: &mut CycleWorld,
    title: String,
    parent: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let parent_id = world.task_id(&parent)?;
    let task = Task::new(
        draft(&title, "creative_design", &assignee)?.with_parent(parent_id),
        &DefaultClock,
    )?;
    seed(world, task)
}
