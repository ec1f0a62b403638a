//! Then steps for task processing cycle BDD scenarios.

use super::world::CycleWorld;
use rstest_bdd_macros::then;
use taskforce::task::{domain::TaskStatus, services::ReportAction};

#[then(r#"the task "{title}" is "{status}""#)]
fn task_status_is(world: &CycleWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.stored_task(&title)?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected {title:?} to be {expected}, found {}",
            task.status()
        ));
    }

    Ok(())
}

#[then(r#"the task "{title}" carries a warning"#)]
fn task_carries_warning(world: &CycleWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.stored_task(&title)?;
    eyre::ensure!(task.warnings().is_some(), "expected {title:?} to carry a warning");
    Ok(())
}

#[then(r#"the task "{title}" was reported as "{action}""#)]
fn task_was_reported(world: &CycleWorld, title: String, action: String) -> Result<(), eyre::Report> {
    let expected = [
        ReportAction::Started,
        ReportAction::Continued,
        ReportAction::AutoCompleted,
    ]
    .into_iter()
    .find(|candidate| candidate.as_str() == action)
    .ok_or_else(|| eyre::eyre!("unknown report action {action:?}"))?;
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing processing report"))?;
    let id = world.task_id(&title)?;

    eyre::ensure!(
        report.entry(id, expected).is_some(),
        "expected {title:?} to be reported as {action}, report was:\n{report}"
    );
    Ok(())
}
