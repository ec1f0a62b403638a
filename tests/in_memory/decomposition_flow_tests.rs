//! Planning a task, then processing it until its root rolls up.

use std::sync::Arc;

use crate::in_memory::helpers::{clock, employee_id, generator, reload, repository, team};
use mockable::DefaultClock;
use rstest::rstest;
use taskforce::organization::domain::OrganizationDirectory;
use taskforce::task::{
    adapters::memory::{InMemoryTaskRepository, ScriptedCompletionClient},
    domain::{TaskStatus, TaskType},
    services::{CreateTaskRequest, DecompositionPlanner, ProcessingCycle, ReportAction},
};

const STRATEGY_PLAN: &str = r#"```json
{
    "title": "Autumn launch strategy",
    "description": "Plan the autumn launch visuals",
    "needs_split": true,
    "subtasks": [
        {"title": "Mood board", "description": "Collect references", "type": "creative_design"},
        {"title": "Launch copy", "description": "Draft taglines", "type": "content_creation"}
    ]
}
```"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planned_work_completes_and_rolls_up_in_one_cycle(
    team: OrganizationDirectory,
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<DefaultClock>,
) -> Result<(), eyre::Report> {
    let planner = DecompositionPlanner::new(
        Arc::clone(&repository),
        generator(ScriptedCompletionClient::new().with_response(STRATEGY_PLAN)),
        Arc::clone(&clock),
    );
    let request = CreateTaskRequest::new(
        employee_id("cmo")?,
        employee_id("designer")?,
        TaskType::new("campaign_strategy")?,
    )
    .with_brief("Autumn launch");
    let junior = employee_id("junior")?;
    let planned = planner.plan(&team, request).await?;
    eyre::ensure!(planned.children.len() == 2, "two subtasks expected");
    eyre::ensure!(
        planned.children.iter().all(|child| child.assignee() == &junior),
        "subtasks go to the designer's report"
    );

    let cycle = ProcessingCycle::new(
        Arc::clone(&repository),
        generator(ScriptedCompletionClient::new()),
        clock,
    );
    let report = cycle.run(&team).await?;

    let root = reload(&repository, planned.root.id()).await?;
    eyre::ensure!(root.status() == TaskStatus::Completed, "root should roll up");
    eyre::ensure!(
        root.warnings().is_some_and(|warning| warning.contains("campaign_strategy")),
        "unhandled root type should be flagged"
    );
    eyre::ensure!(
        report
            .entry(root.id(), ReportAction::AutoCompleted)
            .is_some(),
        "rollup should be reported"
    );
    for child in &planned.children {
        let stored = reload(&repository, child.id()).await?;
        eyre::ensure!(stored.status() == TaskStatus::Completed, "subtask should complete");
        eyre::ensure!(stored.result().is_some(), "subtask should carry work output");
        eyre::ensure!(stored.review().is_some(), "subtask should carry a review");
    }
    eyre::ensure!(report.failed_count() == 0, "no failures expected: {report}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_cycle_has_nothing_left_to_do(
    team: OrganizationDirectory,
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<DefaultClock>,
) -> Result<(), eyre::Report> {
    let planner = DecompositionPlanner::new(
        Arc::clone(&repository),
        generator(ScriptedCompletionClient::new().with_response(STRATEGY_PLAN)),
        Arc::clone(&clock),
    );
    planner
        .plan(
            &team,
            CreateTaskRequest::new(
                employee_id("cmo")?,
                employee_id("designer")?,
                TaskType::new("creative_design")?,
            ),
        )
        .await?;
    let cycle = ProcessingCycle::new(
        Arc::clone(&repository),
        generator(ScriptedCompletionClient::new()),
        clock,
    );

    cycle.run(&team).await?;
    let second = cycle.run(&team).await?;

    eyre::ensure!(
        second.entries.is_empty() && second.failures.is_empty(),
        "completed work should be left alone: {second}"
    );
    Ok(())
}
