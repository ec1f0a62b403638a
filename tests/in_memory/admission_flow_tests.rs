//! Autonomous analysis feeding admitted work into the processing cycle.

use std::sync::Arc;

use crate::in_memory::helpers::{clock, generator, reload, repository, team};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use taskforce::organization::{
    adapters::memory::InMemoryConfigStore,
    domain::{OrganizationDirectory, OrganizationProcess, SystemConfig},
    services::PolicyService,
};
use taskforce::task::{
    adapters::memory::{InMemoryTaskRepository, ScriptedCompletionClient},
    domain::TaskStatus,
    services::{AdmissionService, ProcessingCycle, ReportAction},
};

fn performance_process() -> OrganizationProcess {
    OrganizationProcess {
        id: "performance".to_owned(),
        name: "Performance review".to_owned(),
        description: "Weekly campaign health check".to_owned(),
        required_permissions: Vec::new(),
        roles: Vec::new(),
        metrics: Vec::new(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admitted_suggestions_are_worked_in_the_next_cycle(
    team: OrganizationDirectory,
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<DefaultClock>,
) -> Result<(), eyre::Report> {
    let config = SystemConfig {
        processes: vec![performance_process()],
        ..SystemConfig::default()
    };
    let policy = PolicyService::new(Arc::new(InMemoryConfigStore::with_config(config)));
    let reply = json!({
        "shouldCreateTasks": true,
        "suggestedTasks": [
            {
                "title": "Weekly metrics",
                "description": "Pull campaign numbers",
                "assignee": "designer",
                "type": "media_buying",
                "processId": "performance"
            },
            {"title": "Orphan idea", "description": "Nobody owns this"}
        ]
    });
    let admission = AdmissionService::new(
        Arc::clone(&repository),
        generator(ScriptedCompletionClient::new().with_response(reply.to_string())),
        Arc::clone(&clock),
    );
    let mut state = policy.organization_state().await;

    let outcome = admission.run_autonomous_analysis(&mut state).await?;
    let admitted = outcome
        .admitted
        .first()
        .ok_or_else(|| eyre::eyre!("one suggestion should be admitted"))?;
    eyre::ensure!(outcome.rejected.len() == 1, "orphan idea should be rejected");
    eyre::ensure!(
        state
            .active_processes()
            .get("performance")
            .is_some_and(|ids| ids.contains(&admitted.id())),
        "admitted task should be tracked under its process"
    );

    let cycle = ProcessingCycle::new(
        Arc::clone(&repository),
        generator(ScriptedCompletionClient::new()),
        clock,
    );
    let report = cycle.run(&team).await?;

    eyre::ensure!(
        report.entry(admitted.id(), ReportAction::Started).is_some(),
        "admitted task should be started: {report}"
    );
    let worked = reload(&repository, admitted.id()).await?;
    eyre::ensure!(worked.status() == TaskStatus::Completed, "task should complete");
    let output = worked
        .result()
        .map(|result| result.output.clone())
        .ok_or_else(|| eyre::eyre!("work output expected"))?;
    let metrics: serde_json::Value = serde_json::from_str(&output)?;
    eyre::ensure!(metrics.get("ctr").is_some(), "metrics output expected: {output}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quiet_analysis_leaves_the_repository_empty(
    repository: Arc<InMemoryTaskRepository>,
    clock: Arc<DefaultClock>,
) -> Result<(), eyre::Report> {
    let admission = AdmissionService::new(
        Arc::clone(&repository),
        generator(
            ScriptedCompletionClient::new()
                .with_response(r#"{"shouldCreateTasks": false, "suggestedTasks": []}"#),
        ),
        clock,
    );
    let mut state = PolicyService::new(Arc::new(InMemoryConfigStore::new()))
        .organization_state()
        .await;

    let outcome = admission.run_autonomous_analysis(&mut state).await?;

    eyre::ensure!(outcome.admitted.is_empty(), "nothing should be admitted");
    eyre::ensure!(state.active_processes().is_empty(), "nothing should be tracked");
    Ok(())
}
