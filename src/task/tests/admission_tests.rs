//! Admission filter and autonomous analysis.

use std::sync::Arc;

use super::support::{HandlerGenerator, handler_generator, stored};
use crate::organization::domain::{OrganizationState, OrganizationalPolicy, SystemConfig};
use crate::task::{
    adapters::memory::{InMemoryTaskRepository, ScriptedCompletionClient},
    domain::{SYSTEM_CREATOR, SuggestionRejection, TaskStatus},
    ports::{GenerationError, TaskRepository},
    services::{AdmissionError, AdmissionService},
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;

struct Harness {
    repository: Arc<InMemoryTaskRepository>,
    completions: ScriptedCompletionClient,
    service: AdmissionService<InMemoryTaskRepository, HandlerGenerator, DefaultClock>,
}

fn harness(completions: ScriptedCompletionClient) -> Harness {
    let repository = Arc::new(InMemoryTaskRepository::new());
    let service = AdmissionService::new(
        Arc::clone(&repository),
        handler_generator(completions.clone()),
        Arc::new(DefaultClock),
    );
    Harness {
        repository,
        completions,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_suggestion_is_admitted_as_pending_root() {
    let h = harness(ScriptedCompletionClient::new());

    let outcome = h
        .service
        .admit(
            vec![json!({
                "title": "Weekly report",
                "description": "Summarize campaign metrics",
                "assignee": "bob",
                "type": "performance_analysis"
            })],
            &OrganizationalPolicy::default(),
        )
        .await
        .expect("admission should succeed");

    assert!(outcome.rejected.is_empty());
    let task = outcome.admitted.first().expect("one admitted task");
    assert_eq!(task.status(), TaskStatus::Pending);
    assert_eq!(task.created_by(), SYSTEM_CREATOR);
    assert!(task.is_root());
    assert_eq!(&stored(&h.repository, task.id()).await, task);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admission_keeps_valid_and_reports_invalid_suggestions() {
    let h = harness(ScriptedCompletionClient::new());

    let outcome = h
        .service
        .admit(
            vec![
                json!({"title": "No owner", "description": "Missing assignee"}),
                json!({"title": "Ad copy", "description": "Write headlines", "assignee": "carol", "who": "alice"}),
                json!({"description": "Untitled", "assignee": "bob"}),
            ],
            &OrganizationalPolicy::default(),
        )
        .await
        .expect("admission should succeed");

    assert_eq!(outcome.admitted.len(), 1);
    assert_eq!(outcome.admitted.first().map(|task| task.created_by()), Some("alice"));
    let reasons: Vec<(usize, SuggestionRejection)> = outcome
        .rejected
        .into_iter()
        .map(|rejected| (rejected.index, rejected.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (0, SuggestionRejection::MissingAssignee),
            (2, SuggestionRejection::MissingTitle),
        ]
    );
    let listing = h.repository.list_all().await.expect("listing should succeed");
    assert_eq!(listing.tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admitted_tasks_receive_distinct_ids() {
    let h = harness(ScriptedCompletionClient::new());
    let suggestion = json!({"title": "Same", "description": "Same", "assignee": "bob"});

    let outcome = h
        .service
        .admit(
            vec![suggestion.clone(), suggestion],
            &OrganizationalPolicy::default(),
        )
        .await
        .expect("admission should succeed");

    let ids: Vec<_> = outcome.admitted.iter().map(|task| task.id()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids.first(), ids.get(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autonomous_analysis_admits_and_tracks_process_tasks() {
    let reply = json!({
        "shouldCreateTasks": true,
        "suggestedTasks": [
            {"title": "CTR audit", "description": "Check CTR", "assignee": "bob", "processId": "performance"},
            {"title": "Banner", "description": "New banner", "assignee": "dave"},
            {"title": "Broken"}
        ]
    })
    .to_string();
    let h = harness(ScriptedCompletionClient::new().with_response(reply));
    let mut state = OrganizationState::from_config(&SystemConfig::default());

    let outcome = h
        .service
        .run_autonomous_analysis(&mut state)
        .await
        .expect("analysis should succeed");

    assert_eq!(outcome.admitted.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    let tracked = state.active_processes().get("performance").expect("process tracked");
    assert_eq!(tracked, &vec![outcome.admitted.first().map(|task| task.id()).expect("admitted")]);
    let prompts = h.completions.prompts();
    assert!(prompts.first().is_some_and(|prompt| prompt.contains("autonomyConfig")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_without_proposals_creates_nothing() {
    let h = harness(
        ScriptedCompletionClient::new()
            .with_response(r#"{"shouldCreateTasks": false, "suggestedTasks": [{"title": "x"}]}"#),
    );
    let mut state = OrganizationState::default();

    let outcome = h
        .service
        .run_autonomous_analysis(&mut state)
        .await
        .expect("analysis should succeed");

    assert!(outcome.admitted.is_empty());
    assert!(state.active_processes().is_empty());
}

#[rstest]
#[case::malformed(ScriptedCompletionClient::new().with_response("no thanks"), true)]
#[case::unavailable(ScriptedCompletionClient::new().with_failure(GenerationError::Unavailable("offline".to_owned())), false)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_analysis_admits_nothing(
    #[case] completions: ScriptedCompletionClient,
    #[case] malformed: bool,
) {
    let h = harness(completions);
    let mut state = OrganizationState::default();

    let result = h.service.run_autonomous_analysis(&mut state).await;

    if malformed {
        assert!(matches!(result, Err(AdmissionError::MalformedAnalysis(_))));
    } else {
        assert!(matches!(result, Err(AdmissionError::Generation(_))));
    }
    let listing = h.repository.list_all().await.expect("listing should succeed");
    assert!(listing.tasks.is_empty());
}
