//! Runs one autonomous-analysis pass and one processing cycle.
//!
//! Usage:
//!
//! ```text
//! taskforce_cycle
//! ```
//!
//! The data directory (`TASKFORCE_DATA_DIR`, default `data`) holds
//! `team.json`, `organization.json` and one JSON file per task under
//! `tasks/`. When `OPENAI_API_KEY` is set, free-form prompts go to the
//! configured chat-completions endpoint; otherwise they are answered offline
//! and autonomous analysis proposes nothing.
//!
//! Log verbosity follows `RUST_LOG` and defaults to `info`.

use std::sync::Arc;

use mockable::DefaultClock;
use taskforce::config::{AppSettings, ProcessEnv};
use taskforce::organization::{
    adapters::file::{JsonFileConfigStore, JsonFileRoster, open_data_dir},
    ports::EmployeeRoster,
    services::PolicyService,
};
use taskforce::task::{
    adapters::{
        completion::ChatCompletionClient,
        file::JsonFileTaskRepository,
        handlers::{HandlerGenerationService, HandlerRegistry},
        memory::ScriptedCompletionClient,
    },
    ports::CompletionClient,
    services::{AdmissionService, ProcessingCycle},
};
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const OFFLINE_ANALYSIS: &str = r#"{"shouldCreateTasks": false, "suggestedTasks": []}"#;

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = AppSettings::from_env(&ProcessEnv)?;
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async {
        if let Some(completion) = settings.completion() {
            let client = ChatCompletionClient::new(
                completion.url.clone(),
                completion.model.clone(),
                completion.api_key.clone(),
            );
            tracing::info!(model = client.model(), "using remote completion backend");
            return run(&settings, Arc::new(client)).await;
        }
        tracing::info!("no API key configured; answering prompts offline");
        let client = ScriptedCompletionClient::new().with_response(OFFLINE_ANALYSIS);
        run(&settings, Arc::new(client)).await
    })
}

async fn run<Cc>(settings: &AppSettings, completions: Arc<Cc>) -> Result<(), BoxError>
where
    Cc: CompletionClient + 'static,
{
    let data_dir = settings.data_dir();
    let roster = JsonFileRoster::new(open_data_dir(data_dir)?);
    let policy = PolicyService::new(Arc::new(JsonFileConfigStore::new(open_data_dir(
        data_dir,
    )?)));
    let repository = Arc::new(JsonFileTaskRepository::new(open_data_dir(
        &settings.tasks_dir(),
    )?));
    let generator = Arc::new(HandlerGenerationService::new(
        HandlerRegistry::with_default_handlers(),
        completions,
    ));
    let clock = Arc::new(DefaultClock);

    let directory = roster.load_directory().await?;
    tracing::info!(employees = directory.len(), data_dir = %data_dir, "roster loaded");

    let mut state = policy.organization_state().await;
    let admission = AdmissionService::new(
        Arc::clone(&repository),
        Arc::clone(&generator),
        Arc::clone(&clock),
    );
    match admission.run_autonomous_analysis(&mut state).await {
        Ok(outcome) => tracing::info!(
            admitted = outcome.admitted.len(),
            rejected = outcome.rejected.len(),
            "autonomous analysis finished"
        ),
        Err(err) => tracing::warn!(error = %err, "autonomous analysis skipped"),
    }

    let cycle = ProcessingCycle::new(repository, generator, clock)
        .with_oversight_role(settings.oversight_role().clone());
    let report = cycle.run(&directory).await?;
    tracing::info!("{report}");
    Ok(())
}
