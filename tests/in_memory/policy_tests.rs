//! Policy updates flowing into organization state snapshots.

use std::sync::Arc;

use rstest::rstest;
use taskforce::organization::{
    adapters::memory::InMemoryConfigStore,
    domain::{OrganizationalPolicy, PolicyUpdate, Role},
    ports::ConfigStore,
    services::PolicyService,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_yields_default_policy() {
    let service = PolicyService::new(Arc::new(InMemoryConfigStore::new()));

    assert_eq!(service.current_policy().await, OrganizationalPolicy::default());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_is_saved_and_visible_in_state() -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryConfigStore::new());
    let service = PolicyService::new(Arc::clone(&store));

    let updated = service
        .update_policy(
            PolicyUpdate::default()
                .with_max_tasks_per_day(3)
                .with_require_approval_from([Role::new("CMO")?]),
        )
        .await?;

    eyre::ensure!(updated.max_tasks_per_day == 3, "cap should change");
    eyre::ensure!(updated.max_budget_per_task == 1000, "budget should be kept");
    let saved = store
        .load()
        .await?
        .ok_or_else(|| eyre::eyre!("configuration should be saved"))?;
    eyre::ensure!(saved.autonomy == updated, "saved policy should match");
    let state = service.organization_state().await;
    eyre::ensure!(state.policy() == &updated, "state should reflect the update");
    Ok(())
}
