//! When steps for task processing cycle BDD scenarios.

use super::world::{CycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("a processing cycle runs")]
fn processing_cycle_runs(world: &mut CycleWorld) -> Result<(), eyre::Report> {
    let directory = world
        .directory
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing roster in scenario world"))?;
    let report = run_async(world.cycle.run(directory)).wrap_err("run processing cycle")?;
    world.last_report = Some(report);
    Ok(())
}
