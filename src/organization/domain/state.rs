//! Runtime snapshot of the organization fed to autonomous analysis.

use super::{OrganizationProcess, OrganizationalPolicy, SystemConfig};
use crate::task::domain::TaskId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Processes, policy and the tasks currently attached to each process.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationState {
    processes: Vec<OrganizationProcess>,
    autonomy_config: OrganizationalPolicy,
    active_processes: BTreeMap<String, Vec<TaskId>>,
}

impl OrganizationState {
    /// Builds a state snapshot from persisted configuration.
    #[must_use]
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            processes: config.processes.clone(),
            autonomy_config: config.autonomy.clone(),
            active_processes: BTreeMap::new(),
        }
    }

    /// Returns the declared processes.
    #[must_use]
    pub fn processes(&self) -> &[OrganizationProcess] {
        &self.processes
    }

    /// Returns the autonomy policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &OrganizationalPolicy {
        &self.autonomy_config
    }

    /// Returns tracked task identifiers per process.
    #[must_use]
    pub const fn active_processes(&self) -> &BTreeMap<String, Vec<TaskId>> {
        &self.active_processes
    }

    /// Replaces the policy, typically after a configuration update.
    pub fn set_policy(&mut self, policy: OrganizationalPolicy) {
        self.autonomy_config = policy;
    }

    /// Registers a process.
    pub fn add_process(&mut self, process: OrganizationProcess) {
        self.processes.push(process);
    }

    /// Attaches a task to a process, creating the process entry on demand.
    pub fn track_task(&mut self, process_id: impl Into<String>, task_id: TaskId) {
        self.active_processes
            .entry(process_id.into())
            .or_default()
            .push(task_id);
    }
}
