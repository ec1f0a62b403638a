//! Organizational policy and persisted system configuration.

use super::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Autonomy limits consulted when admitting machine-proposed tasks.
///
/// `max_tasks_per_day` and `max_budget_per_task` are declared limits only;
/// admission does not enforce them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationalPolicy {
    /// Declared cap on autonomously created tasks per day.
    pub max_tasks_per_day: u32,
    /// Declared cap on budget per autonomously created task.
    pub max_budget_per_task: u64,
    /// Roles whose approval autonomous work nominally requires.
    pub require_approval_from: Vec<Role>,
    /// Hours after which stalled work should be escalated.
    pub auto_escalate_after_hours: u32,
}

impl Default for OrganizationalPolicy {
    fn default() -> Self {
        Self {
            max_tasks_per_day: 10,
            max_budget_per_task: 1000,
            require_approval_from: vec![Role::chief_executive()],
            auto_escalate_after_hours: 24,
        }
    }
}

impl OrganizationalPolicy {
    /// Returns a copy of this policy with every field set in `update`
    /// replaced.
    #[must_use]
    pub fn merged(&self, update: PolicyUpdate) -> Self {
        let PolicyUpdate {
            max_tasks_per_day,
            max_budget_per_task,
            require_approval_from,
            auto_escalate_after_hours,
        } = update;
        Self {
            max_tasks_per_day: max_tasks_per_day.unwrap_or(self.max_tasks_per_day),
            max_budget_per_task: max_budget_per_task.unwrap_or(self.max_budget_per_task),
            require_approval_from: require_approval_from
                .unwrap_or_else(|| self.require_approval_from.clone()),
            auto_escalate_after_hours: auto_escalate_after_hours
                .unwrap_or(self.auto_escalate_after_hours),
        }
    }
}

/// Partial policy update; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyUpdate {
    /// New daily task cap.
    #[serde(default)]
    pub max_tasks_per_day: Option<u32>,
    /// New per-task budget cap.
    #[serde(default)]
    pub max_budget_per_task: Option<u64>,
    /// New approval roles.
    #[serde(default)]
    pub require_approval_from: Option<Vec<Role>>,
    /// New escalation delay in hours.
    #[serde(default)]
    pub auto_escalate_after_hours: Option<u32>,
}

impl PolicyUpdate {
    /// Sets the daily task cap.
    #[must_use]
    pub const fn with_max_tasks_per_day(mut self, value: u32) -> Self {
        self.max_tasks_per_day = Some(value);
        self
    }

    /// Sets the per-task budget cap.
    #[must_use]
    pub const fn with_max_budget_per_task(mut self, value: u64) -> Self {
        self.max_budget_per_task = Some(value);
        self
    }

    /// Sets the approval roles.
    #[must_use]
    pub fn with_require_approval_from(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.require_approval_from = Some(roles.into_iter().collect());
        self
    }

    /// Sets the escalation delay.
    #[must_use]
    pub const fn with_auto_escalate_after_hours(mut self, hours: u32) -> Self {
        self.auto_escalate_after_hours = Some(hours);
        self
    }
}

/// Threshold that triggers escalation for an organizational process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricConfig {
    /// Metric name.
    pub name: String,
    /// Threshold value.
    pub threshold: f64,
    /// Role that receives escalations, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalate_to_role: Option<Role>,
}

/// A recurring organizational process tracked by the autonomy layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationProcess {
    /// Process identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Permissions needed to take part in the process.
    #[serde(default)]
    pub required_permissions: Vec<String>,
    /// Roles taking part in the process.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Escalation metrics.
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

/// Time and error thresholds keyed by process or `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationRules {
    /// Hours before escalation.
    pub time_thresholds: BTreeMap<String, u32>,
    /// Error counts before escalation.
    pub error_thresholds: BTreeMap<String, u32>,
}

impl Default for EscalationRules {
    fn default() -> Self {
        Self {
            time_thresholds: BTreeMap::from([("default".to_owned(), 24)]),
            error_thresholds: BTreeMap::from([("default".to_owned(), 3)]),
        }
    }
}

/// Persisted organization configuration (`organization.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    /// Declared organizational processes.
    #[serde(default)]
    pub processes: Vec<OrganizationProcess>,
    /// Autonomy policy.
    #[serde(default)]
    pub autonomy: OrganizationalPolicy,
    /// Escalation thresholds.
    #[serde(default)]
    pub escalation_rules: EscalationRules,
}
