//! Prompt templates for planning and autonomous analysis.

use minijinja::Environment;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::organization::domain::{Employee, OrganizationState};
use crate::task::domain::TaskType;

/// Info string of a fenced JSON block.
const JSON_TAG: &str = "json";

const PLANNING_TEMPLATE: &str = r#"As {{ creator.role }} ({{ creator.id }}), create a task of type "{{ task_type }}" for {{ assignee.role }} ({{ assignee.id }}).
{% if brief %}
Brief: {{ brief }}
{% endif %}
Organizational context:
- Assignee permissions: {{ assignee.permissions | join(", ") if assignee.permissions else "none" }}
- Assignee subordinates: {% for sub in subordinates %}{{ sub.role }} ({{ sub.permissions | join(", ") }}){% if not loop.last %}; {% endif %}{% else %}none{% endfor %}

The task must suit the assignee's role and permissions. Split it into subtasks for the subordinates when that helps.
Reply with JSON only:
{"title": "...", "description": "...", "needs_split": true, "subtasks": [{"title": "...", "description": "...", "type": "..."}]}"#;

const ORGANIZATION_TEMPLATE: &str = r#"Analyze the state of the organization and propose actions.
{{ state }}
Reply with JSON only:
{"shouldCreateTasks": true, "suggestedTasks": [{"title": "...", "description": "...", "assignee": "...", "type": "...", "processId": "..."}]}"#;

/// Failure to render a prompt template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} prompt: {reason}")]
pub struct PromptRenderError {
    /// Template name.
    pub template: &'static str,
    /// Renderer message.
    pub reason: String,
}

#[derive(Debug, Serialize)]
struct EmployeeContext<'a> {
    id: &'a str,
    role: &'a str,
    permissions: Vec<&'a str>,
}

impl<'a> From<&'a Employee> for EmployeeContext<'a> {
    fn from(employee: &'a Employee) -> Self {
        Self {
            id: employee.id().as_str(),
            role: employee.role().as_str(),
            permissions: employee.permissions().iter().map(String::as_str).collect(),
        }
    }
}

/// Inputs for the decomposition prompt.
#[derive(Debug, Clone, Copy)]
pub struct PlanningPrompt<'a> {
    /// Employee requesting the task.
    pub creator: &'a Employee,
    /// Employee receiving the root task.
    pub assignee: &'a Employee,
    /// Root task type.
    pub task_type: &'a TaskType,
    /// Optional free-text brief.
    pub brief: Option<&'a str>,
    /// Subordinates of the assignee, in roster order.
    pub subordinates: &'a [&'a Employee],
}

/// Renders the decomposition prompt.
///
/// # Errors
///
/// Returns [`PromptRenderError`] when the template fails to render.
pub fn render_planning_prompt(prompt: &PlanningPrompt<'_>) -> Result<String, PromptRenderError> {
    let mut context = Map::new();
    insert(&mut context, "creator", &EmployeeContext::from(prompt.creator));
    insert(&mut context, "assignee", &EmployeeContext::from(prompt.assignee));
    context.insert(
        "task_type".to_owned(),
        Value::String(prompt.task_type.as_str().to_owned()),
    );
    if let Some(brief) = prompt.brief {
        context.insert("brief".to_owned(), Value::String(brief.to_owned()));
    }
    let subordinates: Vec<EmployeeContext<'_>> = prompt
        .subordinates
        .iter()
        .map(|employee| EmployeeContext::from(*employee))
        .collect();
    insert(&mut context, "subordinates", &subordinates);
    render("planning", PLANNING_TEMPLATE, context)
}

/// Renders the autonomous-analysis prompt for `state`.
///
/// # Errors
///
/// Returns [`PromptRenderError`] when the state cannot be encoded or the
/// template fails to render.
pub fn render_organization_prompt(state: &OrganizationState) -> Result<String, PromptRenderError> {
    let encoded = serde_json::to_string_pretty(state).map_err(|err| PromptRenderError {
        template: "organization",
        reason: err.to_string(),
    })?;
    let mut context = Map::new();
    context.insert("state".to_owned(), Value::String(encoded));
    render("organization", ORGANIZATION_TEMPLATE, context)
}

fn insert(context: &mut Map<String, Value>, key: &str, value: &impl Serialize) {
    // Context structs hold only strings, which always encode.
    if let Ok(encoded) = serde_json::to_value(value) {
        context.insert(key.to_owned(), encoded);
    }
}

fn render(
    template_name: &'static str,
    template: &str,
    context: Map<String, Value>,
) -> Result<String, PromptRenderError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|error| PromptRenderError {
            template: template_name,
            reason: error.to_string(),
        })
}

/// Returns the JSON document inside `reply`.
///
/// When the reply holds a Markdown code fence, only the first fenced block is
/// kept, so prose around it is ignored. A `json` info string is dropped in
/// any letter case.
#[must_use]
pub fn json_payload(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some((_, fenced)) = trimmed.split_once("```") else {
        return trimmed;
    };
    let body = fenced.split_once("```").map_or(fenced, |(inside, _)| inside);
    body.get(..JSON_TAG.len())
        .filter(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        .and_then(|_| body.get(JSON_TAG.len()..))
        .unwrap_or(body)
        .trim()
}
