//! Parent/child queries over task collections.

use super::{Task, TaskId, TaskStatus};
use std::collections::HashMap;

/// Groups subtasks by their parent identifier.
#[must_use]
pub fn index_subtasks(tasks: &[Task]) -> HashMap<TaskId, Vec<&Task>> {
    let mut index: HashMap<TaskId, Vec<&Task>> = HashMap::new();
    for task in tasks {
        if let Some(parent) = task.parent_id() {
            index.entry(parent).or_default().push(task);
        }
    }
    index
}

/// Returns `true` when `subtasks` is non-empty and every entry is completed.
#[must_use]
pub fn all_completed<'a>(subtasks: impl IntoIterator<Item = &'a Task>) -> bool {
    let mut seen_any = false;
    for subtask in subtasks {
        if subtask.status() != TaskStatus::Completed {
            return false;
        }
        seen_any = true;
    }
    seen_any
}

/// Returns root tasks that are `in_progress` and whose subtasks have all
/// completed.
///
/// Roots without subtasks are never returned.
#[must_use]
pub fn rollup_candidates(tasks: &[Task]) -> Vec<TaskId> {
    let index = index_subtasks(tasks);
    tasks
        .iter()
        .filter(|task| task.is_root() && task.status() == TaskStatus::InProgress)
        .filter(|task| {
            index
                .get(&task.id())
                .is_some_and(|subtasks| all_completed(subtasks.iter().copied()))
        })
        .map(Task::id)
        .collect()
}
