//! JSON file task repository.
//!
//! Each task lives in `<task id>.json` inside a capability directory and is
//! overwritten wholesale on every update. There is no locking; a single
//! caller is expected to drive each processing cycle.

use async_trait::async_trait;
use cap_std::fs::Dir;
use std::io;
use std::sync::Arc;

use crate::task::{
    domain::{Task, TaskId},
    ports::{
        TaskListing, TaskRepository, TaskRepositoryError, TaskRepositoryResult, UnreadableTask,
    },
};

const RECORD_EXTENSION: &str = ".json";

/// Task repository storing one pretty-printed JSON file per task.
#[derive(Debug, Clone)]
pub struct JsonFileTaskRepository {
    dir: Arc<Dir>,
}

impl JsonFileTaskRepository {
    /// Creates a repository over `dir`.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    /// Runs blocking file work on the blocking thread pool.
    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&Dir) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(TaskRepositoryError::persistence)?
    }
}

fn record_name(id: TaskId) -> String {
    format!("{id}{RECORD_EXTENSION}")
}

fn write_record(dir: &Dir, task: &Task) -> TaskRepositoryResult<()> {
    let encoded = serde_json::to_string_pretty(task).map_err(TaskRepositoryError::persistence)?;
    dir.write(record_name(task.id()), encoded)
        .map_err(TaskRepositoryError::persistence)
}

fn exists(dir: &Dir, id: TaskId) -> TaskRepositoryResult<bool> {
    match dir.metadata(record_name(id)) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(TaskRepositoryError::persistence(err)),
    }
}

fn read_record(dir: &Dir, key: &str) -> TaskRepositoryResult<Task> {
    let raw = dir
        .read_to_string(key)
        .map_err(TaskRepositoryError::persistence)?;
    serde_json::from_str(&raw).map_err(|err| TaskRepositoryError::Corrupt {
        key: key.to_owned(),
        reason: err.to_string(),
    })
}

fn record_keys(dir: &Dir) -> io::Result<Vec<String>> {
    let mut keys = Vec::new();
    for entry in dir.entries()? {
        let dir_entry = entry?;
        if !dir_entry.file_type()?.is_file() {
            continue;
        }
        match dir_entry.file_name().to_str() {
            Some(name) if name.ends_with(RECORD_EXTENSION) => keys.push(name.to_owned()),
            _ => {}
        }
    }
    keys.sort();
    Ok(keys)
}

fn read_listing(dir: &Dir) -> TaskRepositoryResult<TaskListing> {
    let keys = record_keys(dir).map_err(TaskRepositoryError::persistence)?;
    let mut listing = TaskListing::default();
    for key in keys {
        match read_record(dir, &key) {
            Ok(task) => listing.tasks.push(task),
            Err(err) => {
                tracing::warn!(record = %key, error = %err, "skipping unreadable task record");
                listing.unreadable.push(UnreadableTask {
                    key,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(listing)
}

#[async_trait]
impl TaskRepository for JsonFileTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let record = task.clone();
        self.run_blocking(move |dir| {
            if exists(dir, record.id())? {
                return Err(TaskRepositoryError::DuplicateTask(record.id()));
            }
            write_record(dir, &record)
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let record = task.clone();
        self.run_blocking(move |dir| {
            if !exists(dir, record.id())? {
                return Err(TaskRepositoryError::NotFound(record.id()));
            }
            write_record(dir, &record)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |dir| {
            if !exists(dir, id)? {
                return Ok(None);
            }
            read_record(dir, &record_name(id)).map(Some)
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<TaskListing> {
        self.run_blocking(read_listing).await
    }
}
