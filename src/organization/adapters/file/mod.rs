//! JSON file adapters for the roster and organization configuration.
//!
//! Both adapters operate inside a capability directory so that file names are
//! resolved relative to the configured data directory only.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;

use crate::organization::{
    domain::{Employee, SystemConfig},
    ports::{
        ConfigStore, ConfigStoreError, ConfigStoreResult, EmployeeRoster, RosterError,
        RosterResult,
    },
};

/// Default roster file name.
pub const ROSTER_FILE: &str = "team.json";
/// Default configuration file name.
pub const CONFIG_FILE: &str = "organization.json";

/// Opens `path` as a capability directory, creating it when missing.
///
/// # Errors
///
/// Returns the underlying I/O error when the directory cannot be created or
/// opened.
pub fn open_data_dir(path: &Utf8Path) -> io::Result<Dir> {
    Dir::create_ambient_dir_all(path.as_std_path(), ambient_authority())?;
    Dir::open_ambient_dir(path.as_std_path(), ambient_authority())
}

#[derive(Debug, Serialize, Deserialize)]
struct RosterDocument {
    employees: Vec<Employee>,
}

/// Runs blocking file work and maps join errors into the caller's error type.
async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Roster backed by a `{"employees": [...]}` JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRoster {
    dir: Arc<Dir>,
    file_name: String,
}

impl JsonFileRoster {
    /// Creates a roster reading [`ROSTER_FILE`] from `dir`.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: ROSTER_FILE.to_owned(),
        }
    }

    /// Overrides the roster file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Writes `employees` as the roster document.
    ///
    /// Blocks the calling thread; intended for seeding a data directory.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Persistence`] when encoding or writing fails.
    pub fn write_employees(&self, employees: Vec<Employee>) -> RosterResult<()> {
        let document = RosterDocument { employees };
        let encoded = serde_json::to_string_pretty(&document).map_err(RosterError::persistence)?;
        self.dir
            .write(&self.file_name, encoded)
            .map_err(RosterError::persistence)
    }
}

#[async_trait]
impl EmployeeRoster for JsonFileRoster {
    async fn list_employees(&self) -> RosterResult<Vec<Employee>> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        run_blocking_with(
            move || {
                let raw = dir
                    .read_to_string(&file_name)
                    .map_err(RosterError::persistence)?;
                let document: RosterDocument =
                    serde_json::from_str(&raw).map_err(RosterError::persistence)?;
                Ok(document.employees)
            },
            RosterError::persistence,
        )
        .await
    }
}

/// Configuration store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileConfigStore {
    dir: Arc<Dir>,
    file_name: String,
}

impl JsonFileConfigStore {
    /// Creates a store using [`CONFIG_FILE`] inside `dir`.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: CONFIG_FILE.to_owned(),
        }
    }
}

#[async_trait]
impl ConfigStore for JsonFileConfigStore {
    async fn load(&self) -> ConfigStoreResult<Option<SystemConfig>> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        run_blocking_with(
            move || {
                let raw = match dir.read_to_string(&file_name) {
                    Ok(raw) => raw,
                    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
                    Err(err) => return Err(ConfigStoreError::persistence(err)),
                };
                serde_json::from_str(&raw)
                    .map(Some)
                    .map_err(|err| ConfigStoreError::Malformed(err.to_string()))
            },
            ConfigStoreError::persistence,
        )
        .await
    }

    async fn save(&self, config: &SystemConfig) -> ConfigStoreResult<()> {
        let encoded =
            serde_json::to_string_pretty(config).map_err(ConfigStoreError::persistence)?;
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        run_blocking_with(
            move || {
                dir.write(&file_name, encoded)
                    .map_err(ConfigStoreError::persistence)
            },
            ConfigStoreError::persistence,
        )
        .await
    }
}
