//! Application settings resolved from the process environment.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::organization::domain::{OrganizationDomainError, Role};
use crate::task::adapters::completion::{DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_URL};

/// Directory holding `team.json`, `organization.json` and `tasks/`.
pub const DATA_DIR_VAR: &str = "TASKFORCE_DATA_DIR";
/// Role whose members analyze tasks instead of working them.
pub const OVERSIGHT_ROLE_VAR: &str = "TASKFORCE_OVERSIGHT_ROLE";
/// Chat-completions endpoint.
pub const COMPLETION_URL_VAR: &str = "TASKFORCE_COMPLETION_URL";
/// Chat-completions model.
pub const COMPLETION_MODEL_VAR: &str = "TASKFORCE_COMPLETION_MODEL";
/// Bearer token for the completion endpoint.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_DATA_DIR: &str = "data";
const TASKS_DIR: &str = "tasks";

/// Read access to environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` when unset or not valid UTF-8.
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Errors raised while resolving settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The oversight role variable was set to a blank value.
    #[error("invalid TASKFORCE_OVERSIGHT_ROLE: {0}")]
    InvalidOversightRole(#[source] OrganizationDomainError),
}

/// Remote completion backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    /// Chat-completions endpoint.
    pub url: String,
    /// Model name.
    pub model: String,
    /// Bearer token.
    pub api_key: String,
}

/// Settings for one processing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    data_dir: Utf8PathBuf,
    oversight_role: Role,
    completion: Option<CompletionSettings>,
}

impl AppSettings {
    /// Resolves settings from `env`, applying defaults for unset variables.
    ///
    /// The completion backend is configured only when an API key is present.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidOversightRole`] when the oversight
    /// role is blank.
    pub fn from_env(env: &impl EnvSource) -> Result<Self, SettingsError> {
        let data_dir = non_blank(env, DATA_DIR_VAR)
            .map_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR), Utf8PathBuf::from);
        let oversight_role = match env.var(OVERSIGHT_ROLE_VAR) {
            Some(raw) => Role::new(raw).map_err(SettingsError::InvalidOversightRole)?,
            None => Role::chief_executive(),
        };
        let completion = non_blank(env, API_KEY_VAR).map(|api_key| CompletionSettings {
            url: non_blank(env, COMPLETION_URL_VAR)
                .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_owned()),
            model: non_blank(env, COMPLETION_MODEL_VAR)
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_owned()),
            api_key,
        });
        Ok(Self {
            data_dir,
            oversight_role,
            completion,
        })
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Returns the directory holding one JSON file per task.
    #[must_use]
    pub fn tasks_dir(&self) -> Utf8PathBuf {
        self.data_dir.join(TASKS_DIR)
    }

    /// Returns the oversight role.
    #[must_use]
    pub const fn oversight_role(&self) -> &Role {
        &self.oversight_role
    }

    /// Returns the completion backend, if configured.
    #[must_use]
    pub const fn completion(&self) -> Option<&CompletionSettings> {
        self.completion.as_ref()
    }
}

fn non_blank(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{
        API_KEY_VAR, AppSettings, COMPLETION_MODEL_VAR, DATA_DIR_VAR, EnvSource,
        OVERSIGHT_ROLE_VAR, SettingsError,
    };
    use crate::task::adapters::completion::DEFAULT_COMPLETION_URL;
    use rstest::rstest;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl MapEnv {
        fn new(pairs: &[(&'static str, &'static str)]) -> Self {
            Self(pairs.iter().copied().collect())
        }
    }

    impl EnvSource for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|value| (*value).to_owned())
        }
    }

    #[rstest]
    fn empty_environment_uses_defaults() {
        let settings = AppSettings::from_env(&MapEnv::new(&[])).expect("defaults resolve");

        assert_eq!(settings.data_dir().as_str(), "data");
        assert_eq!(settings.tasks_dir().as_str(), "data/tasks");
        assert_eq!(settings.oversight_role().as_str(), "CEO");
        assert!(settings.completion().is_none());
    }

    #[rstest]
    fn api_key_enables_completion_backend() {
        let env = MapEnv::new(&[
            (API_KEY_VAR, "sk-test"),
            (COMPLETION_MODEL_VAR, "small-model"),
            (DATA_DIR_VAR, "/srv/org"),
        ]);
        let settings = AppSettings::from_env(&env).expect("settings resolve");

        let completion = settings.completion().expect("completion configured");
        assert_eq!(completion.api_key, "sk-test");
        assert_eq!(completion.model, "small-model");
        assert_eq!(completion.url, DEFAULT_COMPLETION_URL);
        assert_eq!(settings.data_dir().as_str(), "/srv/org");
    }

    #[rstest]
    fn blank_oversight_role_is_rejected() {
        let env = MapEnv::new(&[(OVERSIGHT_ROLE_VAR, "  ")]);

        assert!(matches!(
            AppSettings::from_env(&env),
            Err(SettingsError::InvalidOversightRole(_))
        ));
    }
}
