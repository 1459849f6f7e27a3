//! Configuration for autorun.
//!
//! This module resolves the settings and credentials file paths (expanding
//! `~`), and loads the optional YAML settings file that points the client at
//! a server.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default path for the settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.autorun/settings.yml";
/// Default path for the stored credentials
const DEFAULT_CREDENTIALS_PATH: &str = "~/.autorun/credentials.yml";

/// Server used when neither the settings file nor the command line names one
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Resolves the settings file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// settings path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use autorun_core::config::get_settings_path;
///
/// let default_path = get_settings_path(None);
/// let custom_path = get_settings_path(Some("/path/to/settings.yml"));
/// assert_eq!(custom_path, "/path/to/settings.yml");
/// ```
#[must_use]
pub fn get_settings_path(settings_path_arg: Option<&str>) -> String {
    shellexpand::tilde(settings_path_arg.unwrap_or(DEFAULT_SETTINGS_PATH)).to_string()
}

/// Resolves the credentials file path, expanding `~`.
#[must_use]
pub fn get_credentials_path(credentials_path_arg: Option<&str>) -> String {
    shellexpand::tilde(credentials_path_arg.unwrap_or(DEFAULT_CREDENTIALS_PATH)).to_string()
}

/// Paths of the server endpoints, relative to the base URL. The task paths
/// contain a `{task_arn}` placeholder.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub automations: String,
    pub run: String,
    pub user: String,
    pub health: String,
    pub login: String,
    pub task_status: String,
    pub stop_task: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            automations: "/api/automations".to_string(),
            run: "/api/run".to_string(),
            user: "/api/user".to_string(),
            health: "/health".to_string(),
            login: "/login".to_string(),
            task_status: "/api/task/{task_arn}/status".to_string(),
            stop_task: "/api/task/{task_arn}/stop".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Settings {
    /// Joins an endpoint path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        self.url(&self.endpoints.login)
    }

    /// Fills a task endpoint template. The ARN goes in as is, since the
    /// server matches the rest of the path.
    #[must_use]
    pub fn task_url(&self, template: &str, task_arn: &str) -> String {
        self.url(&template.replace("{task_arn}", task_arn))
    }
}

/// Loads settings from a YAML file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(settings_path: &str) -> Result<Settings> {
    if !Path::new(settings_path).exists() {
        debug!("No settings file at `{settings_path}`, using defaults");
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(settings_path)
        .map_err(|e| Error::io_error("settings".to_string(), settings_path.to_string(), e))?;

    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_yaml::from_str(&contents).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "settings".to_string(),
            settings_path.to_string(),
            e,
        )
    })?;

    Ok(settings)
}
