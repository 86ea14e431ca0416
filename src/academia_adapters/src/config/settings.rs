use std::path::{Path, PathBuf};
use std::time::Duration;

use academia_core::{AdmissionPolicy, LANDING_VIEW, LOGIN_VIEW};
use config::{Config, Environment, File};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    CONFIG_DIR, CONFIG_FILE_STEM, DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_MILLIS, ENV_PREFIX,
    ENV_SEPARATOR,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_in_millis: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StorageSettings {
    /// JSON file holding the persisted session. Without it the session lives in memory only.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NavigationSettings {
    pub login_view: String,
    pub landing_view: String,
}

impl NavigationSettings {
    pub fn admission_policy(&self) -> AdmissionPolicy {
        AdmissionPolicy::new(&self.login_view, &self.landing_view)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub navigation: NavigationSettings,
}

impl Settings {
    /// Load `.env`, then `config/academia.json` if present, then `ACADEMIA_*` variables.
    ///
    /// Nested keys use a double underscore: `ACADEMIA_API__BASE_URL`.
    pub fn load() -> Result<Self, SettingsError> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
        Self::load_from(Path::new(CONFIG_DIR))
    }

    pub fn load_from(config_dir: &Path) -> Result<Self, SettingsError> {
        Self::build(config_dir, environment())
    }

    fn build(config_dir: &Path, environment: Environment) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.timeout_in_millis", DEFAULT_API_TIMEOUT_MILLIS)?
            .set_default("navigation.login_view", LOGIN_VIEW)?
            .set_default("navigation.landing_view", LANDING_VIEW)?
            .add_source(File::from(config_dir.join(CONFIG_FILE_STEM)).required(false))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        Url::parse(&self.api.base_url).map_err(|e| SettingsError::InvalidBaseUrl {
            url: self.api.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
