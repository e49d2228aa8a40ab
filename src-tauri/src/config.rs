//! Application Configuration
//!
//! Layered with figment: built-in defaults, then `pantry.json` from the app
//! config directory, then `PANTRY_*` environment variables.

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "pantry.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PantryConfig {
    pub auth: AuthConfig,
    pub store: StoreConfig,
}

/// Identity provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Web API key of the identity project
    pub api_key: String,
    /// Identity Toolkit base URL (point at an emulator for local testing)
    pub endpoint: String,
    /// Provider id used for federated sign-in
    pub federated_provider: String,
    /// How long to wait for the browser to come back
    pub callback_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://identitytoolkit.googleapis.com".to_string(),
            federated_provider: "google.com".to_string(),
            callback_timeout_secs: 120,
        }
    }
}

/// Inventory database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file, relative to the app data directory
    pub file_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: "pantry.db".to_string(),
        }
    }
}

/// `PANTRY_API_KEY`, `PANTRY_AUTH_ENDPOINT` and `PANTRY_DB_FILE`; any
/// other `PANTRY_*` variable is ignored
fn env_overrides() -> Env {
    Env::prefixed("PANTRY_").filter_map(|key| match key.as_str().to_ascii_lowercase().as_str() {
        "api_key" => Some("auth.api_key".into()),
        "auth_endpoint" => Some("auth.endpoint".into()),
        "db_file" => Some("store.file_name".into()),
        _ => None,
    })
}

impl PantryConfig {
    /// Provider chain; without a config dir only defaults and env apply
    pub fn figment(config_dir: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(PantryConfig::default()));
        if let Some(dir) = config_dir {
            figment = figment.merge(Json::file(dir.join(CONFIG_FILE_NAME)));
        }
        figment.merge(env_overrides())
    }

    /// A missing file yields defaults; a malformed one is an error
    pub fn load(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(config_dir).extract()?)
    }
}
