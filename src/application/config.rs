/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::constants::{DEFAULT_BASE_URL, DEFAULT_STORAGE_DIR, DEFAULT_TIMEOUT_SECS};
use crate::utils::config::{get_env_or_default, get_env_or_none};
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;
use tracing::{debug, error};

const REDACTED: &str = "********";

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Client credentials exchanged for a bearer token
pub struct Credentials {
    /// OAuth2 client identifier
    pub client_id: String,
    /// OAuth2 client secret, never printed
    #[serde(serialize_with = "redact_secret")]
    pub client_secret: String,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration for the Petfinder API client
pub struct Config {
    /// Client credentials
    pub credentials: Credentials,
    /// REST API configuration
    pub rest_api: RestApiConfig,
    /// Local storage configuration for the bearer token
    pub storage: StorageConfig,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the REST API
pub struct RestApiConfig {
    /// Base URL for the Petfinder REST API
    pub base_url: String,
    /// Timeout in seconds for REST API requests
    pub timeout: u64,
}

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Configuration for the encrypted token storage
pub struct StorageConfig {
    /// Directory holding the encrypted store and the generated master key
    pub directory: PathBuf,
    /// Hex encoded 32 byte master key. When absent a key file is generated.
    #[serde(serialize_with = "redact_optional_secret")]
    pub master_key: Option<String>,
}

fn redact_secret<S: Serializer>(_: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(REDACTED)
}

fn redact_optional_secret<S: Serializer>(
    value: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_some(REDACTED),
        None => serializer.serialize_none(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a new configuration from the environment and an optional `.env` file
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let client_id = get_env_or_default("ADOPTY_CLIENT_ID", String::from("default_client_id"));
        let client_secret = get_env_or_default(
            "ADOPTY_CLIENT_SECRET",
            String::from("default_client_secret"),
        );

        if client_id == "default_client_id" {
            error!("ADOPTY_CLIENT_ID not found in environment variables or .env file");
        }
        if client_secret == "default_client_secret" {
            error!("ADOPTY_CLIENT_SECRET not found in environment variables or .env file");
        }

        Config {
            credentials: Credentials {
                client_id,
                client_secret,
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default(
                    "ADOPTY_REST_BASE_URL",
                    String::from(DEFAULT_BASE_URL),
                ),
                timeout: get_env_or_default("ADOPTY_REST_TIMEOUT", DEFAULT_TIMEOUT_SECS),
            },
            storage: StorageConfig {
                directory: get_env_or_default(
                    "ADOPTY_STORAGE_DIR",
                    PathBuf::from(DEFAULT_STORAGE_DIR),
                ),
                master_key: get_env_or_none("ADOPTY_MASTER_KEY"),
            },
        }
    }

    /// Builds a configuration without touching the environment
    ///
    /// Used by tests and embedders that manage their own settings.
    pub fn from_parts(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
        storage_dir: impl Into<PathBuf>,
    ) -> Self {
        Config {
            credentials: Credentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
            rest_api: RestApiConfig {
                base_url: base_url.into(),
                timeout: DEFAULT_TIMEOUT_SECS,
            },
            storage: StorageConfig {
                directory: storage_dir.into(),
                master_key: None,
            },
        }
    }

    /// Returns a copy pointing at another API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.rest_api.base_url = base_url.into();
        self
    }

    /// Joins a relative API path onto the configured base URL
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.rest_api.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
