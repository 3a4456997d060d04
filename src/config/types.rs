use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub container: ContainerConfig,
}

/// Remote movie catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Value sent in the `X-RapidAPI-Host` header.
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// API key. `MOVIESHELF_API_KEY` takes precedence when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Retries after a transient failure (default: 2).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base backoff in milliseconds, doubled per retry (default: 200).
    #[serde(default = "default_retry_backoff_base_ms")]
    pub retry_backoff_base_ms: u64,
}

/// Local persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the favorites, notes and history files.
    /// Falls back to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Screen container settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Per-container event buffer; lagging subscribers drop older events.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// How long a graceful close waits for detached tasks.
    #[serde(default = "default_teardown_grace_ms")]
    pub teardown_grace_ms: u64,
}

fn default_base_url() -> String {
    "https://moviesdatabase.p.rapidapi.com".to_string()
}

fn default_api_host() -> String {
    "moviesdatabase.p.rapidapi.com".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_base_ms() -> u64 {
    200
}

fn default_event_buffer() -> usize {
    32
}

fn default_teardown_grace_ms() -> u64 {
    500
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_host: default_api_host(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            max_retries: default_max_retries(),
            retry_backoff_base_ms: default_retry_backoff_base_ms(),
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
            teardown_grace_ms: default_teardown_grace_ms(),
        }
    }
}

impl StorageConfig {
    /// Resolved data directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("movieshelf"),
        }
    }
}
