//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Record store configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Advisory text generator configuration.
    #[serde(default)]
    pub advisor: AdvisorConfig,
    /// Default `tracing` filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "aqsat=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            advisor: AdvisorConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Where the persisted collections live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// In-process memory. Contents vanish with the process.
    Memory,
    /// Local filesystem, one JSON document per collection.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::LocalFs { .. } => "local",
        }
    }
}

impl Default for StorageProvider {
    fn default() -> Self {
        Self::local_fs("./data")
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// Storage provider.
    #[serde(default)]
    pub provider: StorageProvider,
}

/// Advisory text generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// API key for the text generation service. Missing key yields a fallback note.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the generation API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Skip the network entirely and answer with the offline note.
    #[serde(default)]
    pub offline: bool,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            offline: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AQSAT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
