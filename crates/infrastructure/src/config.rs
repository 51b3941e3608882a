//! Application configuration
//!
//! Loaded with the `config` crate from built-in defaults, an optional
//! `config.toml` in the working directory, and `SUNSYNC_*` environment
//! variables (nested keys joined with `__`, e.g.
//! `SUNSYNC_SYNC__LOCATION=94043`).

use std::path::Path;
use std::time::Duration;

use application::{ApplicationError, ReadinessPolicy, SenderConfig};
use domain::ChannelPath;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sync behaviour
    #[serde(default)]
    pub sync: SyncConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

/// Sync configuration shared by data and display nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Channel path summaries travel on
    #[serde(default = "default_channel_path")]
    pub channel_path: String,

    /// Location whose forecast a data node sends
    #[serde(default = "default_location")]
    pub location: String,

    /// Readiness waits before a run gives up
    #[serde(default = "default_readiness_attempts")]
    pub readiness_attempts: u32,

    /// Length of one readiness wait in milliseconds
    #[serde(default = "default_readiness_interval_ms")]
    pub readiness_interval_ms: u64,
}

fn default_channel_path() -> String {
    ChannelPath::WEATHER_UPDATE.to_string()
}

fn default_location() -> String {
    "94043".to_string()
}

const fn default_readiness_attempts() -> u32 {
    ReadinessPolicy::DEFAULT_ATTEMPTS
}

const fn default_readiness_interval_ms() -> u64 {
    1_000
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            channel_path: default_channel_path(),
            location: default_location(),
            readiness_attempts: default_readiness_attempts(),
            readiness_interval_ms: default_readiness_interval_ms(),
        }
    }
}

impl SyncConfig {
    /// Validated channel path
    pub fn channel(&self) -> Result<ChannelPath, ApplicationError> {
        ChannelPath::new(self.channel_path.clone()).map_err(|e| {
            ApplicationError::Configuration(format!("sync.channel_path: {e}"))
        })
    }

    /// Readiness gate built from the configured attempts and interval
    #[must_use]
    pub const fn readiness_policy(&self) -> ReadinessPolicy {
        ReadinessPolicy::new(
            self.readiness_attempts,
            Duration::from_millis(self.readiness_interval_ms),
        )
    }

    /// Sender settings for a data node
    pub fn sender_config(&self) -> Result<SenderConfig, ApplicationError> {
        if self.location.trim().is_empty() {
            return Err(ApplicationError::Configuration(
                "sync.location must not be empty".to_string(),
            ));
        }
        Ok(SenderConfig::new(self.location.clone())
            .with_channel(self.channel()?)
            .with_readiness(self.readiness_policy()))
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_db_path() -> String {
    "sunsync.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Log filter directive, e.g. `info` or `application=debug,info`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional `config` file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of the default file
    ///
    /// An explicit path must exist; the default `config` file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(
        path: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("sync.channel_path", ChannelPath::WEATHER_UPDATE)?
            .set_default("database.path", default_db_path())?
            .set_default("telemetry.log_filter", default_log_filter())?
            .add_source(file)
            .add_source(env);

        let config = builder.build()?;
        config.try_deserialize()
    }
}

/// `SUNSYNC_*` overrides, e.g. `SUNSYNC_SYNC__LOCATION`
fn environment() -> config::Environment {
    config::Environment::with_prefix("SUNSYNC")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
