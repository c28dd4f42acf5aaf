//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables. Only
//! `OPENAI_API_KEY` is expected in practice; everything else has a default
//! and can be overridden with `__`-separated keys such as
//! `GENERATION__MODEL`, `PACING__REMOTE_MS` or `RETENTION__IDLE_MINUTES`.

use serde::Deserialize;
use softsell_ai::{ApiCredential, GenerationSettings};
use softsell_conversation::ReplyPacing;
use std::time::Duration;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Generation service credential. Missing or placeholder means offline.
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Fixed generation parameters.
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Artificial reply delays.
    #[serde(default)]
    pub pacing: ReplyPacing,

    /// How long abandoned widgets are kept.
    #[serde(default)]
    pub retention: RetentionConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Idle widget eviction.
#[derive(Debug, Clone, Deserialize)]
pub struct RetentionConfig {
    /// Minutes without any request after which a widget is dropped.
    #[serde(default = "default_idle_minutes")]
    pub idle_minutes: u64,

    /// Interval between eviction sweeps, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
}

fn default_idle_minutes() -> u64 {
    30
}

fn default_cleanup_interval_seconds() -> u64 {
    60
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            idle_minutes: default_idle_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
        }
    }
}

impl RetentionConfig {
    /// Idle time after which a widget is evicted.
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_minutes * 60)
    }

    /// Time between sweeps, never shorter than one second.
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::default())
    }

    fn load(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the credential if one is usable.
    #[must_use]
    pub fn credential(&self) -> Option<ApiCredential> {
        ApiCredential::parse(self.openai_api_key.as_deref())
    }
}
