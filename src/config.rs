//! Application configuration loaded from environment variables.
//!
//! The core is embedded in a platform shell (phone or watch app); the
//! shell decides where local data lives and passes that through here.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the local data store snapshot and keychain file.
    /// `None` keeps everything in memory (tests, previews).
    pub data_dir: Option<PathBuf>,
    /// Identity provider service identifier (public).
    pub identity_service_id: String,
    /// Whether health-data integration is enabled for this build.
    pub health_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_dir: env::var("PULSESPLIT_DATA_DIR").ok().map(PathBuf::from),
            identity_service_id: env::var("PULSESPLIT_IDENTITY_SERVICE")
                .map_err(|_| ConfigError::Missing("PULSESPLIT_IDENTITY_SERVICE"))?,
            health_enabled: env::var("PULSESPLIT_HEALTH_ENABLED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        })
    }

    /// Default config for testing only (in-memory, no files touched).
    pub fn test_default() -> Self {
        Self {
            data_dir: None,
            identity_service_id: "com.tnt.pulsesplit.test".to_string(),
            health_enabled: true,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
