//! # Storefront Configuration
//!
//! Loaded once at startup; read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PARES_HOST, PARES_PORT, PARES_DB_PATH, PARES_MESSENGER_URL,        │
//! │     PARES_MESSENGER_HANDLE, PARES_STORE_NAME, PARES_SESSION_TTL_SECS   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $PARES_CONFIG, or storefront.toml in the platform config dir       │
//! │     ~/.config/pares-storefront/storefront.toml (Linux)                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     0.0.0.0:8080, https://m.me/PrimosPares.Leg                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [database]
//! path = "/var/lib/pares/pares.db"
//!
//! [messenger]
//! base_url = "https://m.me"
//! business_handle = "PrimosPares.Leg"
//!
//! [store]
//! fallback_name = "Primos' Pares"
//!
//! [sessions]
//! idle_ttl_secs = 7200
//! sweep_interval_secs = 300
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use pares_core::handoff::{HandoffConfig, DEFAULT_BUSINESS_HANDLE, DEFAULT_MESSENGER_BASE_URL};
use pares_core::DEFAULT_STORE_NAME;

use crate::state::DEFAULT_IDLE_TTL;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A setting has a value the storefront cannot use.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file holding the catalog.
    pub path: PathBuf,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
        }
    }
}

/// Where the checkout handoff link points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessengerSettings {
    pub base_url: String,
    pub business_handle: String,
}

impl Default for MessengerSettings {
    fn default() -> Self {
        MessengerSettings {
            base_url: DEFAULT_MESSENGER_BASE_URL.to_string(),
            business_handle: DEFAULT_BUSINESS_HANDLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Used in the order summary while site settings carry no store name.
    pub fallback_name: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            fallback_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

/// Shopping session lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Seconds without a successful request before a session is dropped.
    pub idle_ttl_secs: u64,
    /// Seconds between background sweeps.
    pub sweep_interval_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            idle_ttl_secs: DEFAULT_IDLE_TTL.as_secs(),
            sweep_interval_secs: 5 * 60,
        }
    }
}

impl SessionSettings {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub messenger: MessengerSettings,
    pub store: StoreSettings,
    pub sessions: SessionSettings,
}

impl StorefrontConfig {
    /// Loads defaults, then the config file, then `PARES_*` overrides, and
    /// validates the result.
    ///
    /// `PARES_CONFIG` names an explicit file, which must exist. Otherwise the
    /// platform config file is read when present.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("PARES_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    StorefrontConfig::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;

        info!(
            host = %config.server.host,
            port = config.server.port,
            database = %config.database.path.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parses a TOML file. Missing sections and keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Config file loaded");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Applies `PARES_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PARES_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PARES_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("PARES_PORT", format!("'{}': {}", port, e)))?;
        }
        if let Some(path) = lookup("PARES_DB_PATH") {
            self.database.path = PathBuf::from(path);
        }
        if let Some(url) = lookup("PARES_MESSENGER_URL") {
            self.messenger.base_url = url;
        }
        if let Some(handle) = lookup("PARES_MESSENGER_HANDLE") {
            self.messenger.business_handle = handle;
        }
        if let Some(name) = lookup("PARES_STORE_NAME") {
            self.store.fallback_name = name;
        }
        if let Some(ttl) = lookup("PARES_SESSION_TTL_SECS") {
            self.sessions.idle_ttl_secs = ttl.trim().parse().map_err(|e| {
                ConfigError::invalid("PARES_SESSION_TTL_SECS", format!("'{}': {}", ttl, e))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "must not be empty"));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.store.fallback_name.trim().is_empty() {
            return Err(ConfigError::invalid("store.fallback_name", "must not be empty"));
        }
        if self.sessions.idle_ttl_secs == 0 {
            return Err(ConfigError::invalid("sessions.idle_ttl_secs", "must be positive"));
        }
        if self.sessions.sweep_interval_secs == 0 {
            return Err(ConfigError::invalid("sessions.sweep_interval_secs", "must be positive"));
        }
        self.handoff()
            .validate()
            .map_err(|e| ConfigError::invalid("messenger", e.to_string()))?;
        Ok(())
    }

    pub fn handoff(&self) -> HandoffConfig {
        HandoffConfig::new(&self.messenger.base_url, &self.messenger.business_handle)
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("ph", "primos", "pares-storefront")
}

/// `storefront.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// `pares.db` in the platform data directory, or the working directory when
/// no home directory can be determined.
pub fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("pares.db"))
        .unwrap_or_else(|| PathBuf::from("pares.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================
