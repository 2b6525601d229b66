// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server configuration module
//!
//! Hierarchical configuration for the gallery service: defaults, then
//! `config.json`, then `config.{environment}.json`, then `GALLERY__*`
//! environment variables.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::Path,
    time::Duration,
};

use anyhow::{Result, anyhow, ensure};
use catalog_api::{BiographyConfig, CatalogConfig};
use config::{Config, ConfigError, Environment as ConfigEnv, File};
use relay_client::{RelayConfig, RelayEndpoint};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{ServerError, ServerResult};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MAX_TIMEOUT_SECONDS: u64 = 300;

/// A validated server port that ensures the value is appropriate for the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerPort {
    port: u16,
    environment: Environment,
}

impl ServerPort {
    /// Create a new `ServerPort`, ensuring it's valid for the given environment
    ///
    /// # Errors
    ///
    /// Returns an error if the port is 0 in non-testing environments
    pub fn new(port: u16, environment: Environment) -> Result<Self> {
        if port == 0 && environment != Environment::Testing {
            return Err(anyhow!("port cannot be 0 in non-testing environments"));
        }
        Ok(Self { port, environment })
    }

    /// Default development port
    pub const fn default_development() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::Development,
        }
    }

    /// Port 0, letting the OS pick
    pub const fn testing() -> Self {
        Self {
            port: 0,
            environment: Environment::Testing,
        }
    }

    /// Get the port value
    pub fn value(&self) -> u16 {
        self.port
    }
}

impl<'de> Deserialize<'de> for ServerPort {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let port = u16::deserialize(deserializer)?;
        // Re-validated once the environment is known
        Ok(Self {
            port,
            environment: Environment::Development,
        })
    }
}

/// A validated request timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within valid bounds
    ///
    /// # Errors
    ///
    /// Returns an error if timeout is 0 or greater than 300 seconds
    pub fn new(seconds: u64) -> Result<Self> {
        ensure!(seconds != 0, "timeout must be greater than 0");
        ensure!(
            seconds <= MAX_TIMEOUT_SECONDS,
            "timeout cannot exceed {MAX_TIMEOUT_SECONDS}"
        );
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Default request timeout (30 seconds)
    pub const fn default_value() -> Self {
        Self(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Request timeout used by tests (15 seconds)
    pub const fn testing() -> Self {
        Self(Duration::from_secs(15))
    }

    /// Get the timeout value
    pub fn value(&self) -> Duration {
        self.0
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self::default_value()
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Development environment
    Development,
    /// Testing environment
    Testing,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
        }
    }
}

/// Catalog access settings
///
/// An empty relay list means the built-in relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog API root
    pub base_url: String,
    /// Relay URL prefixes, in order of preference
    pub relays: Vec<String>,
    /// Upper bound for one relay attempt
    pub attempt_timeout_seconds: u64,
    /// Whole-rotation passes per request
    pub max_rotation_passes: u32,
    /// Encyclopedia summary endpoint
    pub biography_base_url: String,
    /// Encyclopedia request timeout
    pub biography_timeout_seconds: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let catalog = CatalogConfig::default();
        let biography = BiographyConfig::default();
        Self {
            base_url: catalog.base_url,
            relays: Vec::new(),
            attempt_timeout_seconds: catalog.relay.attempt_timeout_seconds,
            max_rotation_passes: catalog.relay.max_rotation_passes,
            biography_base_url: biography.base_url,
            biography_timeout_seconds: biography.timeout_seconds,
        }
    }
}

impl CatalogSettings {
    /// Relay configuration derived from these settings
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if a relay prefix is invalid
    pub fn relay_config(&self) -> ServerResult<RelayConfig> {
        let relays = if self.relays.is_empty() {
            RelayEndpoint::defaults()
        } else {
            self.relays
                .iter()
                .map(|prefix| RelayEndpoint::from_prefix(prefix.trim()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ServerError::Config {
                    message: e.to_string(),
                })?
        };

        let config = RelayConfig::default()
            .with_relays(relays)
            .with_attempt_timeout(self.attempt_timeout_seconds)
            .with_max_rotation_passes(self.max_rotation_passes);
        config.validate().map_err(|e| ServerError::Config {
            message: e.to_string(),
        })?;
        Ok(config)
    }

    /// Catalog client configuration
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if the relay settings are invalid
    pub fn catalog_config(&self) -> ServerResult<CatalogConfig> {
        Ok(CatalogConfig::default()
            .with_base_url(self.base_url.clone())
            .with_relay(self.relay_config()?))
    }

    /// Biography resolver configuration
    pub fn biography_config(&self) -> BiographyConfig {
        BiographyConfig::default()
            .with_base_url(self.biography_base_url.clone())
            .with_timeout(self.biography_timeout_seconds)
    }
}

/// Server configuration for different environments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: IpAddr,
    /// Server port (validated for environment compatibility)
    pub port: ServerPort,
    /// Request timeout in seconds (validated range: 1-300)
    pub timeout_seconds: TimeoutSeconds,
    /// Environment type
    pub environment: Environment,
    /// Catalog access settings
    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort::default_development(),
            timeout_seconds: TimeoutSeconds::default(),
            environment: Environment::Development,
            catalog: CatalogSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables and optional configuration files
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if configuration is invalid or cannot be loaded.
    pub fn from_env() -> ServerResult<Self> {
        Self::load().map_err(|e| ServerError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    /// Load configuration from the working directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with hierarchical sources, files read from `dir`
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. `config.json`
    /// 3. `config.{env}.json`
    /// 4. Environment variables with the `GALLERY__` prefix, `__` between
    ///    levels (`GALLERY__CATALOG__RELAYS` takes a comma-separated list)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or is invalid.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let env_var = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let env_name = env_var.to_lowercase();

        let mut config_builder = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("environment", "development")?
            .add_source(File::from(dir.join("config.json")).required(false))
            .add_source(File::from(dir.join(format!("config.{env_name}.json"))).required(false))
            .add_source(
                ConfigEnv::with_prefix("GALLERY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("catalog.relays")
                    .try_parsing(true),
            );

        if std::env::var("ENVIRONMENT").is_ok() {
            config_builder = config_builder.set_override("environment", env_name)?;
        }

        let config = config_builder.build()?;
        let mut server_config: Self = config.try_deserialize()?;

        server_config.port = ServerPort::new(server_config.port.value(), server_config.environment)
            .map_err(|e| ConfigError::Message(format!("invalid port configuration: {e}")))?;

        server_config
            .catalog
            .relay_config()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(server_config)
    }

    /// Create configuration optimized for testing
    pub fn for_testing() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: ServerPort::testing(),
            timeout_seconds: TimeoutSeconds::testing(),
            environment: Environment::Testing,
            catalog: CatalogSettings::default(),
        }
    }

    /// Replace the catalog settings
    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogSettings) -> Self {
        self.catalog = catalog;
        self
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.value())
    }
}
