use crate::constants::{DEFAULT_CONFIG_PATH, DEFAULT_DATABASE_PATH, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const ENV_HOST: &str = "ACTIVITIES_HOST";
pub const ENV_PORT: &str = "ACTIVITIES_PORT";
pub const ENV_DATABASE: &str = "ACTIVITIES_DB";

/// Service configuration: `activities.toml`, then environment, then CLI flags.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

impl Config {
    /// Load `activities.toml` if present and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        let config = if path.exists() {
            Self::load_from(path)?
        } else {
            Self::default()
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `ACTIVITIES_*` overrides read through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_PORT} is not a valid port: {port}"))
            })?;
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database.path = path;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| {
                ConfigError::Invalid(format!(
                    "Invalid listen address {}:{}: {}",
                    self.server.host, self.server.port, e
                ))
            })
    }
}
