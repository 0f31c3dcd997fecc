//! Configuration management for the A2A bridge

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Path of the single message endpoint. A missing leading `/` is added
    /// and trailing slashes are dropped.
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size")]
    pub max_body_size_mb: usize,
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the remote endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json, compact or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_server_host() -> String { "0.0.0.0".to_string() }
fn default_server_port() -> u16 { 6000 }
fn default_endpoint_path() -> String { crate::protocol::DEFAULT_ENDPOINT_PATH.to_string() }
fn default_max_body_size() -> usize { 10 }
fn default_base_url() -> String { "http://localhost:6000/a2a".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            endpoint_path: default_endpoint_path(),
            max_body_size_mb: default_max_body_size(),
        }
    }
}

impl ServerConfig {
    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Endpoint path rooted at `/` with trailing slashes removed
    pub fn normalized_endpoint_path(&self) -> String {
        let trimmed = self.endpoint_path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.max_body_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with environment variable overrides.
    /// A missing file is allowed; defaults and the environment still apply.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from TOML text without touching the environment
    pub fn from_toml_str(contents: &str) -> crate::error::Result<Self> {
        let config = loader::load_config_from_str(contents)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_with_path(path: &str) -> ServerConfig {
        ServerConfig {
            endpoint_path: path.to_string(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_normalized_endpoint_path() {
        assert_eq!(server_with_path("/a2a").normalized_endpoint_path(), "/a2a");
        assert_eq!(server_with_path("/a2a/").normalized_endpoint_path(), "/a2a");
        assert_eq!(server_with_path("a2a").normalized_endpoint_path(), "/a2a");
        assert_eq!(server_with_path(" /agents/career// ").normalized_endpoint_path(), "/agents/career");
        assert_eq!(server_with_path("/").normalized_endpoint_path(), "/");
        assert_eq!(server_with_path("").normalized_endpoint_path(), "/");
    }
}
