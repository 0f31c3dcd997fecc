//! Configuration validation

use super::*;
use crate::error::{A2aError, Result};

const LOG_FORMATS: &[&str] = &["json", "compact", "pretty"];

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_server_config(&config.server)?;
    validate_client_config(&config.client)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(A2aError::Config("Server host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(A2aError::Config("Server port must be greater than 0".to_string()));
    }

    // Rooting and trailing slashes are handled by normalization; these
    // characters can never appear in a request path, so nothing would match
    let path = config.normalized_endpoint_path();
    if path.contains(|c: char| c == '?' || c == '#' || c.is_whitespace()) {
        return Err(A2aError::Config(format!(
            "Endpoint path cannot contain '?', '#' or whitespace, got '{}'",
            config.endpoint_path
        )));
    }

    if config.max_body_size_mb == 0 {
        return Err(A2aError::Config(
            "Max body size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate client configuration
fn validate_client_config(config: &ClientConfig) -> Result<()> {
    if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
        return Err(A2aError::Config(
            "Client base URL must start with http:// or https://".to_string()
        ));
    }

    if config.timeout_secs == 0 {
        return Err(A2aError::Config(
            "Client timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(A2aError::Config("Log level cannot be empty".to_string()));
    }

    if !LOG_FORMATS.contains(&config.format.as_str()) {
        return Err(A2aError::Config(format!(
            "Unknown log format '{}', expected one of {:?}",
            config.format, LOG_FORMATS
        )));
    }

    Ok(())
}
