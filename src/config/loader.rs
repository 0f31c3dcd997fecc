//! Configuration loader with environment variable support

use super::Config;
use crate::error::Result;
use config::{Environment, File, FileFormat};
use std::path::Path;

/// Prefix for environment overrides, e.g. `A2A__SERVER__PORT=7000`
pub const ENV_PREFIX: &str = "A2A";

/// Load configuration from an optional TOML file, then the environment
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    Ok(cfg)
}

/// Load configuration from TOML text only
pub fn load_config_from_str(contents: &str) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from_str(contents, FileFormat::Toml))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    Ok(cfg)
}
