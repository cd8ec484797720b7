use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Name of the example file copied into place when no config exists yet
const EXAMPLE_CONFIG_NAME: &str = "config.example.toml";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be told apart by their settings.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Copies `config.example.toml` next to `path` into place if `path` is missing
///
/// # Returns
///
/// * `Ok(true)` - The example was copied
/// * `Ok(false)` - Nothing to do (config exists, or there is no example)
/// * `Err(ConfigError)` - The copy failed
pub fn ensure_config_file(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }

    let example = example_path_for(path);
    if !example.exists() {
        return Ok(false);
    }

    std::fs::copy(&example, path)?;
    tracing::info!("{} copied to {}", example.display(), path.display());
    Ok(true)
}

fn example_path_for(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) => dir.join(EXAMPLE_CONFIG_NAME),
        None => PathBuf::from(EXAMPLE_CONFIG_NAME),
    }
}
