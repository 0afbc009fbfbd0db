use crate::config::types::{Config, ProxyConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

const DEFAULT_TOR_HOST: &str = "127.0.0.1";
const DEFAULT_TOR_PORT: u16 = 9050;

/// Loads the configuration, applies environment overrides and validates it
///
/// # Arguments
///
/// * `path` - Path to a TOML configuration file; defaults are used when `None`
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Environment
///
/// | Variable | Overrides |
/// |----------|-----------|
/// | `SCRAPMON_DB_PATH` | `database.path` |
/// | `SCRAPMON_IMAGE_FOLDER` | `storage.folder` |
/// | `SCRAPMON_BASE_URL` | `scraper.base-url` |
/// | `SCRAPMON_ITERATIONS` | `codes.iterations` |
/// | `TOR_HOST`, `TOR_PORT` | `proxy` (enables it) |
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config: Config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate(&config)?;

    Ok(config)
}

/// Parses and validates configuration text without consulting the environment
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Overrides configuration values from environment-style variables
///
/// Empty values are ignored. Numbers that fail to parse keep the current value.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| match lookup(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            tracing::debug!("No override for {}", key);
            None
        }
    };

    if let Some(path) = get("SCRAPMON_DB_PATH") {
        config.database.path = path;
    }
    if let Some(folder) = get("SCRAPMON_IMAGE_FOLDER") {
        config.storage.folder = folder;
    }
    if let Some(base_url) = get("SCRAPMON_BASE_URL") {
        config.scraper.base_url = base_url;
    }
    if let Some(iterations) = get("SCRAPMON_ITERATIONS") {
        match iterations.parse() {
            Ok(iterations) => config.codes.iterations = iterations,
            Err(_) => tracing::debug!(
                "Ignoring SCRAPMON_ITERATIONS={}, keeping {}",
                iterations,
                config.codes.iterations
            ),
        }
    }

    let tor_host = get("TOR_HOST");
    let tor_port = get("TOR_PORT");
    if tor_host.is_some() || tor_port.is_some() {
        let current = config.proxy.take().unwrap_or_else(|| ProxyConfig {
            host: DEFAULT_TOR_HOST.to_string(),
            port: DEFAULT_TOR_PORT,
        });

        let port = match tor_port {
            Some(port) => port.parse().unwrap_or_else(|_| {
                tracing::debug!("Ignoring TOR_PORT={}, keeping {}", port, current.port);
                current.port
            }),
            None => current.port,
        };

        config.proxy = Some(ProxyConfig {
            host: tor_host.unwrap_or(current.host),
            port,
        });
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so runs can be matched to the configuration they used.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}
