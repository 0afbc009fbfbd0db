use crate::config::types::{CodesConfig, Config, ProxyConfig, ScraperConfig};
use crate::counter::{Alphabet, CustomNumber};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_paths(config)?;
    validate_scraper_config(&config.scraper)?;
    if let Some(proxy) = &config.proxy {
        validate_proxy_config(proxy)?;
    }
    validate_codes_config(&config.codes)?;
    Ok(())
}

fn validate_paths(config: &Config) -> Result<(), ConfigError> {
    if config.database.path.is_empty() {
        return Err(ConfigError::Validation(
            "database.path cannot be empty".to_string(),
        ));
    }

    if config.storage.folder.is_empty() {
        return Err(ConfigError::Validation(
            "storage.folder cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_proxy_config(config: &ProxyConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Validation(
            "proxy.host cannot be empty".to_string(),
        ));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation(
            "proxy.port must be non-zero".to_string(),
        ));
    }

    Ok(())
}

/// Validates the code space and the optional start code
fn validate_codes_config(config: &CodesConfig) -> Result<(), ConfigError> {
    let alphabet = Alphabet::parse(&config.alphabet)
        .map_err(|e| ConfigError::Validation(format!("codes.alphabet: {}", e)))?;

    if config.width < 1 {
        return Err(ConfigError::Validation(format!(
            "codes.width must be >= 1, got {}",
            config.width
        )));
    }

    if let Some(start) = &config.start {
        let number = CustomNumber::from_string(&alphabet, start)
            .map_err(|e| ConfigError::Validation(format!("codes.start: {}", e)))?;

        if number.len() > config.width {
            return Err(ConfigError::Validation(format!(
                "codes.start '{}' does not fit in {} digits",
                start, config.width
            )));
        }
    }

    Ok(())
}
