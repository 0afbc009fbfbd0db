use crate::counter::DEFAULT_ALPHABET;
use serde::Deserialize;

/// Main configuration structure for scrapmon
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub scraper: ScraperConfig,
    /// Anonymizing SOCKS5 proxy; requests go out directly when absent
    pub proxy: Option<ProxyConfig>,
    pub codes: CodesConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./scrapmon.db".to_string(),
        }
    }
}

/// File storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory downloaded screenshots are written to
    pub folder: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            folder: "./screenshots".to_string(),
        }
    }
}

/// Remote site and HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site serving one page per code at `<base-url>/<code>`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://prnt.sc".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0"
                .to_string(),
        }
    }
}

/// SOCKS5 proxy, typically a local Tor daemon
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

impl ProxyConfig {
    /// Proxy URL with remote DNS resolution
    pub fn url(&self) -> String {
        format!("socks5h://{}:{}", self.host, self.port)
    }
}

/// Code space and enumeration budget
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodesConfig {
    /// Ordered digit symbols, lowest weight first
    pub alphabet: String,

    /// Canonical code width; the last code is the highest symbol repeated this many times
    pub width: usize,

    /// Code to start from instead of resuming after the latest record
    pub start: Option<String>,

    /// Number of codes visited per run
    pub iterations: u64,
}

impl Default for CodesConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            width: 8,
            start: None,
            iterations: 1000,
        }
    }
}
