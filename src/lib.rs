//! Scrapmon: a resumable screenshot archiver
//!
//! This crate walks a fixed-width code space in a custom number base, fetches
//! the screenshot published under each code, and records every attempt so an
//! interrupted run picks up exactly where it stopped.

pub mod config;
pub mod counter;
pub mod output;
pub mod scraper;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for scrapmon operations
#[derive(Debug, Error)]
pub enum ScrapmonError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Code error: {0}")]
    Counter(#[from] counter::CounterError),

    #[error("Start code {code} is wider than {width} digits")]
    InvalidStartCode { code: String, width: usize },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Store error while {stage} for code {code}: {source}")]
    Store {
        stage: &'static str,
        code: String,
        #[source]
        source: storage::StorageError,
    },

    #[error("Could not save file for code {code}: {source}")]
    FileSave {
        code: String,
        #[source]
        source: storage::StorageError,
    },

    #[error("Could not purge {stage}: {source}")]
    Purge {
        stage: &'static str,
        #[source]
        source: storage::StorageError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for scrapmon operations
pub type Result<T> = std::result::Result<T, ScrapmonError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use counter::{Alphabet, CustomNumber};
pub use state::ScreenShotStatus;
pub use storage::ScreenShot;
