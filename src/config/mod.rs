//! Configuration module for scrapmon
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, with environment variable overrides for deployment.
//!
//! # Example
//!
//! ```no_run
//! use scrapmon::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("scrapmon.toml"))).unwrap();
//! println!("Saving screenshots to: {}", config.storage.folder);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CodesConfig, Config, DatabaseConfig, ProxyConfig, ScraperConfig, StorageConfig};

// Re-export parser functions
pub use parser::{apply_env_overrides, compute_config_hash, load_config, parse_config};
