//! Scraper module for enumerating and archiving screenshots
//!
//! This module contains the core archiving logic, including:
//! - The resumable enumeration loop over the code space
//! - The fetcher interface and its HTTP implementation
//! - HTML parsing to locate the screenshot on a code's page

mod controller;
mod fetcher;
mod http;
mod parser;

pub use controller::{PassReport, Scrapper, StopReason};
pub use fetcher::{FetchError, FetchedImage, Fetcher};
pub use http::{build_http_client, HttpFetcher};
pub use parser::{extract_image_source, image_type_token, is_screenshot_url_valid};

use crate::config::Config;
use crate::counter::Alphabet;
use crate::storage::{open_storage, LocalFileStore, SqliteStorage, Storage};
use crate::ScrapmonError;
use std::path::Path;

/// Scraper wired to the configured SQLite database, folder and site
pub type ConfiguredScrapper = Scrapper<SqliteStorage, LocalFileStore, HttpFetcher>;

/// Opens both storage backends named in the configuration
pub fn open_configured_storage(
    config: &Config,
) -> Result<Storage<SqliteStorage, LocalFileStore>, ScrapmonError> {
    let db = open_storage(Path::new(&config.database.path))?;
    let files = LocalFileStore::new(&config.storage.folder);
    Ok(Storage::new(db, files))
}

/// Builds a scraper from the configuration
pub fn build_scrapper(config: &Config) -> Result<ConfiguredScrapper, ScrapmonError> {
    let storage = open_configured_storage(config)?;
    let fetcher = HttpFetcher::new(&config.scraper, config.proxy.as_ref())?;
    let alphabet = Alphabet::parse(&config.codes.alphabet)?;
    Ok(Scrapper::new(storage, fetcher, alphabet, config.codes.width))
}

/// Runs one pass with the configured budget and start code
///
/// `start` and `iterations` override the configuration when given.
///
/// # Example
///
/// ```no_run
/// use scrapmon::config::load_config;
/// use scrapmon::scraper::start_command;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(None)?;
/// let report = start_command(&config, None, Some(500)).await?;
/// println!("saved {} screenshots", report.succeeded);
/// # Ok(())
/// # }
/// ```
pub async fn start_command(
    config: &Config,
    start: Option<&str>,
    iterations: Option<u64>,
) -> Result<PassReport, ScrapmonError> {
    let mut scrapper = build_scrapper(config)?;
    let start = start.or(config.codes.start.as_deref());
    let iterations = iterations.unwrap_or(config.codes.iterations);
    scrapper.run(start, iterations).await
}

/// Clears every record and saved file
pub fn purge_command(config: &Config) -> Result<(), ScrapmonError> {
    let mut storage = open_configured_storage(config)?;
    storage.purge()
}
