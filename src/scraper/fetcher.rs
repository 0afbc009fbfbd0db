//! Fetcher interface used by the scraper loop

use async_trait::async_trait;
use thiserror::Error;

/// A downloaded screenshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// File extension for the image, e.g. `png`
    pub image_type: String,
}

/// Transport-level failures while fetching a code
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Cannot build URL for code {code}: {source}")]
    Url {
        code: String,
        #[source]
        source: url::ParseError,
    },
}

/// Retrieves the screenshot published under a code
///
/// `Ok(None)` means the remote answered but had no screenshot to give;
/// `Err` means the remote could not be asked at all.
#[async_trait]
pub trait Fetcher {
    async fn fetch_by_code(&self, code: &str) -> Result<Option<FetchedImage>, FetchError>;
}
