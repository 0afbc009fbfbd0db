//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with an optional SOCKS5 proxy
//! - Fetching the page published for a code
//! - Downloading the screenshot the page points at

use crate::config::{ProxyConfig, ScraperConfig};
use crate::scraper::fetcher::{FetchError, FetchedImage, Fetcher};
use crate::scraper::parser::{extract_image_source, image_type_token, is_screenshot_url_valid};
use crate::{ConfigError, ScrapmonError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Proxy, Response};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - User agent and timeout settings
/// * `proxy` - SOCKS5 proxy every request is routed through, if any
///
/// # Example
///
/// ```no_run
/// use scrapmon::config::{ProxyConfig, ScraperConfig};
/// use scrapmon::scraper::build_http_client;
///
/// let proxy = ProxyConfig { host: "127.0.0.1".to_string(), port: 9050 };
/// let client = build_http_client(&ScraperConfig::default(), Some(&proxy)).unwrap();
/// ```
pub fn build_http_client(
    config: &ScraperConfig,
    proxy: Option<&ProxyConfig>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(proxy) = proxy {
        builder = builder.proxy(Proxy::all(proxy.url())?);
    }

    builder.build()
}

/// Fetches screenshots from a site serving one page per code
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Creates a fetcher for `config.base_url`
    pub fn new(config: &ScraperConfig, proxy: Option<&ProxyConfig>) -> Result<Self, ScrapmonError> {
        let client = build_http_client(config, proxy)?;
        Self::with_client(client, &config.base_url)
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ScrapmonError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

        // Url::join replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// URL of the page published for `code`
    pub fn page_url(&self, code: &str) -> Result<Url, FetchError> {
        self.base_url.join(code).map_err(|source| FetchError::Url {
            code: code.to_string(),
            source,
        })
    }

    async fn get(&self, url: &str) -> Result<Response, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// # Request Flow
    ///
    /// 1. GET `<base-url>/<code>` and parse the HTML for the image URL
    ///    - No image, or a placeholder image → `Ok(None)`
    /// 2. GET the image
    ///    - Empty body → `Ok(None)`
    /// 3. Name the type from Content-Type, falling back to the URL extension
    ///
    /// Any non-2xx response or transport failure is an error.
    async fn fetch_by_code(&self, code: &str) -> Result<Option<FetchedImage>, FetchError> {
        let page_url = self.page_url(code)?;
        let html = self
            .get(page_url.as_str())
            .await?
            .text()
            .await
            .map_err(|source| FetchError::Http {
                url: page_url.to_string(),
                source,
            })?;

        let Some(image_url) = extract_image_source(&html) else {
            tracing::debug!("No screenshot on page for {}", code);
            return Ok(None);
        };

        if !is_screenshot_url_valid(&image_url) {
            tracing::debug!("Placeholder image for {}: {}", code, image_url);
            return Ok(None);
        }

        let response = self.get(&image_url).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response.bytes().await.map_err(|source| FetchError::Http {
            url: image_url.clone(),
            source,
        })?;

        if data.is_empty() {
            tracing::debug!("Empty image body for {} at {}", code, image_url);
            return Ok(None);
        }

        Ok(Some(FetchedImage {
            data: data.to_vec(),
            image_type: image_type_token(content_type.as_deref(), &image_url),
        }))
    }
}
