//! HTML parser for locating the screenshot on a code's page
//!
//! This module handles:
//! - Finding the image URL on the page served for a code
//! - Rejecting placeholder images the site shows for removed screenshots
//! - Deriving a file extension for the downloaded image

use scraper::{Html, Selector};
use url::Url;

/// Extension used when neither the Content-Type nor the URL names one
pub const FALLBACK_IMAGE_TYPE: &str = "bin";

/// Extracts the screenshot image URL from a code's page
///
/// Looks for `<img id="screenshot-image" src="...">` first and falls back to
/// the `og:image` meta tag. Returns `None` when the page carries neither.
///
/// # Example
///
/// ```
/// use scrapmon::scraper::extract_image_source;
///
/// let html = r#"<img id="screenshot-image" src="https://image.prntscr.com/image/a.png">"#;
/// assert_eq!(
///     extract_image_source(html).as_deref(),
///     Some("https://image.prntscr.com/image/a.png")
/// );
/// ```
pub fn extract_image_source(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    select_attr(&document, "img#screenshot-image", "src")
        .or_else(|| select_attr(&document, r#"meta[property="og:image"]"#, "content"))
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Checks whether an image URL points at a real screenshot
///
/// Only absolute http(s) URLs qualify. Removed screenshots are replaced by a
/// protocol-relative placeholder (`//st.prntscr.com/...`), which fails here.
pub fn is_screenshot_url_valid(url: &str) -> bool {
    match Url::parse(url) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Derives the file extension for a downloaded image
///
/// Prefers the `image/*` subtype of the Content-Type header, then the URL's
/// path extension, then [`FALLBACK_IMAGE_TYPE`].
pub fn image_type_token(content_type: Option<&str>, url: &str) -> String {
    content_type
        .and_then(token_from_content_type)
        .or_else(|| token_from_url(url))
        .unwrap_or_else(|| FALLBACK_IMAGE_TYPE.to_string())
}

fn token_from_content_type(content_type: &str) -> Option<String> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let subtype = mime.strip_prefix("image/")?;
    // image/svg+xml -> svg
    let subtype = subtype.split('+').next()?;

    match subtype {
        "jpeg" | "pjpeg" => Some("jpg".to_string()),
        s if is_token(s) => Some(s.to_string()),
        _ => None,
    }
}

fn token_from_url(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let file_name = url.path_segments()?.last()?;
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();

    match extension.as_str() {
        "jpeg" => Some("jpg".to_string()),
        s if is_token(s) => Some(s.to_string()),
        _ => None,
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty() && s.len() <= 8 && s.chars().all(|c| c.is_ascii_alphanumeric())
}
