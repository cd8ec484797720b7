//! HTML parser for extracting outbound links
//!
//! Every `<a href>` on the page is resolved against the page URL. Links that
//! cannot lead to another page are dropped here; scope and media filtering
//! happen in the scheduler.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, resolved to an absolute URL
///   (relative paths, `..` segments and protocol-relative `//host/path`)
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
/// - Anything that is not HTTP(S) after resolution
///
/// Fragments are removed from the resolved URLs.
///
/// # Example
///
/// ```
/// use email_trawler::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="//cdn.example.com/x">CDN</a>"#;
/// let base_url = Url::parse("https://example.com/index").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links, vec!["https://example.com/about", "https://cdn.example.com/x"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.to_string())
}
