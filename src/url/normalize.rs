use crate::UrlError;
use url::Url;

/// Normalizes a URL for visited-set comparison
///
/// The WHATWG parser already lowercases the scheme and host, resolves dot
/// segments and turns an empty path into `/`. On top of that the fragment is
/// dropped, since `page#a` and `page#b` are the same document.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use email_trawler::url::normalize_url;
///
/// let url = Url::parse("https://EXAMPLE.com/a/../b#section").unwrap();
/// assert_eq!(normalize_url(&url).as_str(), "https://example.com/b");
/// ```
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

/// Parses and normalizes a link string, rejecting anything but HTTP(S)
pub fn parse_link(link: &str) -> Result<Url, UrlError> {
    let url = Url::parse(link.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", link, e)))?;
    check_http_scheme(&url)?;
    Ok(normalize_url(&url))
}

/// Normalizes user input into a crawlable start URL
///
/// Input without a scheme gets `https://` prepended. An explicit `http://`
/// or `https://` scheme is kept; any other scheme, or a URL without a host,
/// is rejected.
///
/// # Examples
///
/// ```
/// use email_trawler::url::normalize_start_url;
///
/// let url = normalize_start_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// assert!(normalize_start_url("ftp://example.com").is_err());
/// ```
pub fn normalize_start_url(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("start URL is empty".to_string()));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = parse_link(&with_scheme)?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(with_scheme));
    }

    Ok(url)
}

fn check_http_scheme(url: &Url) -> Result<(), UrlError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            other
        ))),
    }
}
