use url::Url;

/// Path suffixes that mark binary or media resources the crawler never fetches
const MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".mp4", ".avi", ".svg", ".webp", ".pdf", ".mp3", ".wav",
];

/// Checks whether a URL points at a media resource
///
/// Only the path is inspected (case-insensitive), so query strings and
/// fragments do not change the classification. Unknown suffixes are treated
/// as fetchable pages.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use email_trawler::url::is_media;
///
/// assert!(is_media(&Url::parse("https://example.com/logo.PNG").unwrap()));
/// assert!(is_media(&Url::parse("https://example.com/file.pdf?dl=1").unwrap()));
/// assert!(!is_media(&Url::parse("https://example.com/about").unwrap()));
/// ```
pub fn is_media(url: &Url) -> bool {
    has_media_suffix(url.path())
}

/// String form of [`is_media`] for links that have not been parsed yet
///
/// Unparsable input falls back to checking the raw string.
pub fn is_media_str(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => is_media(&parsed),
        Err(_) => has_media_suffix(url),
    }
}

fn has_media_suffix(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    MEDIA_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
