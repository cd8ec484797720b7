use url::Url;

/// Extracts the host from a URL, lowercased
///
/// # Examples
///
/// ```
/// use url::Url;
/// use email_trawler::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// The crawl scope of a URL: its host and explicit port
///
/// Two URLs are in the same scope only if both parts are equal, so
/// `blog.example.com` is outside the scope of `example.com`. A port equal to
/// the scheme's default counts as absent, which keeps `http://` and
/// `https://` links to the same host in scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    host: String,
    port: Option<u16>,
}

impl Scope {
    /// Builds the scope of a URL, or None if it has no host
    pub fn of(url: &Url) -> Option<Self> {
        Some(Self {
            host: extract_host(url)?,
            port: url.port(),
        })
    }

    /// Checks whether a URL falls inside this scope
    pub fn contains(&self, url: &Url) -> bool {
        Scope::of(url).as_ref() == Some(self)
    }

    /// The host part of the scope
    pub fn host(&self) -> &str {
        &self.host
    }
}
