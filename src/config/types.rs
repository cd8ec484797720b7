use serde::Deserialize;

/// Main configuration structure for Email-Trawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub outreach: OutreachConfig,
    pub sender: Option<SenderConfig>,
    pub smtp: Option<SmtpConfig>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of fetch+extract jobs in flight
    #[serde(rename = "max-concurrent-fetches", default = "default_max_concurrent")]
    pub max_concurrent_fetches: u32,

    /// Courtesy delay after each fetch (milliseconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: default_max_concurrent(),
            request_delay: default_request_delay(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_max_concurrent() -> u32 {
    10
}

fn default_request_delay() -> u64 {
    1000
}

fn default_request_timeout() -> u64 {
    10
}

/// Client identity sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    #[serde(default = "default_identity")]
    pub identity: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
        }
    }
}

fn default_identity() -> String {
    "Mozilla/5.0".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON email store
    #[serde(rename = "emails-path", default = "default_emails_path")]
    pub emails_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            emails_path: default_emails_path(),
        }
    }
}

fn default_emails_path() -> String {
    "emails.json".to_string()
}

/// Batch sending configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutreachConfig {
    /// Number of messages sent before pausing
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause after each batch (milliseconds)
    #[serde(rename = "batch-delay", default = "default_batch_delay")]
    pub batch_delay: u64,

    /// HTML file used verbatim as the message body
    #[serde(rename = "template-path", default = "default_template_path")]
    pub template_path: String,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay: default_batch_delay(),
            template_path: default_template_path(),
        }
    }
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_delay() -> u64 {
    2000
}

fn default_template_path() -> String {
    "email_template.html".to_string()
}

/// Sender identity
#[derive(Debug, Clone, Deserialize)]
pub struct SenderConfig {
    /// From address
    pub address: String,

    /// Subject line of outgoing messages
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_subject() -> String {
    "Default Subject".to_string()
}

/// SMTP server coordinates
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    #[serde(default)]
    pub password: String,
}
