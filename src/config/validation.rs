use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, OutreachConfig, SenderConfig, SmtpConfig,
    UserAgentConfig,
};
use crate::extract::validate_email;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_outreach_config(&config.outreach)?;
    if let Some(sender) = &config.sender {
        validate_sender_config(sender)?;
    }
    if let Some(smtp) = &config.smtp {
        validate_smtp_config(smtp)?;
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_fetches < 1 || config.max_concurrent_fetches > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and 100, got {}",
            config.max_concurrent_fetches
        )));
    }

    if config.request_timeout < 1 || config.request_timeout > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be between 1 and 300 seconds, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.identity.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent identity cannot be empty".to_string(),
        ));
    }

    // Header values may not carry control characters
    if config.identity.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent identity contains control characters: {:?}",
            config.identity
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.emails_path.is_empty() {
        return Err(ConfigError::Validation(
            "emails_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates outreach batching configuration
fn validate_outreach_config(config: &OutreachConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if config.template_path.is_empty() {
        return Err(ConfigError::Validation(
            "template_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the sender identity
fn validate_sender_config(config: &SenderConfig) -> Result<(), ConfigError> {
    validate_email(&config.address).map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid sender address '{}': {}",
            config.address, e
        ))
    })?;

    Ok(())
}

/// Validates SMTP coordinates
fn validate_smtp_config(config: &SmtpConfig) -> Result<(), ConfigError> {
    if config.server.trim().is_empty() {
        return Err(ConfigError::Validation(
            "smtp server cannot be empty".to_string(),
        ));
    }

    if config.server.contains("://") {
        return Err(ConfigError::InvalidUrl(format!(
            "smtp server must be a host name, not a URL: '{}'",
            config.server
        )));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation(
            "smtp port must be non-zero".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        let mut config = CrawlerConfig::default();
        config.max_concurrent_fetches = 0;
        assert!(validate_crawler_config(&config).is_err());

        config.max_concurrent_fetches = 101;
        assert!(validate_crawler_config(&config).is_err());

        config.max_concurrent_fetches = 1;
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = CrawlerConfig::default();
        config.request_timeout = 0;
        assert!(validate_crawler_config(&config).is_err());

        config.request_timeout = 300;
        assert!(validate_crawler_config(&config).is_ok());
    }

    #[test]
    fn test_validate_identity() {
        assert!(validate_user_agent_config(&UserAgentConfig {
            identity: "  ".to_string()
        })
        .is_err());
        assert!(validate_user_agent_config(&UserAgentConfig {
            identity: "Bot\n1.0".to_string()
        })
        .is_err());
        assert!(validate_user_agent_config(&UserAgentConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_sender() {
        let good = SenderConfig {
            address: "me@example.com".to_string(),
            subject: "Hello".to_string(),
        };
        assert!(validate_sender_config(&good).is_ok());

        let bad = SenderConfig {
            address: "me@localhost".to_string(),
            subject: "Hello".to_string(),
        };
        assert!(validate_sender_config(&bad).is_err());
    }

    #[test]
    fn test_validate_smtp() {
        let mut smtp = SmtpConfig {
            server: "smtp.example.com".to_string(),
            port: 587,
            password: String::new(),
        };
        assert!(validate_smtp_config(&smtp).is_ok());

        smtp.port = 0;
        assert!(validate_smtp_config(&smtp).is_err());

        smtp.port = 25;
        smtp.server = "smtp://smtp.example.com".to_string();
        assert!(matches!(
            validate_smtp_config(&smtp),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_outreach() {
        let mut outreach = OutreachConfig::default();
        outreach.batch_size = 0;
        assert!(validate_outreach_config(&outreach).is_err());

        outreach.batch_size = 1;
        outreach.template_path = String::new();
        assert!(validate_outreach_config(&outreach).is_err());
    }
}
