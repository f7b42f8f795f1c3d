use crate::config::types::{Config, CrawlerConfig, SiteEntry};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the site list
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    if sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[site]] entry is required".to_string(),
        ));
    }

    for site in sites {
        let url = Url::parse(&site.seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", site.seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use an HTTP(S) scheme",
                site.seed
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CacheConfig;

    fn create_test_config() -> Config {
        Config {
            crawler: CrawlerConfig::default(),
            cache: CacheConfig::default(),
            sites: vec![SiteEntry {
                seed: "https://iitm.irins.org".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&create_test_config()).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = create_test_config();
        config.crawler.max_concurrent_requests = 0;
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let mut config = create_test_config();
        config.crawler.max_concurrent_requests = 101;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_hundred_concurrency_allowed() {
        // Upper bound is inclusive
        let mut config = create_test_config();
        config.crawler.max_concurrent_requests = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = create_test_config();
        config.crawler.request_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_site_list_rejected() {
        let mut config = create_test_config();
        config.sites.clear();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_unparseable_seed_rejected() {
        let mut config = create_test_config();
        config.sites[0].seed = "not a url".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_non_http_seed_rejected() {
        let mut config = create_test_config();
        config.sites[0].seed = "ftp://iitm.irins.org".to_string();
        assert!(matches!(
            validate(&config).unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn test_plain_http_seed_allowed() {
        let mut config = create_test_config();
        config.sites[0].seed = "http://127.0.0.1:8080".to_string();
        assert!(validate(&config).is_ok());
    }
}
