use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for irins-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default, rename = "site")]
    pub sites: Vec<SiteEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(
        rename = "max-concurrent-requests",
        default = "default_max_concurrent_requests"
    )]
    pub max_concurrent_requests: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum fetch attempts per URL, first try included
    #[serde(rename = "max-retry-attempts", default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,

    /// Backoff delay before the first retry (milliseconds); doubles per retry
    #[serde(rename = "retry-base-delay-ms", default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,

    /// Cumulative time allowed for one URL's retries (seconds)
    #[serde(rename = "retry-budget-secs", default = "default_retry_budget_secs")]
    pub retry_budget_secs: u64,

    /// Times a seed page is re-rendered when no department links appear
    #[serde(rename = "seed-render-attempts", default = "default_seed_render_attempts")]
    pub seed_render_attempts: u32,
}

/// Snapshot cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Path to the JSON snapshot file
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,

    /// Snapshot age beyond which a new crawl is required (seconds)
    #[serde(rename = "expiration-secs", default = "default_cache_expiration_secs")]
    pub expiration_secs: u64,
}

/// One institution directory site to harvest
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Seed URL of the site's landing page
    pub seed: String,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn retry_budget(&self) -> Duration {
        Duration::from_secs(self.retry_budget_secs)
    }
}

impl CacheConfig {
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_max_concurrent_requests(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retry_attempts: default_max_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_budget_secs: default_retry_budget_secs(),
            seed_render_attempts: default_seed_render_attempts(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            expiration_secs: default_cache_expiration_secs(),
        }
    }
}

fn default_max_concurrent_requests() -> usize {
    5
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_max_retry_attempts() -> u32 {
    5
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_retry_budget_secs() -> u64 {
    300
}

fn default_seed_render_attempts() -> u32 {
    3
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("/tmp/faculty_data_cache.json")
}

fn default_cache_expiration_secs() -> u64 {
    3600
}
