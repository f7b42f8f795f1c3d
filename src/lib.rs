//! irins-harvest: a faculty-profile harvester for IRINS directory sites
//!
//! This crate implements the crawl-and-extract engine for a fixed family of
//! institutional directory websites: breadth-first discovery of profile pages
//! from a rendered seed page, bounded-concurrency fetching with retry,
//! heuristic extraction of faculty records from heterogeneous HTML, a
//! time-boxed JSON snapshot cache, and query/ranking over the harvested
//! corpus.

pub mod config;
pub mod crawler;
pub mod profile;
pub mod query;
pub mod render;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for irins-harvest operations
///
/// Almost everything the crawler encounters (fetch failures, malformed
/// pages, cache corruption, link-less sites) degrades to a logged skip
/// rather than an error; this enum covers the genuinely fatal conditions.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Failed to render seed page {url}: {message}")]
    Render { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for irins-harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, Fetcher, Frontier, Orchestrator};
pub use profile::{extract_profile, ProfileRecord, ProfileSummary, NA};
pub use query::{search, SearchQuery};
pub use render::{HttpRenderer, SeedRenderer};
pub use storage::CacheStore;
pub use url::{clean_href, institution_code, resolve_href};
