//! Crawler module for page fetching and profile discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with bounded concurrency and retry
//! - Breadth-first expansion of paginated department listings
//! - Orchestration of whole harvest runs across every configured site

mod fetcher;
mod frontier;
mod orchestrator;

pub use fetcher::{build_http_client, Fetcher};
pub use frontier::{department_links, Frontier};
pub use orchestrator::Orchestrator;

use crate::config::Config;
use crate::profile::ProfileRecord;
use crate::render::HttpRenderer;

/// Runs a complete harvest with the built-in HTTP renderer
///
/// This is the main entry point for a harvest. It will:
/// 1. Serve the cached snapshot if it is still fresh (unless `force`)
/// 2. Crawl every configured site and extract its profile records
/// 3. Merge fresh records over the cached corpus and persist it
///
/// # Arguments
///
/// * `config` - The harvest configuration
/// * `force` - Crawl even when the snapshot is still fresh
///
/// # Returns
///
/// * `Ok(Vec<ProfileRecord>)` - The merged corpus
/// * `Err(HarvestError)` - Harvest failed
pub async fn harvest(config: Config, force: bool) -> crate::Result<Vec<ProfileRecord>> {
    let renderer = HttpRenderer::new(config.crawler.request_timeout())?;
    let orchestrator = Orchestrator::new(config, renderer)?;
    orchestrator.run(force).await
}
