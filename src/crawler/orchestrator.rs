//! Harvest orchestration: cache check, per-site crawls, snapshot merge
//!
//! The orchestrator owns one run end to end:
//! 1. Serve the cached snapshot when it is still fresh (unless forced)
//! 2. Per configured site: render the seed, expand the frontier, fetch
//!    every discovered profile page, extract records
//! 3. Upsert fresh records into the cached corpus, keyed by profile URL
//! 4. Persist the merged snapshot atomically and return it
//!
//! A site that yields nothing is logged and skipped; one broken
//! institution never takes down the run.

use crate::config::Config;
use crate::crawler::{department_links, Fetcher, Frontier};
use crate::profile::{extract_profile, ProfileRecord};
use crate::render::SeedRenderer;
use crate::storage::CacheStore;
use crate::url::institution_code;
use std::collections::HashMap;
use std::time::Instant;
use url::Url;

/// Drives a whole harvest run across every configured site
pub struct Orchestrator<R: SeedRenderer> {
    config: Config,
    fetcher: Fetcher,
    renderer: R,
    store: CacheStore,
}

impl<R: SeedRenderer> Orchestrator<R> {
    /// Creates an orchestrator from validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `renderer` - Backend used to render seed pages
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run
    /// * `Err(HarvestError)` - HTTP client construction failed
    pub fn new(config: Config, renderer: R) -> crate::Result<Self> {
        let fetcher = Fetcher::new(&config.crawler)?;
        let store = CacheStore::new(config.cache.path.clone(), config.cache.expiration());

        Ok(Self {
            config,
            fetcher,
            renderer,
            store,
        })
    }

    /// Runs the harvest and returns the full merged corpus
    ///
    /// A fresh snapshot short-circuits the crawl entirely unless `force`
    /// is set. Otherwise every configured site is harvested and the fresh
    /// records are upserted over the cached ones, last crawl wins;
    /// records of institutions that failed outright this time survive
    /// from the previous snapshot.
    ///
    /// # Arguments
    ///
    /// * `force` - Crawl even when the snapshot is still fresh
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ProfileRecord>)` - The merged corpus, already persisted
    /// * `Err(HarvestError)` - Seed config or snapshot write failure
    pub async fn run(&self, force: bool) -> crate::Result<Vec<ProfileRecord>> {
        if !force && self.store.is_fresh() {
            tracing::info!("Snapshot is fresh, serving cached records");
            return Ok(self.store.load());
        }

        let started = Instant::now();
        let mut merged = self.store.load();
        let mut index: HashMap<String, usize> = merged
            .iter()
            .enumerate()
            .map(|(i, record)| (record.profile_url.clone(), i))
            .collect();

        tracing::info!(
            "Starting harvest of {} sites ({} cached records)",
            self.config.sites.len(),
            merged.len()
        );

        for site in &self.config.sites {
            let seed = Url::parse(&site.seed)?;
            let institution = institution_code(&seed);

            for record in self.harvest_site(&seed, &institution).await {
                upsert(&mut merged, &mut index, record);
            }
        }

        self.store.save(&merged)?;

        tracing::info!(
            "Harvest complete: {} records in {:.1?}",
            merged.len(),
            started.elapsed()
        );
        Ok(merged)
    }

    /// Harvests one site into a batch of fresh records
    ///
    /// Returns an empty batch (after an institution-level error log) when
    /// the seed never yields department links or no profile pages are
    /// discovered.
    async fn harvest_site(&self, seed: &Url, institution: &str) -> Vec<ProfileRecord> {
        tracing::info!("Harvesting {} from {}", institution, seed);

        let roots = self.department_roots(seed).await;
        if roots.is_empty() {
            tracing::error!(
                "No department links for {} after {} render attempts, skipping site",
                institution,
                self.config.crawler.seed_render_attempts
            );
            return Vec::new();
        }

        let mut frontier = Frontier::new(roots);
        frontier.run(&self.fetcher).await;

        let profile_urls: Vec<Url> = frontier.profile_urls().iter().cloned().collect();
        if profile_urls.is_empty() {
            tracing::error!("No profile pages discovered for {}, skipping site", institution);
            return Vec::new();
        }

        tracing::info!(
            "Fetching {} profile pages for {}",
            profile_urls.len(),
            institution
        );

        let bodies = self.fetcher.fetch_all(&profile_urls).await;

        let mut records = Vec::new();
        for (url, body) in profile_urls.iter().zip(bodies) {
            let Some(html) = body else { continue };
            records.push(extract_profile(&html, url, institution));
        }

        tracing::info!("Extracted {} records for {}", records.len(), institution);
        records
    }

    /// Renders the seed until department links appear, within the attempt cap
    async fn department_roots(&self, seed: &Url) -> Vec<Url> {
        let attempts = self.config.crawler.seed_render_attempts.max(1);

        for attempt in 1..=attempts {
            match self.renderer.render(seed).await {
                Ok(html) => {
                    let roots = department_links(&html, seed);
                    if !roots.is_empty() {
                        tracing::debug!("Found {} department links on {}", roots.len(), seed);
                        return roots;
                    }
                    tracing::warn!(
                        "Rendered {} has no department links (attempt {}/{})",
                        seed,
                        attempt,
                        attempts
                    );
                }
                Err(e) => {
                    tracing::warn!("Render of {} failed (attempt {}/{}): {}", seed, attempt, attempts, e);
                }
            }
        }

        Vec::new()
    }
}

/// Inserts a record into the corpus, overwriting in place on a known URL
///
/// Insertion order is preserved so re-harvested institutions keep their
/// position in the snapshot.
fn upsert(merged: &mut Vec<ProfileRecord>, index: &mut HashMap<String, usize>, record: ProfileRecord) {
    match index.get(&record.profile_url) {
        Some(&i) => merged[i] = record,
        None => {
            index.insert(record.profile_url.clone(), merged.len());
            merged.push(record);
        }
    }
}
