//! Link frontier: breadth-first discovery of profile pages
//!
//! Starting from the department-index links of a rendered seed page, the
//! frontier expands paginated listing pages round by round, collecting
//! profile links along the way. Listing URLs move from `pending` to
//! `visited` the moment their batch is fetched, so revisits are impossible
//! and pagination cycles terminate on their own.

use crate::crawler::Fetcher;
use crate::url::{clean_href, resolve_href};
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Extracts department-index links from a rendered seed page
///
/// The sites double-encode query strings in these hrefs, so each href is
/// cleaned (`&`, `(`, `)` replaced with `_`) before resolution, exactly as
/// for pagination links.
///
/// # Arguments
///
/// * `html` - The rendered seed page
/// * `base` - The seed URL relative hrefs resolve against
///
/// # Returns
///
/// Deduplicated department listing URLs in document order
pub fn department_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href*='/faculty/index/']") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_href(base, &clean_href(href)) {
                    if seen.insert(resolved.clone()) {
                        links.push(resolved);
                    }
                }
            }
        }
    }

    links
}

/// Breadth-first expansion state for one site
///
/// `visited` and `pending` stay disjoint: a URL is enqueued only if it is
/// in neither set, and an entire batch is marked visited as soon as it has
/// been fetched, whether or not the fetch succeeded.
pub struct Frontier {
    visited: HashSet<Url>,
    pending: HashSet<Url>,
    profile_urls: HashSet<Url>,
}

impl Frontier {
    /// Creates a frontier seeded with department listing roots
    pub fn new(roots: Vec<Url>) -> Self {
        Self {
            visited: HashSet::new(),
            pending: roots.into_iter().collect(),
            profile_urls: HashSet::new(),
        }
    }

    /// Expands the frontier to exhaustion
    ///
    /// Each round fetches the whole pending batch concurrently, harvests
    /// profile links from the successful bodies, and enqueues unseen
    /// pagination links for the next round. Failed listing fetches
    /// contribute nothing and never abort the expansion.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The shared page fetcher
    pub async fn run(&mut self, fetcher: &Fetcher) {
        let mut round = 0u32;

        while !self.pending.is_empty() {
            round += 1;
            let batch: Vec<Url> = self.pending.drain().collect();
            debug!(round, listings = batch.len(), "expanding listing pages");

            let bodies = fetcher.fetch_all(&batch).await;
            self.visited.extend(batch.iter().cloned());

            for (page_url, body) in batch.iter().zip(bodies) {
                let Some(html) = body else { continue };
                let (profiles, pagination) = listing_links(&html, page_url);

                self.profile_urls.extend(profiles);

                for link in pagination {
                    if !self.visited.contains(&link) {
                        self.pending.insert(link);
                    }
                }
            }
        }

        debug!(
            listings = self.visited.len(),
            profiles = self.profile_urls.len(),
            "frontier exhausted"
        );
    }

    /// Profile page URLs discovered so far
    pub fn profile_urls(&self) -> &HashSet<Url> {
        &self.profile_urls
    }

    /// Listing pages already fetched
    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }
}

/// Extracts profile and pagination links from one listing page
///
/// Profile hrefs resolve as-is; pagination hrefs get the same cleaning as
/// department-index hrefs.
fn listing_links(html: &str, base: &Url) -> (Vec<Url>, Vec<Url>) {
    let document = Html::parse_document(html);
    let mut profiles = Vec::new();
    let mut pagination = Vec::new();

    if let Ok(selector) = Selector::parse("a[href*='/profile/']") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_href(base, href) {
                    profiles.push(resolved);
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("ul.pagination li a") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_href(base, &clean_href(href)) {
                    pagination.push(resolved);
                }
            }
        }
    }

    (profiles, pagination)
}
