//! Seed page rendering
//!
//! Directory landing pages assemble their department listings with
//! client-side scripts, so the first page of a site may need a real
//! rendering engine rather than a plain GET. This module isolates that
//! concern behind the [`SeedRenderer`] trait; the crawl pipeline only ever
//! sees the final HTML.
//!
//! [`HttpRenderer`] is the built-in backend: a plain HTTP fetch with
//! browser-style headers. It is sufficient for sites that serve their
//! listings server-side and for test servers; a headless-browser backend
//! can be slotted in by implementing the trait.

mod http;

pub use http::HttpRenderer;

use std::future::Future;
use url::Url;

/// Abstraction over how a seed page becomes HTML
///
/// The harvest pipeline renders each configured seed through this trait
/// and retries a bounded number of times when rendering fails or yields a
/// page without department links.
pub trait SeedRenderer {
    /// Produces the final HTML of a seed page
    ///
    /// # Arguments
    ///
    /// * `url` - The seed page URL
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The rendered page body
    /// * `Err(HarvestError)` - Rendering failed; the caller may retry
    fn render(&self, url: &Url) -> impl Future<Output = crate::Result<String>> + Send;
}
