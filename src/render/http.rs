//! Plain-HTTP seed rendering backend

use crate::crawler::build_http_client;
use crate::render::SeedRenderer;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Renders seed pages with a plain HTTP GET
///
/// Uses the same browser-style client as the page fetcher. Response bodies
/// are returned whatever the status code; a seed that renders to a page
/// without department links is handled upstream by the retry loop.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Creates a renderer with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `timeout` - Per-request timeout
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = build_http_client(timeout)?;
        Ok(Self { client })
    }
}

impl SeedRenderer for HttpRenderer {
    async fn render(&self, url: &Url) -> crate::Result<String> {
        debug!(url = %url, "rendering seed page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| HarvestError::Render {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| HarvestError::Render {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let html = String::from_utf8_lossy(&body).into_owned();
        debug!(url = %url, status, bytes = html.len(), "seed page rendered");

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_builds() {
        let renderer = HttpRenderer::new(Duration::from_secs(5));
        assert!(renderer.is_ok());
    }

    // Rendering against live responses is covered by the wiremock
    // integration tests.
}
