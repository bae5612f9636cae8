//! arXiv export API fetcher.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::feed::{entry, FeedFetcher};
use crate::models::{Record, SearchConfig};
use crate::utils::HttpClient;

/// Base URL for the arXiv export API
const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Production [`FeedFetcher`] backed by the arXiv export API
#[derive(Debug, Clone)]
pub struct ArxivFeed {
    http: HttpClient,
    base_url: String,
}

impl ArxivFeed {
    /// Create a fetcher with a default HTTP client
    pub fn new() -> Self {
        Self::with_client(HttpClient::new())
    }

    /// Create a fetcher sharing an existing HTTP client
    pub fn with_client(http: HttpClient) -> Self {
        Self {
            http,
            base_url: ARXIV_API_URL.to_string(),
        }
    }

    /// Point the fetcher at a different endpoint (for testing)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the query URL for one page
    ///
    /// `config.query` is embedded as-is: it is already URL-escaped by
    /// [`crate::query::build_query`], and its `+`/`:` separators must
    /// not be re-encoded.
    fn page_url(&self, config: &SearchConfig, start: usize, count: usize) -> String {
        format!(
            "{}?search_query={}&start={}&max_results={}&sortBy={}&sortOrder={}",
            self.base_url,
            config.query,
            start,
            count,
            config.sort_by.as_str(),
            config.sort_order.as_str()
        )
    }
}

impl Default for ArxivFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for ArxivFeed {
    async fn fetch_page(
        &self,
        config: &SearchConfig,
        start: usize,
        count: usize,
    ) -> Result<Vec<Record>> {
        let url = self.page_url(config, start, count);
        debug!(%url, "requesting page");

        let body = self.http.get_text(&url).await?;
        let records = entry::parse_feed(&body)?;
        debug!(count = records.len(), "shaped entries from page");

        Ok(records)
    }
}
