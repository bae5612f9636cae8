//! Feed fetching boundary.
//!
//! The paginator talks to the search API through the [`FeedFetcher`]
//! trait: one call fetches one page of already-shaped records. The
//! production implementation is [`ArxivFeed`]; tests script pages
//! through [`mock::MockFeed`].

mod arxiv;
mod entry;
pub mod mock;

pub use arxiv::ArxivFeed;
pub use mock::MockFeed;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Record, SearchConfig};

/// One-page fetch operation against the search API
///
/// Implementations shape raw entries into [`Record`]s and drop titleless
/// entries before returning, so the returned length is the page's shaped
/// count the paginator books against.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch up to `count` records starting at `start`
    async fn fetch_page(
        &self,
        config: &SearchConfig,
        start: usize,
        count: usize,
    ) -> Result<Vec<Record>>;
}
