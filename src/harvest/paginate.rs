//! Chunked pagination over the feed fetcher.

use tracing::{debug, info, warn};

use crate::feed::FeedFetcher;
use crate::models::{Batch, SearchConfig};

/// Pull-based pagination state machine
///
/// Each `next_batch` call performs one fetch-filter-yield step; the
/// sequence is finite and not restartable. Bookkeeping (`remaining`,
/// `offset`) advances by the unfiltered shaped count of every page, so
/// the date window narrows what is yielded, never how many pages are
/// requested.
pub struct Pagination<'a> {
    fetcher: &'a dyn FeedFetcher,
    config: &'a SearchConfig,
    remaining: usize,
    offset: usize,
    started: bool,
    done: bool,
}

impl<'a> Pagination<'a> {
    /// Start a pagination run over `fetcher` for `config`
    pub fn new(fetcher: &'a dyn FeedFetcher, config: &'a SearchConfig) -> Self {
        Self {
            fetcher,
            config,
            remaining: config.max_results,
            offset: 0,
            started: false,
            done: false,
        }
    }

    /// Records still to be requested upstream
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Fetch, shape, and filter the next page
    ///
    /// Returns `None` once `max_results` unfiltered records have been
    /// booked or the upstream runs dry (an empty or failed page). A page
    /// whose records are all outside the date window still yields an
    /// empty batch, keeping one yielded batch per fetch request.
    pub async fn next_batch(&mut self) -> Option<Batch> {
        if self.done || self.remaining == 0 {
            return None;
        }

        if self.started {
            debug!(
                delay_secs = self.config.delay.as_secs_f64(),
                "sleeping between requests"
            );
            tokio::time::sleep(self.config.delay).await;
        }
        self.started = true;

        let count = self.remaining.min(self.config.chunk_size);
        info!(
            remaining = self.remaining,
            offset = self.offset,
            count,
            "fetching page"
        );

        let shaped = match self.fetcher.fetch_page(self.config, self.offset, count).await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "page fetch failed, stopping pagination");
                Vec::new()
            }
        };

        let fetched = shaped.len();
        if fetched == 0 {
            info!("no more entries left to fetch");
            self.done = true;
            return None;
        }
        info!(received = fetched, "received entries");

        self.remaining = self.remaining.saturating_sub(fetched);
        self.offset += fetched;

        let batch: Batch = shaped
            .into_iter()
            .filter(|r| self.config.range.contains(&r.publication_time))
            .collect();
        Some(batch)
    }
}
