//! Search orchestration.
//!
//! [`Search`] is the public entry point: it validates the configuration,
//! drives [`Pagination`] over a [`FeedFetcher`], and hands each yielded
//! batch to the [`Downloader`] when a download flag is set. Batches run
//! strictly in sequence; only the records inside a batch fan out.

mod download;
mod paginate;

pub use download::{BatchReport, Downloader, FileOutcome, FileStatus, RecordOutcome};
pub use paginate::Pagination;

use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::feed::{ArxivFeed, FeedFetcher};
use crate::models::{DateRange, SearchConfig, SortBy, SortOrder};
use crate::utils::HttpClient;

/// Drives one search invocation
pub struct Search {
    config: SearchConfig,
    fetcher: Arc<dyn FeedFetcher>,
    downloader: Downloader,
}

impl Search {
    /// Create a search against the arXiv export API
    pub fn new(config: SearchConfig) -> Result<Self> {
        let http = HttpClient::with_timeout(config.timeout);
        let fetcher = Arc::new(ArxivFeed::with_client(http.clone()));
        Self::with_parts(config, fetcher, Downloader::new(http))
    }

    /// Create a search over a custom fetcher (used by tests)
    pub fn with_fetcher(config: SearchConfig, fetcher: Arc<dyn FeedFetcher>) -> Result<Self> {
        let http = HttpClient::with_timeout(config.timeout);
        Self::with_parts(config, fetcher, Downloader::new(http))
    }

    fn with_parts(
        config: SearchConfig,
        fetcher: Arc<dyn FeedFetcher>,
        downloader: Downloader,
    ) -> Result<Self> {
        validate(&config)?;
        Ok(Self {
            config,
            fetcher,
            downloader,
        })
    }

    /// Run the pipeline to completion
    ///
    /// Per-file outcomes are logged; partial failures never surface as
    /// errors. Only an invalid configuration fails, and that is caught
    /// at construction.
    pub async fn run(&self) -> Result<()> {
        info!(
            query = %self.config.query,
            max_results = self.config.max_results,
            "starting search"
        );

        let wants_files = self.config.download_pdf || self.config.download_metadata;
        let mut pages = Pagination::new(self.fetcher.as_ref(), &self.config);

        while let Some(batch) = pages.next_batch().await {
            if !wants_files {
                for record in &batch {
                    info!(
                        title = %record.title,
                        published = %record.publication_time,
                        "matched record"
                    );
                }
                continue;
            }

            let report = self.downloader.fetch_batch(&batch, &self.config).await;
            for outcome in &report.outcomes {
                log_outcome(outcome);
            }
            info!(
                saved = report.saved,
                skipped = report.skipped,
                failed = report.failed,
                "batch finished"
            );
        }

        info!("search finished");
        Ok(())
    }
}

fn log_outcome(outcome: &RecordOutcome) {
    for file in outcome.files() {
        match file.status {
            FileStatus::Saved => {
                if let Some(path) = &file.path {
                    info!(path = %path.display(), "saved");
                }
            }
            FileStatus::Skipped => warn!(
                title = %outcome.title,
                reason = file.error.as_deref().unwrap_or("skipped"),
                "skipped"
            ),
            FileStatus::Failed => warn!(
                title = %outcome.title,
                error = file.error.as_deref().unwrap_or("unknown"),
                "download failed"
            ),
        }
    }
}

fn validate(config: &SearchConfig) -> Result<()> {
    if config.chunk_size == 0 {
        return Err(Error::InvalidConfig(
            "chunk size must be positive".to_string(),
        ));
    }
    if (config.download_pdf || config.download_metadata) && !config.save_dir.is_dir() {
        return Err(Error::InvalidConfig(format!(
            "save directory {} is not a directory",
            config.save_dir.display()
        )));
    }
    Ok(())
}

/// Run a search for an already-built configuration
pub async fn search(config: SearchConfig) -> Result<()> {
    Search::new(config)?.run().await
}

/// Convenience entry point with a flat parameter list
#[allow(clippy::too_many_arguments)]
pub async fn download(
    query: impl Into<String>,
    download_pdf: bool,
    download_metadata: bool,
    save_dir: impl Into<PathBuf>,
    sort_by: SortBy,
    sort_order: SortOrder,
    max_results: usize,
    chunk_size: usize,
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
) -> Result<()> {
    let config = SearchConfig::new(query)
        .download_pdf(download_pdf)
        .download_metadata(download_metadata)
        .save_dir(save_dir)
        .sort_by(sort_by)
        .sort_order(sort_order)
        .max_results(max_results)
        .chunk_size(chunk_size)
        .range(DateRange::new(after, before));

    search(config).await
}
