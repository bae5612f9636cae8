//! Search configuration models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Record;

/// One fetched page of shaped, date-filtered records
pub type Batch = Vec<Record>;

/// Sort field accepted by the arXiv API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortBy {
    /// Wire value used in the query string
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::LastUpdatedDate => "lastUpdatedDate",
            SortBy::SubmittedDate => "submittedDate",
        }
    }
}

/// Sort order accepted by the arXiv API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire value used in the query string
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Inclusive publication-date window
///
/// Both bounds are optional; with neither set every record passes. The
/// predicate compares only the date portion of a record's publication
/// time (the text before the `T` separator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest accepted publication date
    pub after: Option<NaiveDate>,

    /// Latest accepted publication date
    pub before: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from optional bounds
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self { after, before }
    }

    /// Whether any bound is set
    pub fn is_bounded(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Test a publication timestamp against the window
    ///
    /// A timestamp whose date portion does not parse is rejected when a
    /// bound is set and accepted otherwise.
    pub fn contains(&self, publication_time: &str) -> bool {
        if !self.is_bounded() {
            return true;
        }

        let date_part = publication_time
            .split_once('T')
            .map(|(date, _)| date)
            .unwrap_or(publication_time);

        let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
            return false;
        };

        if let Some(after) = self.after {
            if date < after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if date > before {
                return false;
            }
        }
        true
    }
}

/// Immutable configuration for one search invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Pre-escaped arXiv query string (see [`crate::query::build_query`])
    pub query: String,

    /// Total number of records to retrieve across all pages
    pub max_results: usize,

    /// Upper bound on records requested in a single API call
    pub chunk_size: usize,

    /// Courtesy delay between successive API calls
    pub delay: Duration,

    /// Request timeout for API calls and PDF downloads
    pub timeout: Duration,

    /// Sort field
    pub sort_by: SortBy,

    /// Sort order
    pub sort_order: SortOrder,

    /// Publication-date window applied client-side
    pub range: DateRange,

    /// Whether to download each record's PDF
    pub download_pdf: bool,

    /// Whether to write each record's metadata JSON
    pub download_metadata: bool,

    /// Directory receiving downloaded files
    pub save_dir: PathBuf,

    /// Worker pool size for per-record downloads within a batch
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: 1,
            chunk_size: 100,
            // arXiv asks for 3 seconds between successive API calls.
            delay: Duration::from_secs(3),
            timeout: Duration::from_secs(30),
            sort_by: SortBy::Relevance,
            sort_order: SortOrder::Descending,
            range: DateRange::default(),
            download_pdf: true,
            download_metadata: false,
            save_dir: PathBuf::from("."),
            workers: 8,
        }
    }
}

impl SearchConfig {
    /// Create a configuration for a pre-escaped query string
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set the total number of records to retrieve
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set the per-request chunk size
    pub fn chunk_size(mut self, chunk: usize) -> Self {
        self.chunk_size = chunk;
        self
    }

    /// Set the courtesy delay between API calls
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the sort field
    pub fn sort_by(mut self, sort: SortBy) -> Self {
        self.sort_by = sort;
        self
    }

    /// Set the sort order
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Set the publication-date window
    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Enable/disable PDF downloads
    pub fn download_pdf(mut self, enabled: bool) -> Self {
        self.download_pdf = enabled;
        self
    }

    /// Enable/disable metadata downloads
    pub fn download_metadata(mut self, enabled: bool) -> Self {
        self.download_metadata = enabled;
        self
    }

    /// Set the download directory
    pub fn save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Set the per-batch worker pool size
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}
