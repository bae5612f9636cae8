//! Concurrent per-record downloads.

use futures_util::{stream, StreamExt};
use std::path::PathBuf;
use tracing::warn;

use crate::models::{Record, SearchConfig};
use crate::utils::{sanitize_title, HttpClient};

/// Final state of one file write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File fetched/serialized and written
    Saved,
    /// Step skipped (e.g. the record has no PDF link)
    Skipped,
    /// Fetch or write failed
    Failed,
}

/// Result of one file write attempt
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Target path, when one was derived
    pub path: Option<PathBuf>,

    /// Number of bytes written
    pub bytes: u64,

    /// Final state
    pub status: FileStatus,

    /// Error or skip reason
    pub error: Option<String>,
}

impl FileOutcome {
    fn saved(path: PathBuf, bytes: u64) -> Self {
        Self {
            path: Some(path),
            bytes,
            status: FileStatus::Saved,
            error: None,
        }
    }

    fn skipped(reason: impl Into<String>) -> Self {
        Self {
            path: None,
            bytes: 0,
            status: FileStatus::Skipped,
            error: Some(reason.into()),
        }
    }

    fn failed(reason: impl Into<String>) -> Self {
        Self {
            path: None,
            bytes: 0,
            status: FileStatus::Failed,
            error: Some(reason.into()),
        }
    }
}

/// Per-record download result
///
/// `pdf`/`metadata` are `None` when the corresponding download flag was
/// off for the run.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// Title of the record the outcome belongs to
    pub title: String,

    /// PDF step result
    pub pdf: Option<FileOutcome>,

    /// Metadata step result
    pub metadata: Option<FileOutcome>,
}

impl RecordOutcome {
    /// Iterate over the file outcomes this record produced
    pub fn files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.pdf.iter().chain(self.metadata.iter())
    }
}

/// Aggregate result of one batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Per-record outcomes, in completion order
    pub outcomes: Vec<RecordOutcome>,

    /// Files written
    pub saved: usize,

    /// Steps skipped
    pub skipped: usize,

    /// Steps failed
    pub failed: usize,
}

impl BatchReport {
    /// Aggregate individual outcomes into a report
    pub fn new(outcomes: Vec<RecordOutcome>) -> Self {
        let count = |status: FileStatus| {
            outcomes
                .iter()
                .flat_map(RecordOutcome::files)
                .filter(|f| f.status == status)
                .count()
        };

        let saved = count(FileStatus::Saved);
        let skipped = count(FileStatus::Skipped);
        let failed = count(FileStatus::Failed);

        Self {
            outcomes,
            saved,
            skipped,
            failed,
        }
    }
}

/// Batch downloader with a bounded worker pool
///
/// Records within a batch are processed concurrently, up to the
/// configured worker count; outcomes arrive in completion order. One
/// record's failure never aborts its siblings.
#[derive(Debug, Clone)]
pub struct Downloader {
    http: HttpClient,
}

impl Downloader {
    /// Create a downloader sharing an existing HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Download every record of a batch
    pub async fn fetch_batch(&self, batch: &[Record], config: &SearchConfig) -> BatchReport {
        let outcomes = stream::iter(batch)
            .map(|record| self.fetch_record(record, config))
            .buffer_unordered(config.workers.max(1))
            .collect::<Vec<_>>()
            .await;

        BatchReport::new(outcomes)
    }

    /// Download one record's files per the configured flags
    async fn fetch_record(&self, record: &Record, config: &SearchConfig) -> RecordOutcome {
        let base = sanitize_title(&record.title);
        let mut outcome = RecordOutcome {
            title: record.title.clone(),
            pdf: None,
            metadata: None,
        };

        if config.download_pdf {
            outcome.pdf = Some(match &record.pdf_url {
                Some(url) => {
                    let path = config.save_dir.join(format!("{}.pdf", base));
                    self.fetch_pdf(url, path).await
                }
                None => {
                    warn!(title = %record.title, "record has no PDF link, skipping");
                    FileOutcome::skipped("no PDF link")
                }
            });
        }

        if config.download_metadata {
            let path = config.save_dir.join(format!("{}.json", base));
            outcome.metadata = Some(write_metadata(record, path).await);
        }

        outcome
    }

    async fn fetch_pdf(&self, url: &str, path: PathBuf) -> FileOutcome {
        let bytes = match self.http.get_bytes(url).await {
            Ok(bytes) => bytes,
            Err(error) => return FileOutcome::failed(error.to_string()),
        };

        match tokio::fs::write(&path, &bytes).await {
            Ok(()) => FileOutcome::saved(path, bytes.len() as u64),
            Err(error) => FileOutcome::failed(format!("write {}: {}", path.display(), error)),
        }
    }
}

async fn write_metadata(record: &Record, path: PathBuf) -> FileOutcome {
    let json = match record.metadata_json() {
        Ok(json) => json,
        Err(error) => return FileOutcome::failed(error.to_string()),
    };

    match tokio::fs::write(&path, json.as_bytes()).await {
        Ok(()) => FileOutcome::saved(path, json.len() as u64),
        Err(error) => FileOutcome::failed(format!("write {}: {}", path.display(), error)),
    }
}
