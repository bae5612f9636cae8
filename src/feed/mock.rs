//! Mock feed fetcher for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::feed::FeedFetcher;
use crate::models::{Record, SearchConfig};

/// A mock fetcher that replays scripted pages in order
///
/// Each `fetch_page` call pops the next scripted page; once the script
/// is exhausted, empty pages are returned. Requests are recorded as
/// `(start, count)` pairs for assertions.
#[derive(Debug, Default)]
pub struct MockFeed {
    pages: Mutex<VecDeque<Result<Vec<Record>>>>,
    requests: Mutex<Vec<(usize, usize)>>,
}

impl MockFeed {
    /// Create a mock with no scripted pages
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next page of records
    pub fn push_page(&self, records: Vec<Record>) {
        self.pages.lock().unwrap().push_back(Ok(records));
    }

    /// Script a failing fetch
    pub fn push_error(&self, error: Error) {
        self.pages.lock().unwrap().push_back(Err(error));
    }

    /// The `(start, count)` pairs of every request seen so far
    pub fn requests(&self) -> Vec<(usize, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedFetcher for MockFeed {
    async fn fetch_page(
        &self,
        _config: &SearchConfig,
        start: usize,
        count: usize,
    ) -> Result<Vec<Record>> {
        self.requests.lock().unwrap().push((start, count));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Helper to create a record for testing
pub fn make_record(title: &str, publication_time: &str) -> Record {
    Record {
        title: title.to_string(),
        r#abstract: format!("Abstract of {}", title),
        authors: vec!["Test Author".to_string()],
        publication_time: publication_time.to_string(),
        article_url: format!("http://arxiv.org/abs/{}", title),
        pdf_url: None,
        journal_reference: None,
    }
}
