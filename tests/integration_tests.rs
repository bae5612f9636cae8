//! Integration tests for arxiv-harvest
//!
//! These tests drive the full pipeline (pagination, filtering, download)
//! over a scripted feed and a temporary download directory.

use arxiv_harvest::feed::mock::{make_record, MockFeed};
use arxiv_harvest::feed::FeedFetcher;
use arxiv_harvest::harvest::{Downloader, FileStatus, Pagination};
use arxiv_harvest::utils::HttpClient;
use arxiv_harvest::{DateRange, Record, Search, SearchConfig};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn base_config(dir: &std::path::Path) -> SearchConfig {
    SearchConfig::new("(ti:rnn+OR+abs:rnn)")
        .delay(Duration::ZERO)
        .download_pdf(false)
        .download_metadata(true)
        .save_dir(dir)
}

#[tokio::test]
async fn full_pipeline_writes_filtered_records() {
    let dir = tempfile::tempdir().unwrap();

    let feed = MockFeed::new();
    feed.push_page(vec![
        make_record("Inside The Window", "2021-06-01T09:30:00Z"),
        make_record("Too Early", "2018-01-01T00:00:00Z"),
    ]);
    feed.push_page(vec![make_record("Also Inside", "2022-02-02T12:00:00Z")]);

    let config = base_config(dir.path())
        .max_results(3)
        .chunk_size(2)
        .range(DateRange::new(Some(date("2020-01-01")), None));

    Search::with_fetcher(config, Arc::new(feed))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(dir.path().join("Inside_The_Window.json").is_file());
    assert!(dir.path().join("Also_Inside.json").is_file());
    assert!(!dir.path().join("Too_Early.json").exists());
}

#[tokio::test]
async fn metadata_on_disk_round_trips() {
    let dir = tempfile::tempdir().unwrap();

    let mut record = make_record("Round Trip Paper", "2021-06-01T09:30:00Z");
    record.journal_reference = Some("NeurIPS 2021".to_string());
    record.pdf_url = None;
    let original = record.clone();

    let feed = MockFeed::new();
    feed.push_page(vec![record]);

    let config = base_config(dir.path()).max_results(1);
    Search::with_fetcher(config, Arc::new(feed))
        .unwrap()
        .run()
        .await
        .unwrap();

    let json = std::fs::read_to_string(dir.path().join("Round_Trip_Paper.json")).unwrap();
    let parsed: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);

    // Absent optionals are persisted as null, not omitted.
    assert!(json.contains("\"pdf_url\": null"));
}

#[tokio::test]
async fn requested_total_is_independent_of_filtering() {
    let feed = MockFeed::new();
    // Three pages of 10; the middle page is fully outside the window.
    feed.push_page(
        (0..10)
            .map(|i| make_record(&format!("A{}", i), "2021-01-01T00:00:00Z"))
            .collect(),
    );
    feed.push_page(
        (0..10)
            .map(|i| make_record(&format!("B{}", i), "2010-01-01T00:00:00Z"))
            .collect(),
    );
    feed.push_page(
        (0..10)
            .map(|i| make_record(&format!("C{}", i), "2021-01-01T00:00:00Z"))
            .collect(),
    );

    let config = SearchConfig::new("q")
        .max_results(30)
        .chunk_size(10)
        .delay(Duration::ZERO)
        .range(DateRange::new(Some(date("2020-01-01")), None));

    let mut pages = Pagination::new(&feed, &config);
    let mut yielded = Vec::new();
    while let Some(batch) = pages.next_batch().await {
        yielded.push(batch.len());
    }

    // Every page was requested despite the middle one yielding nothing.
    assert_eq!(feed.requests(), vec![(0, 10), (10, 10), (20, 10)]);
    assert_eq!(yielded, vec![10, 0, 10]);
}

#[tokio::test]
async fn batch_download_completes_every_record_once() {
    let dir = tempfile::tempdir().unwrap();

    let batch: Vec<Record> = (0..20)
        .map(|i| make_record(&format!("Concurrent {}", i), "2021-06-01T09:30:00Z"))
        .collect();

    let config = base_config(dir.path()).workers(4);
    let downloader = Downloader::new(HttpClient::new());
    let report = downloader.fetch_batch(&batch, &config).await;

    assert_eq!(report.outcomes.len(), 20);
    assert_eq!(report.saved, 20);
    assert_eq!(report.failed, 0);

    let titles: HashSet<&str> = report.outcomes.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles.len(), 20, "a record was duplicated or dropped");

    for outcome in &report.outcomes {
        let meta = outcome.metadata.as_ref().unwrap();
        assert_eq!(meta.status, FileStatus::Saved);
        assert!(meta.path.as_ref().unwrap().is_file());
    }
}

#[tokio::test]
async fn fetch_error_stops_with_accumulated_results() {
    let dir = tempfile::tempdir().unwrap();

    let feed = MockFeed::new();
    feed.push_page(vec![make_record("Kept", "2021-06-01T09:30:00Z")]);
    feed.push_error(arxiv_harvest::Error::Api("HTTP 500 for page".to_string()));

    let config = base_config(dir.path()).max_results(10).chunk_size(1);

    // The run succeeds; the transport failure only ends pagination.
    Search::with_fetcher(config, Arc::new(feed))
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(dir.path().join("Kept.json").is_file());
}

#[tokio::test]
async fn mock_feed_reports_requests_in_order() {
    let feed = MockFeed::new();
    feed.push_page(vec![make_record("One", "2021-01-01T00:00:00Z")]);

    let config = SearchConfig::new("q").max_results(1);
    let records = feed.fetch_page(&config, 0, 1).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(feed.requests(), vec![(0, 1)]);
}
