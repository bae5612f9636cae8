use anyhow::Result;
use arxiv_harvest::config::{find_config_file, load_config, load_env_config};
use arxiv_harvest::{build_query, DateRange, SearchConfig, SortBy, SortOrder};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Search the arXiv and download matching PDFs and metadata
#[derive(Parser, Debug)]
#[command(name = "arxiv-harvest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search the arXiv and download matching PDFs and metadata", long_about = None)]
struct Cli {
    /// Terms to search for in article titles and abstracts
    #[arg(long, short = 's')]
    search: String,

    /// Filter for article author
    #[arg(long, short = 'a')]
    author: Option<String>,

    /// Filter for journal reference
    #[arg(long, short = 'j')]
    journal: Option<String>,

    /// Sort field
    #[arg(long, value_enum, default_value_t = SortField::Relevance)]
    sort_by: SortField,

    /// Sort order
    #[arg(long, value_enum, default_value_t = Order::Descending)]
    sort_order: Order,

    /// Maximum number of results to retrieve
    #[arg(long, short = 'n', default_value_t = 1)]
    max_results: usize,

    /// Maximum number of results fetched per API call
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Seconds to wait between successive API calls
    #[arg(long)]
    delay: Option<u64>,

    /// Worker pool size for per-batch downloads
    #[arg(long)]
    workers: Option<usize>,

    /// Skip downloading PDFs
    #[arg(long)]
    no_pdf: bool,

    /// Also write per-record metadata JSON
    #[arg(long)]
    meta: bool,

    /// Directory for saving downloaded files (must exist)
    #[arg(long, short = 'p', value_parser = parse_dir)]
    path: Option<PathBuf>,

    /// Only keep articles published on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    after: Option<NaiveDate>,

    /// Only keep articles published on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    before: Option<NaiveDate>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,
}

/// Sort field for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SortField {
    #[value(name = "relevance")]
    Relevance,
    #[value(name = "lastUpdatedDate")]
    LastUpdatedDate,
    #[value(name = "submittedDate")]
    SubmittedDate,
}

impl From<SortField> for SortBy {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Relevance => SortBy::Relevance,
            SortField::LastUpdatedDate => SortBy::LastUpdatedDate,
            SortField::SubmittedDate => SortBy::SubmittedDate,
        }
    }
}

/// Sort order
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    #[value(name = "ascending")]
    Ascending,
    #[value(name = "descending")]
    Descending,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Ascending => SortOrder::Ascending,
            Order::Descending => SortOrder::Descending,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("not a valid date: '{}' (expected YYYY-MM-DD)", s))
}

fn parse_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("not a directory: '{}'", s))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("arxiv_harvest={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load defaults from file if specified or found in default locations
    let app = if let Some(path) = &cli.config {
        load_config(path)?
    } else if let Some(path) = find_config_file() {
        tracing::info!("Using config file: {}", path.display());
        load_config(&path)?
    } else {
        load_env_config()?
    };

    let query = build_query(&cli.search, cli.author.as_deref(), cli.journal.as_deref());

    let config = SearchConfig::new(query)
        .max_results(cli.max_results)
        .chunk_size(cli.chunk_size.unwrap_or(app.chunk_size))
        .delay(Duration::from_secs(cli.delay.unwrap_or(app.delay_secs)))
        .timeout(Duration::from_secs(app.timeout_secs))
        .sort_by(cli.sort_by.into())
        .sort_order(cli.sort_order.into())
        .range(DateRange::new(cli.after, cli.before))
        .download_pdf(!cli.no_pdf)
        .download_metadata(cli.meta)
        .save_dir(cli.path.unwrap_or(app.save_dir))
        .workers(cli.workers.unwrap_or(app.workers));

    arxiv_harvest::search(config).await?;
    Ok(())
}
