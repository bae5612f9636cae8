//! # arxiv-harvest
//!
//! Search the arXiv and download matching PDFs and metadata.
//!
//! The pipeline pages through the arXiv export API in chunks, shapes
//! each Atom entry into a [`Record`], filters by publication date, and
//! fans each page's downloads out over a bounded worker pool. A fixed
//! courtesy delay separates successive API calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use arxiv_harvest::{build_query, search, SearchConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let query = build_query("rnn", Some("devlin"), None);
//! let config = SearchConfig::new(query)
//!     .max_results(20)
//!     .download_metadata(true)
//!     .save_dir("./papers");
//! search(config).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod harvest;
pub mod models;
pub mod query;
pub mod utils;

pub use error::{Error, Result};
pub use harvest::{download, search, Search};
pub use models::{Batch, DateRange, Record, SearchConfig, SortBy, SortOrder};
pub use query::build_query;
