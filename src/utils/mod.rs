//! Utility modules supporting the harvest pipeline.

mod http;
mod sanitize;

pub use http::HttpClient;
pub use sanitize::sanitize_title;
