//! Record model representing one shaped arXiv search result.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A bibliographic record shaped from one arXiv feed entry
///
/// This struct is the canonical form every entry takes after shaping:
/// title and abstract are always present, the author list preserves the
/// feed order, and the publication time is kept in its original string
/// form (date and time separated by a literal `T`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Paper title (trailing newlines stripped)
    pub title: String,

    /// Abstract text (trailing newlines stripped)
    pub r#abstract: String,

    /// Author names, in feed order
    pub authors: Vec<String>,

    /// Publication timestamp, e.g. `2023-01-15T10:00:00Z`
    pub publication_time: String,

    /// Abstract page URL
    pub article_url: String,

    /// Direct PDF URL, when the entry carries a PDF link
    pub pdf_url: Option<String>,

    /// Journal reference, when the entry carries one
    pub journal_reference: Option<String>,
}

impl Record {
    /// Check if the record has a downloadable PDF
    pub fn has_pdf(&self) -> bool {
        self.pdf_url.is_some()
    }

    /// Serialize the record for the on-disk metadata file
    ///
    /// Keys are sorted and the output is pretty-printed; absent optional
    /// fields are emitted as `null`.
    pub fn metadata_json(&self) -> Result<String> {
        // Going through Value sorts the keys (serde_json's map is a BTreeMap).
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
