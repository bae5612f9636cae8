//! Shaping of raw Atom entries into records.

use roxmltree::{Document, Node};

use crate::error::Result;
use crate::models::Record;

/// Parse an Atom feed response into shaped records
///
/// Entries without a title are dropped here and never reach the
/// paginator's bookkeeping.
pub(crate) fn parse_feed(xml: &str) -> Result<Vec<Record>> {
    let doc = Document::parse(xml)?;

    Ok(doc
        .descendants()
        .filter(|n| n.has_tag_name("entry"))
        .filter_map(shape_entry)
        .collect())
}

/// Shape one `<entry>` element into a [`Record`]
///
/// Returns `None` for titleless entries. The PDF link is the `<link>`
/// whose `title` attribute is `pdf`; the abstract page URL is the
/// `alternate` link, falling back to the entry `<id>`.
fn shape_entry(entry: Node) -> Option<Record> {
    let mut title = None;
    let mut summary = None;
    let mut authors = Vec::new();
    let mut published = None;
    let mut entry_id = None;
    let mut alternate_url = None;
    let mut pdf_url = None;
    let mut journal_reference = None;

    for child in entry.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "id" => entry_id = child.text().map(str::to_string),
            "title" => {
                title = child.text().map(|t| t.trim_end_matches('\n').to_string());
            }
            "summary" => {
                summary = child.text().map(|t| t.trim_end_matches('\n').to_string());
            }
            "published" => published = child.text().map(str::to_string),
            "author" => {
                let name = child
                    .children()
                    .find(|n| n.has_tag_name("name"))
                    .and_then(|n| n.text());
                if let Some(name) = name {
                    authors.push(name.to_string());
                }
            }
            "link" => {
                if let Some(href) = child.attribute("href") {
                    if child.attribute("title") == Some("pdf") {
                        pdf_url = Some(href.to_string());
                    } else if child.attribute("rel") == Some("alternate") {
                        alternate_url = Some(href.to_string());
                    }
                }
            }
            // arXiv extension element, <arxiv:journal_ref>
            "journal_ref" => journal_reference = child.text().map(str::to_string),
            _ => {}
        }
    }

    let title = title.filter(|t| !t.is_empty())?;

    Some(Record {
        title,
        r#abstract: summary.unwrap_or_default(),
        authors,
        publication_time: published.unwrap_or_default(),
        article_url: alternate_url.or(entry_id).unwrap_or_default(),
        pdf_url,
        journal_reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title>ArXiv Query Results</title>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <title>Attention Is All You Need
</title>
    <summary>The dominant sequence transduction models are based on
complex recurrent or convolutional neural networks.
</summary>
    <published>2017-06-12T17:57:34Z</published>
    <author><name>Ashish Vaswani</name></author>
    <author><name>Noam Shazeer</name></author>
    <arxiv:journal_ref>NeurIPS 2017</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/1706.03762v7" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2000.00001v1</id>
    <title></title>
    <summary>An entry with no usable title.</summary>
    <published>2020-01-01T00:00:00Z</published>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/1810.04805v2</id>
    <title>BERT</title>
    <summary>Language model pre-training.</summary>
    <published>2018-10-11T00:50:01Z</published>
    <author><name>Jacob Devlin</name></author>
    <link href="http://arxiv.org/abs/1810.04805v2" rel="alternate" type="text/html"/>
  </entry>
</feed>
"#;

    #[test]
    fn test_shapes_all_fields() {
        let records = parse_feed(FEED).unwrap();
        let record = &records[0];

        assert_eq!(record.title, "Attention Is All You Need");
        assert!(record
            .r#abstract
            .starts_with("The dominant sequence transduction models"));
        assert!(!record.r#abstract.ends_with('\n'));
        assert_eq!(record.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(record.publication_time, "2017-06-12T17:57:34Z");
        assert_eq!(record.article_url, "http://arxiv.org/abs/1706.03762v7");
        assert_eq!(
            record.pdf_url.as_deref(),
            Some("http://arxiv.org/pdf/1706.03762v7")
        );
        assert_eq!(record.journal_reference.as_deref(), Some("NeurIPS 2017"));
    }

    #[test]
    fn test_titleless_entries_are_dropped() {
        let records = parse_feed(FEED).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.title.is_empty()));
    }

    #[test]
    fn test_missing_optionals_shape_to_none() {
        let records = parse_feed(FEED).unwrap();
        let record = &records[1];

        assert_eq!(record.title, "BERT");
        assert_eq!(record.pdf_url, None);
        assert_eq!(record.journal_reference, None);
    }

    #[test]
    fn test_empty_feed() {
        let xml = r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"></feed>"#;
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_xml_is_a_parse_error() {
        assert!(parse_feed("this is not xml").is_err());
    }

    #[test]
    fn test_article_url_falls_back_to_entry_id() {
        let xml = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/1234.5678v1</id>
    <title>No Links Here</title>
    <summary>x</summary>
    <published>2019-01-01T00:00:00Z</published>
  </entry>
</feed>"#;
        let records = parse_feed(xml).unwrap();
        assert_eq!(records[0].article_url, "http://arxiv.org/abs/1234.5678v1");
    }
}
