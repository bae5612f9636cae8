//! Query string construction for the arXiv API.

/// Build an arXiv API query from user input
///
/// The search terms are matched against title and abstract; optional
/// author and journal filters are ANDed in. Free text is URL-escaped,
/// so the result can be embedded in the query string as-is.
pub fn build_query(search: &str, author: Option<&str>, journal: Option<&str>) -> String {
    let title = format!("ti:{}", urlencoding::encode(search));
    let summary = format!("abs:{}", urlencoding::encode(search));
    let mut query = format!("({}+OR+{})", title, summary);

    let mut filters = Vec::new();
    if let Some(author) = author.filter(|a| !a.is_empty()) {
        filters.push(format!("au:{}", urlencoding::encode(author)));
    }
    if let Some(journal) = journal.filter(|j| !j.is_empty()) {
        filters.push(format!("jr:{}", urlencoding::encode(journal)));
    }

    for filter in filters {
        query.push_str("+AND+");
        query.push_str(&filter);
    }
    query
}
