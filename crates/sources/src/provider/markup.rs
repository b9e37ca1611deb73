//! Element selection for the scraping adapters.

use scraper::{Html, Selector};

use crate::errors::SourceError;

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(format!("bad selector {}: {}", css, e)))
}

fn element_text(element: scraper::ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first element matching `css`.
///
/// Missing element is a parse failure.
pub(crate) fn first_text(body: &str, css: &str) -> Result<String, SourceError> {
    let document = Html::parse_document(body);
    let selector = selector(css)?;
    document
        .select(&selector)
        .next()
        .map(element_text)
        .ok_or_else(|| SourceError::Parse(format!("no element matches {}", css)))
}

/// Trimmed texts of at most `limit` elements matching `css`, in document order.
///
/// Elements whose text is blank are skipped before the limit applies, so a
/// blank element never takes one of the `limit` slots. No match yields an
/// empty vector.
pub(crate) fn texts(body: &str, css: &str, limit: usize) -> Result<Vec<String>, SourceError> {
    let document = Html::parse_document(body);
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .take(limit)
        .collect())
}
