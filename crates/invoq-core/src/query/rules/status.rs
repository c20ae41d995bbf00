//! Payment status keyword extraction.

use crate::models::filter::StatusFilter;

use super::patterns::STATUS;
use super::{ExtractionMatch, FieldExtractor};

/// Status keyword extractor. The first keyword in the query wins.
pub struct StatusExtractor;

impl StatusExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for StatusExtractor {
    type Output = StatusFilter;

    fn extract_all(&self, query: &str) -> Vec<ExtractionMatch<StatusFilter>> {
        STATUS
            .captures_iter(query)
            .filter_map(|caps| {
                let word = caps.get(1)?;
                let status = StatusFilter::from_keyword(word.as_str())?;
                Some(
                    ExtractionMatch::new(status, word.as_str())
                        .with_position(word.start(), word.end()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(query: &str) -> Option<StatusFilter> {
        StatusExtractor::new().extract(query).map(|m| m.value)
    }

    #[test]
    fn test_status_keywords() {
        assert_eq!(status("show me paid invoices"), Some(StatusFilter::Paid));
        assert_eq!(status("unpaid invoices"), Some(StatusFilter::Unpaid));
        assert_eq!(status("outstanding for barwon"), Some(StatusFilter::Unpaid));
        assert_eq!(status("which invoices are overdue"), Some(StatusFilter::Overdue));
        assert_eq!(status("pending hosting"), Some(StatusFilter::Pending));
    }

    #[test]
    fn test_no_status() {
        assert_eq!(status("invoices for repaid holdings"), None);
        assert_eq!(status("barwon health invoices"), None);
    }
}
