//! Rule-based field extractors for free-text invoice queries.

pub mod client;
pub mod contract;
pub mod invoice_type;
pub mod patterns;
pub mod status;
pub mod temporal;
pub mod vocabulary;

pub use client::ClientNameExtractor;
pub use contract::ContractExtractor;
pub use invoice_type::{resolve_invoice_type, InvoiceTypeExtractor};
pub use status::StatusExtractor;
pub use temporal::TemporalExtractor;

/// Trait for field extractors.
///
/// Extractors are pure: the same normalized query always yields the same
/// matches, independent of which other extractors ran before.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract all candidate matches, best first.
    fn extract_all(&self, query: &str) -> Vec<ExtractionMatch<Self::Output>>;

    /// Extract the best match.
    fn extract(&self, query: &str) -> Option<ExtractionMatch<Self::Output>> {
        self.extract_all(query).into_iter().next()
    }
}

/// A value extracted from a query together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in the normalized query.
    pub position: (usize, usize),
    /// Query text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: (0, 0),
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = (start, end);
        self
    }

    /// Whether this match shares any byte with `span`.
    pub fn overlaps(&self, span: (usize, usize)) -> bool {
        self.position.0 < span.1 && span.0 < self.position.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        let m = ExtractionMatch::new("x", "x").with_position(5, 10);
        assert!(m.overlaps((9, 12)));
        assert!(m.overlaps((0, 6)));
        assert!(!m.overlaps((10, 15)));
        assert!(!m.overlaps((0, 5)));
    }
}
