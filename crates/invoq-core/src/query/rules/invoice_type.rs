//! Invoice type extraction from synonyms.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::invoice::InvoiceType;

use super::vocabulary::INVOICE_TYPE_SYNONYMS;
use super::{ExtractionMatch, FieldExtractor};

lazy_static! {
    // Longest keys first; the sort is stable so declaration order breaks ties.
    static ref SYNONYM_PATTERNS: Vec<(Regex, InvoiceType)> = {
        let mut synonyms: Vec<_> = INVOICE_TYPE_SYNONYMS.to_vec();
        synonyms.sort_by_key(|(key, _)| std::cmp::Reverse(key.len()));
        synonyms
            .into_iter()
            .map(|(key, invoice_type)| {
                let pattern = format!(r"\b{}s?\b", regex::escape(key));
                (Regex::new(&pattern).unwrap(), invoice_type)
            })
            .collect()
    };
}

/// Invoice type extractor.
///
/// Synonyms only match as whole words, so "sub" never fires inside
/// "subscription" and "ms" never fires inside "items".
pub struct InvoiceTypeExtractor;

impl InvoiceTypeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceTypeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceTypeExtractor {
    type Output = InvoiceType;

    fn extract_all(&self, query: &str) -> Vec<ExtractionMatch<InvoiceType>> {
        SYNONYM_PATTERNS
            .iter()
            .filter_map(|(pattern, invoice_type)| {
                pattern.find(query).map(|m| {
                    ExtractionMatch::new(*invoice_type, m.as_str())
                        .with_position(m.start(), m.end())
                })
            })
            .collect()
    }
}

/// Resolve a free-text type phrase ("Managed Services", "ps") to its canonical type.
pub fn resolve_invoice_type(text: &str) -> Option<InvoiceType> {
    let normalized = text.trim().to_lowercase();
    InvoiceTypeExtractor::new()
        .extract(&normalized)
        .map(|m| m.value)
}
