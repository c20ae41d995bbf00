//! Contract identifier extraction.

use super::patterns::CONTRACT;
use super::{ExtractionMatch, FieldExtractor};

/// Contract field extractor.
///
/// Recognizes "on contract X", "for contract X" and bare "contract X". The
/// identifier runs until a stop word, a question mark or the end of the query.
pub struct ContractExtractor;

impl ContractExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ContractExtractor {
    type Output = String;

    fn extract_all(&self, query: &str) -> Vec<ExtractionMatch<String>> {
        let mut results = Vec::new();

        for caps in CONTRACT.captures_iter(query) {
            let Some(id) = caps.get(1) else { continue };
            let value = clean_identifier(id.as_str());
            if value.is_empty() {
                continue;
            }

            let start = id.start();
            results.push(
                ExtractionMatch::new(value.to_string(), id.as_str())
                    .with_position(start, start + value.len()),
            );
        }

        results
    }
}

fn clean_identifier(raw: &str) -> &str {
    raw.trim().trim_end_matches(['.', ',']).trim_end()
}
