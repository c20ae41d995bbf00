//! Client name extraction.
//!
//! Queries are ambiguous between a client name and a status, type or
//! temporal qualifier. Four patterns are tried from most to least specific,
//! and every candidate is checked against the exclusion vocabulary:
//!
//! 1. "which/what X invoices"
//! 2. "show me X invoices", unless followed by "on/for contract"
//! 3. "invoices for/from/to/by X", unless X is really a date phrase
//! 4. "X invoices" at the start, unless followed by a preposition

use regex::Match;

use super::patterns::{
    CLIENT_INTERROGATIVE, CLIENT_LEADING, CLIENT_PREPOSITION, CLIENT_SHOW_ME, DATE_LIKE,
};
use super::vocabulary::{
    excluded_client_words, relative_period, starts_with_month, AGGREGATE_WORDS, COMMAND_WORDS,
    CONNECTOR_WORDS, FILLER_WORDS, FREQUENCY_WORDS, QUESTION_WORDS, STATUS_WORDS,
};
use super::{ExtractionMatch, FieldExtractor};

/// Client name extractor.
#[derive(Debug, Clone, Default)]
pub struct ClientNameExtractor {
    extra_exclusions: Vec<String>,
}

impl ClientNameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add words that must never be read as a client name.
    pub fn with_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_exclusions.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Whether a cleaned candidate must not be treated as a client name.
    pub fn is_excluded(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return true;
        }
        if excluded_client_words().any(|w| w == candidate)
            || self.extra_exclusions.iter().any(|w| w == candidate)
        {
            return true;
        }
        COMMAND_WORDS
            .iter()
            .any(|c| candidate.strip_prefix(c).is_some_and(|rest| rest.starts_with(' ')))
    }

    /// Turn a captured group into a client match, or reject it.
    fn accept(&self, group: Match<'_>) -> Option<ExtractionMatch<String>> {
        let raw = group.as_str();
        let stripped = strip_leading_qualifiers(raw);
        let name = stripped.trim_end().trim_end_matches([',', '.', '!']).trim_end();

        if self.is_excluded(name) {
            return None;
        }

        let start = group.start() + (raw.len() - stripped.len());
        Some(ExtractionMatch::new(name.to_string(), raw).with_position(start, start + name.len()))
    }

    fn interrogative(&self, query: &str) -> Option<ExtractionMatch<String>> {
        let caps = CLIENT_INTERROGATIVE.captures(query)?;
        self.accept(caps.get(1)?)
    }

    fn show_me(&self, query: &str) -> Option<ExtractionMatch<String>> {
        let caps = CLIENT_SHOW_ME.captures(query)?;
        if caps.get(2).is_some() {
            return None;
        }
        self.accept(caps.get(1)?)
    }

    fn preposition(&self, query: &str) -> Option<ExtractionMatch<String>> {
        let caps = CLIENT_PREPOSITION.captures(query)?;
        let candidate = self.accept(caps.get(1)?)?;
        if looks_temporal(&candidate.value) || first_word(&candidate.value) == "contract" {
            return None;
        }
        Some(candidate)
    }

    fn leading(&self, query: &str) -> Option<ExtractionMatch<String>> {
        let caps = CLIENT_LEADING.captures(query)?;
        let group = caps.get(1)?;
        if caps.get(2).is_some() || QUESTION_WORDS.contains(&first_word(group.as_str())) {
            return None;
        }
        self.accept(group)
    }
}

impl FieldExtractor for ClientNameExtractor {
    type Output = String;

    fn extract_all(&self, query: &str) -> Vec<ExtractionMatch<String>> {
        [
            self.interrogative(query),
            self.show_me(query),
            self.preposition(query),
            self.leading(query),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Drop determiners, status and frequency words from the front of a candidate,
/// along with an aggregate phrase such as "total for".
fn strip_leading_qualifiers(mut text: &str) -> &str {
    let mut after_aggregate = false;
    loop {
        text = text.trim_start();
        let first = first_word(text);
        let is_aggregate = AGGREGATE_WORDS.contains(&first);
        let is_qualifier = is_aggregate
            || FILLER_WORDS.contains(&first)
            || STATUS_WORDS.contains(&first)
            || FREQUENCY_WORDS.contains(&first)
            || (after_aggregate && CONNECTOR_WORDS.contains(&first));
        if first.is_empty() || !is_qualifier {
            return text;
        }
        after_aggregate |= is_aggregate;
        text = &text[first.len()..];
    }
}

fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

fn looks_temporal(candidate: &str) -> bool {
    relative_period(candidate).is_some()
        || starts_with_month(candidate)
        || DATE_LIKE.is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(query: &str) -> Option<String> {
        ClientNameExtractor::new().extract(query).map(|m| m.value)
    }

    #[test]
    fn test_interrogative() {
        assert_eq!(
            client("which barwon health invoices are overdue"),
            Some("barwon health".to_string())
        );
        assert_eq!(
            client("what monash contracts do we have"),
            Some("monash".to_string())
        );
    }

    #[test]
    fn test_interrogative_with_only_qualifiers() {
        assert_eq!(client("what are the overdue invoices"), None);
    }

    #[test]
    fn test_interrogative_strips_aggregate_phrase() {
        assert_eq!(
            client("what is the total for barwon health invoices?"),
            Some("barwon health".to_string())
        );
        assert_eq!(
            client("what is the sum of overdue alfred health invoices"),
            Some("alfred health".to_string())
        );
    }

    #[test]
    fn test_connector_kept_without_aggregate() {
        assert_eq!(
            strip_leading_qualifiers("the for example clinic"),
            "for example clinic"
        );
    }

    #[test]
    fn test_show_me() {
        assert_eq!(
            client("show me alfred health invoices"),
            Some("alfred health".to_string())
        );
    }

    #[test]
    fn test_show_me_rejects_contract_query() {
        assert_eq!(client("show me barwon invoices on contract"), None);
        assert_eq!(client("show me barwon invoices for contract"), None);
    }

    #[test]
    fn test_show_me_excluded_words() {
        assert_eq!(client("show me unpaid invoices"), None);
        assert_eq!(client("show me maintenance invoices"), None);
        assert_eq!(client("show me quarterly invoices"), None);
        assert_eq!(client("show me all invoices"), None);
    }

    #[test]
    fn test_show_me_strips_leading_qualifiers() {
        assert_eq!(
            client("show me all unpaid eastern health invoices"),
            Some("eastern health".to_string())
        );
    }

    #[test]
    fn test_preposition() {
        assert_eq!(
            client("maintenance invoices for barwon health"),
            Some("barwon health".to_string())
        );
        assert_eq!(
            client("invoices from st vincent's hospital this month"),
            Some("st vincent's hospital".to_string())
        );
        assert_eq!(
            client("invoices for barwon health on contract 42"),
            Some("barwon health".to_string())
        );
        assert_eq!(
            client("invoices to western health?"),
            Some("western health".to_string())
        );
    }

    #[test]
    fn test_preposition_discards_temporal_phrases() {
        assert_eq!(client("invoices for this month"), None);
        assert_eq!(client("invoices for january 2025"), None);
        assert_eq!(client("invoices from 2024"), None);
        assert_eq!(client("invoices for 2025-03"), None);
    }

    #[test]
    fn test_leading() {
        assert_eq!(
            client("barwon health invoices"),
            Some("barwon health".to_string())
        );
        assert_eq!(client("overdue invoices"), None);
        assert_eq!(client("monthly invoices"), None);
    }

    #[test]
    fn test_leading_rejects_trailing_preposition() {
        // pattern 3 takes this one
        let m = ClientNameExtractor::new()
            .extract("hosting invoices for peninsula health")
            .unwrap();
        assert_eq!(m.value, "peninsula health");
        assert_eq!(
            ClientNameExtractor::new().leading("hosting invoices for peninsula health"),
            None
        );
    }

    #[test]
    fn test_leading_rejects_command_words() {
        assert_eq!(client("show me barwon invoices on contract"), None);
    }

    #[test]
    fn test_leading_rejects_question_openers() {
        assert_eq!(
            ClientNameExtractor::new().leading("what are the overdue invoices"),
            None
        );
    }

    #[test]
    fn test_extra_exclusions() {
        let extractor = ClientNameExtractor::new().with_exclusions(["Internal"]);
        assert_eq!(extractor.extract("internal invoices"), None);
        assert!(extractor.extract("external invoices").is_some());
    }

    #[test]
    fn test_position_after_stripping() {
        let query = "show me all alfred invoices";
        let m = ClientNameExtractor::new().extract(query).unwrap();
        assert_eq!(&query[m.position.0..m.position.1], "alfred");
    }

    #[test]
    fn test_no_client() {
        assert_eq!(client("total outstanding"), None);
        assert_eq!(client(""), None);
    }
}
