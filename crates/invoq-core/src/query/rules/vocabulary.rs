//! Static vocabulary used by the query extractors.

use crate::models::invoice::InvoiceType;

/// Free-text synonyms for each canonical invoice type, in declaration order.
///
/// Resolution checks longer keys first, so the order here only breaks ties
/// between keys of equal length.
pub const INVOICE_TYPE_SYNONYMS: &[(&str, InvoiceType)] = &[
    ("professional services", InvoiceType::ProfessionalServices),
    ("professional service", InvoiceType::ProfessionalServices),
    ("ps", InvoiceType::ProfessionalServices),
    ("maintenance", InvoiceType::Maintenance),
    ("maint", InvoiceType::Maintenance),
    ("support", InvoiceType::Maintenance),
    ("subscription", InvoiceType::Subscription),
    ("sub", InvoiceType::Subscription),
    ("hosting", InvoiceType::Hosting),
    ("managed services", InvoiceType::ManagedServices),
    ("managed service", InvoiceType::ManagedServices),
    ("ms", InvoiceType::ManagedServices),
    ("software", InvoiceType::Software),
    ("licence", InvoiceType::Software),
    ("license", InvoiceType::Software),
    ("sw", InvoiceType::Software),
    ("hardware", InvoiceType::Hardware),
    ("hw", InvoiceType::Hardware),
    ("third party", InvoiceType::ThirdPartyProduct),
    ("third-party", InvoiceType::ThirdPartyProduct),
    ("3pp", InvoiceType::ThirdPartyProduct),
    ("credit memo", InvoiceType::CreditMemo),
    ("credit note", InvoiceType::CreditMemo),
];

/// Payment status keywords.
pub const STATUS_WORDS: &[&str] = &["unpaid", "paid", "overdue", "pending", "outstanding"];

/// Billing frequency words.
pub const FREQUENCY_WORDS: &[&str] = &["monthly", "quarterly", "annual", "adhoc"];

/// Leading command words.
pub const COMMAND_WORDS: &[&str] = &["show me", "show"];

/// Question openers owned by the interrogative client pattern.
pub const QUESTION_WORDS: &[&str] = &["which", "what"];

/// Determiners and fillers that may precede a client name.
pub const FILLER_WORDS: &[&str] = &["all", "the", "my", "our", "any", "are", "is", "me"];

/// Aggregate words that open a question about totals, e.g. "the total for X".
pub const AGGREGATE_WORDS: &[&str] = &["total", "sum"];

/// Connectors that may sit between an aggregate word and a client name.
pub const CONNECTOR_WORDS: &[&str] = &["for", "of"];

/// Month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// A period relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePeriod {
    ThisMonth,
    LastMonth,
    NextMonth,
    ThisYear,
    LastYear,
    NextYear,
}

/// Recognized relative-time phrases.
pub const RELATIVE_PHRASES: &[(&str, RelativePeriod)] = &[
    ("this month", RelativePeriod::ThisMonth),
    ("current month", RelativePeriod::ThisMonth),
    ("last month", RelativePeriod::LastMonth),
    ("previous month", RelativePeriod::LastMonth),
    ("next month", RelativePeriod::NextMonth),
    ("this year", RelativePeriod::ThisYear),
    ("current year", RelativePeriod::ThisYear),
    ("last year", RelativePeriod::LastYear),
    ("previous year", RelativePeriod::LastYear),
    ("next year", RelativePeriod::NextYear),
];

/// Look up a relative-time phrase.
pub fn relative_period(phrase: &str) -> Option<RelativePeriod> {
    RELATIVE_PHRASES
        .iter()
        .find(|(p, _)| *p == phrase)
        .map(|(_, period)| *period)
}

/// Month number (1-12) for a full month name.
pub fn month_number(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// Whether `text` begins with a month name as a whole word.
pub fn starts_with_month(text: &str) -> bool {
    let first = text.split_whitespace().next().unwrap_or("");
    month_number(first).is_some()
}

/// The canonical list of words that are never a client name.
pub fn excluded_client_words() -> impl Iterator<Item = &'static str> {
    STATUS_WORDS
        .iter()
        .copied()
        .chain(INVOICE_TYPE_SYNONYMS.iter().map(|(key, _)| *key))
        .chain(FREQUENCY_WORDS.iter().copied())
        .chain(COMMAND_WORDS.iter().copied())
        .chain(std::iter::once("all"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("january"), Some(1));
        assert_eq!(month_number("december"), Some(12));
        assert_eq!(month_number("jan"), None);
    }

    #[test]
    fn test_relative_period() {
        assert_eq!(relative_period("previous month"), Some(RelativePeriod::LastMonth));
        assert_eq!(relative_period("current year"), Some(RelativePeriod::ThisYear));
        assert_eq!(relative_period("some month"), None);
    }

    #[test]
    fn test_exclusion_list_covers_vocabulary() {
        let words: Vec<_> = excluded_client_words().collect();
        for word in ["unpaid", "outstanding", "maintenance", "ms", "quarterly", "show me"] {
            assert!(words.contains(&word), "{word} should be excluded");
        }
    }

    #[test]
    fn test_starts_with_month() {
        assert!(starts_with_month("march 2025"));
        assert!(!starts_with_month("marchant holdings"));
    }
}
