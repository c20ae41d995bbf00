//! Applies a structured filter to an in-memory invoice snapshot.

use tracing::debug;

use crate::models::filter::StructuredFilter;
use crate::models::invoice::InvoiceRecord;

impl StructuredFilter {
    /// Whether a record satisfies every populated field of the filter.
    ///
    /// A record missing the attribute a field refers to never matches it.
    pub fn matches(&self, record: &InvoiceRecord) -> bool {
        if let Some(client) = &self.client {
            if !contains_ignore_case(&record.client_name, client) {
                return false;
            }
        }

        if let Some(contract) = &self.contract {
            match &record.customer_contract {
                Some(value) if contains_ignore_case(value, contract) => {}
                _ => return false,
            }
        }

        if let Some(invoice_type) = self.invoice_type {
            if record.invoice_type != Some(invoice_type) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if !status.accepts(record.status) {
                return false;
            }
        }

        if let Some(range) = &self.date_range {
            match record.invoice_date {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Return the records matching `filter`, in snapshot order.
pub fn apply<'a>(filter: &StructuredFilter, invoices: &'a [InvoiceRecord]) -> Vec<&'a InvoiceRecord> {
    let matching: Vec<_> = invoices.iter().filter(|r| filter.matches(r)).collect();
    debug!(
        total = invoices.len(),
        matched = matching.len(),
        "applied filter"
    );
    matching
}

/// Records eligible for bulk status changes. Credit memos are never included.
pub fn bulk_status_candidates<'a, I>(invoices: I) -> Vec<&'a InvoiceRecord>
where
    I: IntoIterator<Item = &'a InvoiceRecord>,
{
    invoices.into_iter().filter(|r| !r.is_credit_memo()).collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter::{DateRange, StatusFilter};
    use crate::models::invoice::{InvoiceStatus, InvoiceType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoices() -> Vec<InvoiceRecord> {
        vec![
            InvoiceRecord::new("1", "Barwon Health", Decimal::new(1000, 0))
                .with_contract("CT-527995")
                .with_type(InvoiceType::Maintenance)
                .with_invoice_date(date(2025, 1, 15)),
            InvoiceRecord::new("2", "Alfred Health", Decimal::new(500, 0))
                .with_type(InvoiceType::Hosting)
                .with_invoice_date(date(2025, 2, 1))
                .with_status(InvoiceStatus::Overdue),
            InvoiceRecord::new("3", "BARWON HEALTH", Decimal::new(-200, 0))
                .with_type(InvoiceType::CreditMemo)
                .paid_on(date(2025, 3, 1)),
        ]
    }

    fn ids(records: &[&InvoiceRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let invoices = invoices();
        assert_eq!(apply(&StructuredFilter::default(), &invoices).len(), 3);
    }

    #[test]
    fn test_client_is_case_insensitive_substring() {
        let invoices = invoices();
        let filter = StructuredFilter {
            client: Some("barwon".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, &invoices)), vec!["1", "3"]);
    }

    #[test]
    fn test_contract_missing_never_matches() {
        let invoices = invoices();
        let filter = StructuredFilter {
            contract: Some("527995".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, &invoices)), vec!["1"]);
    }

    #[test]
    fn test_type_and_status() {
        let invoices = invoices();
        let filter = StructuredFilter {
            invoice_type: Some(InvoiceType::Hosting),
            status: Some(StatusFilter::Unpaid),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, &invoices)), vec!["2"]);
    }

    #[test]
    fn test_date_range_requires_invoice_date() {
        let invoices = invoices();
        let filter = StructuredFilter {
            date_range: Some(DateRange::new(date(2025, 1, 1), date(2025, 12, 31))),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&filter, &invoices)), vec!["1", "2"]);
    }

    #[test]
    fn test_credit_memos_in_filtering_but_not_bulk() {
        let invoices = invoices();
        let all = apply(&StructuredFilter::default(), &invoices);
        assert!(all.iter().any(|r| r.is_credit_memo()));

        let bulk = bulk_status_candidates(all);
        assert_eq!(ids(&bulk), vec!["1", "2"]);
    }
}
