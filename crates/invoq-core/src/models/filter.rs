//! The structured filter compiled from a free-text query.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::invoice::{InvoiceStatus, InvoiceType};

/// Machine-usable representation of a query's intent.
///
/// Every field is optional; an empty filter matches all invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredFilter {
    /// Case-insensitive substring of the client name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Case-insensitive substring of the customer contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,

    /// Canonical invoice type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,

    /// Inclusive invoice-date range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,

    /// Payment status constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusFilter>,
}

impl StructuredFilter {
    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.client.is_none()
            && self.contract.is_none()
            && self.invoice_type.is_none()
            && self.date_range.is_none()
            && self.status.is_none()
    }

    /// Human-readable lines for a "detected filters" display.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(client) = &self.client {
            lines.push(format!("Client: {client}"));
        }
        if let Some(contract) = &self.contract {
            lines.push(format!("Contract: {contract}"));
        }
        if let Some(invoice_type) = self.invoice_type {
            lines.push(format!("Type: {invoice_type}"));
        }
        if let Some(range) = &self.date_range {
            lines.push(format!("Invoice date: {range}"));
        }
        if let Some(status) = self.status {
            lines.push(format!("Status: {status}"));
        }
        lines
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Status constraint recognized from query keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Paid,
    Pending,
    Overdue,
    /// Anything not yet settled ("unpaid", "outstanding").
    Unpaid,
}

impl StatusFilter {
    /// Map a query keyword to a status constraint.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "paid" => Some(StatusFilter::Paid),
            "pending" => Some(StatusFilter::Pending),
            "overdue" => Some(StatusFilter::Overdue),
            "unpaid" | "outstanding" => Some(StatusFilter::Unpaid),
            _ => None,
        }
    }

    /// Whether an invoice status satisfies this constraint.
    pub fn accepts(&self, status: InvoiceStatus) -> bool {
        match self {
            StatusFilter::Paid => status == InvoiceStatus::Paid,
            StatusFilter::Pending => status == InvoiceStatus::Pending,
            StatusFilter::Overdue => status == InvoiceStatus::Overdue,
            StatusFilter::Unpaid => {
                !matches!(status, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
            }
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusFilter::Paid => "paid",
            StatusFilter::Pending => "pending",
            StatusFilter::Overdue => "overdue",
            StatusFilter::Unpaid => "unpaid",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31));
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 1, 31)));
        assert!(!range.contains(date(2025, 2, 1)));
        assert!(!range.contains(date(2024, 12, 31)));
    }

    #[test]
    fn test_unpaid_accepts_open_statuses() {
        assert!(StatusFilter::Unpaid.accepts(InvoiceStatus::Pending));
        assert!(StatusFilter::Unpaid.accepts(InvoiceStatus::Overdue));
        assert!(!StatusFilter::Unpaid.accepts(InvoiceStatus::Paid));
        assert!(!StatusFilter::Unpaid.accepts(InvoiceStatus::Cancelled));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StructuredFilter::default();
        assert!(filter.is_empty());
        assert!(filter.describe().is_empty());
        assert_eq!(serde_json::to_string(&filter).unwrap(), "{}");
    }

    #[test]
    fn test_describe() {
        let filter = StructuredFilter {
            contract: Some("527995".to_string()),
            invoice_type: Some(InvoiceType::Maintenance),
            status: Some(StatusFilter::Overdue),
            ..Default::default()
        };
        assert_eq!(
            filter.describe(),
            vec!["Contract: 527995", "Type: Maint", "Status: overdue"]
        );
    }
}
