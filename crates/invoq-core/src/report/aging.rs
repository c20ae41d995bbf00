//! Aging-bucket classification of unsettled invoices.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::invoice::InvoiceRecord;

use super::exchange::normalize_code;

/// How far past due an unsettled invoice is. Upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AgingBucket {
    /// Not yet due, or up to 30 days past due.
    #[serde(rename = "Current")]
    Current,
    #[serde(rename = "31-60")]
    Days31To60,
    #[serde(rename = "61-90")]
    Days61To90,
    #[serde(rename = "91-120")]
    Days91To120,
    #[serde(rename = "121-180")]
    Days121To180,
    #[serde(rename = "181-270")]
    Days181To270,
    #[serde(rename = "271-365")]
    Days271To365,
    #[serde(rename = ">365")]
    Over365,
}

impl AgingBucket {
    /// All buckets, youngest first.
    pub const ALL: [AgingBucket; 8] = [
        AgingBucket::Current,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Days91To120,
        AgingBucket::Days121To180,
        AgingBucket::Days181To270,
        AgingBucket::Days271To365,
        AgingBucket::Over365,
    ];

    /// Classify a number of whole days past due.
    pub fn from_days(days_overdue: i64) -> Self {
        match days_overdue {
            ..=30 => AgingBucket::Current,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            91..=120 => AgingBucket::Days91To120,
            121..=180 => AgingBucket::Days121To180,
            181..=270 => AgingBucket::Days181To270,
            271..=365 => AgingBucket::Days271To365,
            _ => AgingBucket::Over365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current => "Current",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Days91To120 => "91-120",
            AgingBucket::Days121To180 => "121-180",
            AgingBucket::Days181To270 => "181-270",
            AgingBucket::Days271To365 => "271-365",
            AgingBucket::Over365 => ">365",
        }
    }
}

impl fmt::Display for AgingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole days between `due_date` and `today`; negative when not yet due.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days()
}

/// Count and per-currency totals for one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketSummary {
    pub count: usize,
    pub total_by_currency: BTreeMap<String, Decimal>,
}

/// Aging report over a set of invoices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgingSummary {
    /// Reference date the ages were computed against.
    pub as_of: NaiveDate,

    /// Every bucket, including empty ones.
    pub buckets: BTreeMap<AgingBucket, BucketSummary>,

    /// Unsettled invoices left out because they have no due date.
    pub missing_due_date: usize,

    /// Paid or cancelled invoices left out.
    pub excluded_settled: usize,

    /// Invoices counted in a bucket but left out of its total because the
    /// sum overflowed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AgingSummary {
    /// Number of invoices placed in a bucket.
    pub fn aged_count(&self) -> usize {
        self.buckets.values().map(|b| b.count).sum()
    }

    pub fn bucket(&self, bucket: AgingBucket) -> Option<&BucketSummary> {
        self.buckets.get(&bucket)
    }
}

/// Classify unsettled invoices by age as of `today`.
pub fn aging_summary<'a, I>(invoices: I, today: NaiveDate) -> AgingSummary
where
    I: IntoIterator<Item = &'a InvoiceRecord>,
{
    let mut summary = AgingSummary {
        as_of: today,
        buckets: AgingBucket::ALL
            .into_iter()
            .map(|b| (b, BucketSummary::default()))
            .collect(),
        missing_due_date: 0,
        excluded_settled: 0,
        warnings: Vec::new(),
    };

    for invoice in invoices {
        if !invoice.is_unsettled() {
            summary.excluded_settled += 1;
            continue;
        }
        let Some(due_date) = invoice.due_date else {
            summary.missing_due_date += 1;
            continue;
        };

        let bucket = AgingBucket::from_days(days_overdue(due_date, today));
        let code = normalize_code(&invoice.currency);
        let entry = summary.buckets.entry(bucket).or_default();
        entry.count += 1;

        let total = entry.total_by_currency.entry(code.clone()).or_default();
        match total.checked_add(invoice.amount_due) {
            Some(sum) => *total = sum,
            None => {
                warn!(invoice = %invoice.id, bucket = %bucket, "aging total overflowed");
                summary.warnings.push(format!(
                    "{code} total in bucket {bucket} overflowed; invoice {} left out of the total",
                    invoice.id
                ));
            }
        }
    }

    summary
}
