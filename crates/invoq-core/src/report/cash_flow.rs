//! Currency-normalized cash-flow projection.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::invoice::{InvoiceRecord, InvoiceStatus};

use super::exchange::{normalize_code, ExchangeRateTable};

/// Default projection horizon in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Per-currency contribution to the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencySubtotal {
    /// Number of invoices in this currency.
    pub count: usize,
    /// Sum in the original currency.
    pub original: Decimal,
    /// Multiplier used for conversion.
    pub rate: Decimal,
    /// Sum converted into the reporting currency.
    pub converted: Decimal,
}

/// Expected incoming cash up to a horizon date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowProjection {
    pub as_of: NaiveDate,
    pub horizon: NaiveDate,
    pub reporting_currency: String,

    /// Total in the reporting currency.
    pub total: Decimal,

    /// Breakdown by original currency for audit display.
    pub by_currency: BTreeMap<String, CurrencySubtotal>,

    /// Pending invoices left out because they have no due date.
    pub missing_due_date: usize,

    /// Approximations made while converting, e.g. unknown currencies or
    /// overflowed sums.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Project cash expected from pending invoices due on or before
/// `today + horizon_days`.
///
/// Invoices already past due but still pending are included. Currencies
/// missing from `rates` are converted at 1 and reported in `warnings`, as are
/// amounts left out because a sum or conversion overflowed.
pub fn cash_flow<'a, I>(
    invoices: I,
    rates: &ExchangeRateTable,
    today: NaiveDate,
    horizon_days: u32,
) -> CashFlowProjection
where
    I: IntoIterator<Item = &'a InvoiceRecord>,
{
    let horizon = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut originals: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    let mut missing_due_date = 0;
    let mut warnings = Vec::new();

    for invoice in invoices {
        if invoice.status != InvoiceStatus::Pending {
            continue;
        }
        let Some(due_date) = invoice.due_date else {
            missing_due_date += 1;
            continue;
        };
        if due_date > horizon {
            continue;
        }

        let code = normalize_code(&invoice.currency);
        let entry = originals.entry(code.clone()).or_default();
        match entry.1.checked_add(invoice.amount_due) {
            Some(sum) => {
                entry.0 += 1;
                entry.1 = sum;
            }
            None => {
                warn!(invoice = %invoice.id, currency = %code, "cash-flow subtotal overflowed");
                warnings.push(format!(
                    "{code} subtotal overflowed; invoice {} left out",
                    invoice.id
                ));
            }
        }
    }

    let mut by_currency = BTreeMap::new();
    let mut total = Decimal::ZERO;

    for (code, (count, original)) in originals {
        let (rate, known) = rates.rate(&code);
        if !known {
            warn!(currency = %code, "no exchange rate, converting at 1");
            warnings.push(format!(
                "no exchange rate for {code}; {count} invoice(s) converted at 1"
            ));
        }

        let Some(converted) = original.checked_mul(rate) else {
            warn!(currency = %code, "conversion overflowed");
            warnings.push(format!(
                "converting {original} {code} overflowed; left out of the total"
            ));
            continue;
        };
        match total.checked_add(converted) {
            Some(sum) => total = sum,
            None => {
                warn!(currency = %code, "cash-flow total overflowed");
                warnings.push(format!("total overflowed; {code} left out of the total"));
                continue;
            }
        }

        let subtotal = CurrencySubtotal {
            count,
            original,
            rate,
            converted,
        };
        by_currency.insert(code, subtotal);
    }

    CashFlowProjection {
        as_of: today,
        horizon,
        reporting_currency: rates.reporting_currency().to_string(),
        total,
        by_currency,
        missing_due_date,
        warnings,
    }
}
