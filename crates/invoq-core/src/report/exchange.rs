//! Currency conversion into the reporting currency.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable mapping from currency code to its multiplier into the
/// reporting currency.
///
/// Unknown currencies convert at 1. Callers learn about the fallback through
/// [`ExchangeRateTable::rate`], which reports whether the code was known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    reporting_currency: String,
    rates: BTreeMap<String, Decimal>,
}

impl ExchangeRateTable {
    /// Create a table. Codes are upper-cased; the reporting currency always
    /// converts at 1.
    pub fn new(reporting_currency: &str, rates: BTreeMap<String, Decimal>) -> Self {
        let reporting_currency = normalize_code(reporting_currency);
        let mut rates: BTreeMap<String, Decimal> = rates
            .into_iter()
            .map(|(code, rate)| (normalize_code(&code), rate))
            .collect();
        rates.insert(reporting_currency.clone(), Decimal::ONE);

        Self {
            reporting_currency,
            rates,
        }
    }

    /// A table that only knows the reporting currency.
    pub fn identity(reporting_currency: &str) -> Self {
        Self::new(reporting_currency, BTreeMap::new())
    }

    /// Add or replace a rate.
    pub fn with_rate(mut self, currency: &str, rate: Decimal) -> Self {
        let code = normalize_code(currency);
        if code != self.reporting_currency {
            self.rates.insert(code, rate);
        }
        self
    }

    pub fn reporting_currency(&self) -> &str {
        &self.reporting_currency
    }

    /// The multiplier for `currency` and whether the currency is known.
    pub fn rate(&self, currency: &str) -> (Decimal, bool) {
        match self.rates.get(&normalize_code(currency)) {
            Some(rate) => (*rate, true),
            None => (Decimal::ONE, false),
        }
    }

    /// Convert an amount into the reporting currency.
    pub fn convert(&self, amount: Decimal, currency: &str) -> Decimal {
        amount * self.rate(currency).0
    }
}

/// Upper-cased, trimmed currency code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
