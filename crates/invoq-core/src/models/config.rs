//! Configuration structures for query compilation and reporting.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::report::ExchangeRateTable;

/// Main configuration for invoq.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoqConfig {
    /// Query compilation configuration.
    pub query: QueryConfig,

    /// Reporting configuration.
    pub reporting: ReportingConfig,
}

/// Query compilation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Words that must never be read as a client name, on top of the
    /// built-in exclusion list.
    pub extra_client_exclusions: Vec<String>,
}

/// Reporting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Currency all totals are normalized to.
    pub reporting_currency: String,

    /// Multiplier from each currency into the reporting currency.
    pub exchange_rates: BTreeMap<String, Decimal>,

    /// Cash-flow projection horizon in days from today.
    pub cash_flow_horizon_days: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        let exchange_rates = [
            ("USD", Decimal::ONE),
            ("AUD", Decimal::new(65, 2)),
            ("NZD", Decimal::new(60, 2)),
            ("EUR", Decimal::new(108, 2)),
            ("GBP", Decimal::new(127, 2)),
            ("CAD", Decimal::new(73, 2)),
            ("SGD", Decimal::new(74, 2)),
        ]
        .into_iter()
        .map(|(code, rate)| (code.to_string(), rate))
        .collect();

        Self {
            reporting_currency: "USD".to_string(),
            exchange_rates,
            cash_flow_horizon_days: 30,
        }
    }
}

impl ReportingConfig {
    /// Build the immutable exchange-rate table used by the reporting engine.
    pub fn exchange_rate_table(&self) -> ExchangeRateTable {
        ExchangeRateTable::new(&self.reporting_currency, self.exchange_rates.clone())
    }
}

impl InvoqConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the configuration for values the reporting engine cannot use.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let reporting = &self.reporting;
        let currency = reporting.reporting_currency.trim();

        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::ReportingCurrency(
                reporting.reporting_currency.clone(),
            ));
        }

        for (code, rate) in &reporting.exchange_rates {
            if *rate <= Decimal::ZERO {
                return Err(ConfigError::ExchangeRate {
                    currency: code.clone(),
                    rate: *rate,
                });
            }
            if code.eq_ignore_ascii_case(currency) && *rate != Decimal::ONE {
                return Err(ConfigError::ReportingRate {
                    currency: code.clone(),
                    rate: *rate,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = InvoqConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reporting.reporting_currency, "USD");
        assert_eq!(config.reporting.cash_flow_horizon_days, 30);
        assert_eq!(
            config.reporting.exchange_rates.get("AUD"),
            Some(&Decimal::new(65, 2))
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut config = InvoqConfig::default();
        config
            .reporting
            .exchange_rates
            .insert("JPY".to_string(), Decimal::new(-1, 2));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ExchangeRate { .. })
        ));
    }

    #[test]
    fn test_reporting_rate_must_be_one() {
        let mut config = InvoqConfig::default();
        config
            .reporting
            .exchange_rates
            .insert("USD".to_string(), Decimal::new(2, 0));

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ReportingRate { .. })
        ));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"reporting": {"reporting_currency": "AUD", "exchange_rates": {"AUD": "1", "USD": "1.54"}}}"#,
        )
        .unwrap();

        let config = InvoqConfig::from_file(&path).unwrap();
        assert_eq!(config.reporting.reporting_currency, "AUD");
        assert_eq!(config.reporting.cash_flow_horizon_days, 30);
        assert!(config.query.extra_client_exclusions.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvoqConfig::default();
        config.query.extra_client_exclusions.push("internal".to_string());
        config.save(&path).unwrap();

        let loaded = InvoqConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
