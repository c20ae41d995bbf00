//! Error types for the invoq-core library.
//!
//! Query compilation and filtering never fail: unmatched text degrades to an
//! empty filter. Errors only arise at the edges, when loading configuration or
//! invoice snapshots.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the invoq library.
#[derive(Error, Debug)]
pub enum InvoqError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to configuration values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reporting currency is empty or not a currency code.
    #[error("invalid reporting currency: {0:?}")]
    ReportingCurrency(String),

    /// An exchange rate is zero or negative.
    #[error("invalid exchange rate for {currency}: {rate}")]
    ExchangeRate { currency: String, rate: Decimal },

    /// The reporting currency must convert to itself at 1.
    #[error("reporting currency {currency} must have rate 1, found {rate}")]
    ReportingRate { currency: String, rate: Decimal },
}

/// Result type for the invoq library.
pub type Result<T> = std::result::Result<T, InvoqError>;
