//! Core library for invoice search and reporting.
//!
//! This crate provides:
//! - A deterministic, rule-based interpreter turning free-text queries such as
//!   "Maintenance invoices for Barwon Health this month" into structured filters
//! - An evaluator applying those filters to an in-memory invoice snapshot
//! - Aging-bucket and currency-normalized cash-flow reports
//!
//! Nothing here performs I/O on invoices; callers supply a read-only snapshot.

pub mod error;
pub mod evaluator;
pub mod models;
pub mod query;
pub mod report;

pub use error::{ConfigError, InvoqError, Result};
pub use evaluator::{apply, bulk_status_candidates};
pub use models::{
    DateRange, InvoiceRecord, InvoiceStatus, InvoiceType, InvoqConfig, StatusFilter,
    StructuredFilter,
};
pub use query::{compile, QueryCompiler};
pub use report::{
    AgingBucket, AgingSummary, CashFlowProjection, ExchangeRateTable, Report, ReportEngine,
    ReportOptions,
};
