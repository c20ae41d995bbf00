//! Data models: invoice records, compiled filters and configuration.

pub mod config;
pub mod filter;
pub mod invoice;

pub use config::{InvoqConfig, QueryConfig, ReportingConfig};
pub use filter::{DateRange, StatusFilter, StructuredFilter};
pub use invoice::{InvoiceRecord, InvoiceStatus, InvoiceType};
