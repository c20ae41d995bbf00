//! Free-text query interpretation.
//!
//! A query such as "Maintenance invoices for Barwon Health this month" is
//! normalized, run through independent rule-based extractors and compiled
//! into a [`StructuredFilter`](crate::models::filter::StructuredFilter).

mod compiler;
pub mod rules;

pub use compiler::{compile, normalize, QueryCompiler};
pub use rules::{ExtractionMatch, FieldExtractor};
