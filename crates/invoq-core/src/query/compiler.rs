//! Query compiler: runs the extractors in a fixed order and resolves conflicts.

use chrono::{Local, NaiveDate};
use tracing::{debug, trace};

use crate::models::config::QueryConfig;
use crate::models::filter::StructuredFilter;

use super::rules::{
    ClientNameExtractor, ContractExtractor, FieldExtractor, InvoiceTypeExtractor,
    StatusExtractor, TemporalExtractor,
};

/// Compiles free-text queries into structured filters.
///
/// Extraction order is contract, invoice type, temporal, status, then client
/// name. Contract and type matches are high-precision and claim their text
/// before the client cascade runs:
///
/// - a detected contract suppresses the client name entirely;
/// - a temporal phrase overlapping the contract identifier is dropped;
/// - a client candidate overlapping a claimed contract or temporal span is
///   skipped in favour of the next candidate.
///
/// Compilation never fails; text nothing recognizes leaves the filter empty.
pub struct QueryCompiler {
    contract: ContractExtractor,
    invoice_type: InvoiceTypeExtractor,
    temporal: TemporalExtractor,
    status: StatusExtractor,
    client: ClientNameExtractor,
}

impl QueryCompiler {
    /// Create a compiler resolving relative dates against `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            contract: ContractExtractor::new(),
            invoice_type: InvoiceTypeExtractor::new(),
            temporal: TemporalExtractor::new(today),
            status: StatusExtractor::new(),
            client: ClientNameExtractor::new(),
        }
    }

    /// Create a compiler with settings from the query configuration.
    pub fn from_config(config: &QueryConfig, today: NaiveDate) -> Self {
        Self::new(today).with_client_exclusions(&config.extra_client_exclusions)
    }

    /// Add words that must never be read as a client name.
    pub fn with_client_exclusions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.client = self.client.with_exclusions(words);
        self
    }

    /// Compile a query into a structured filter.
    pub fn compile(&self, query: &str) -> StructuredFilter {
        let query = normalize(query);
        let mut filter = StructuredFilter::default();
        let mut claimed: Vec<(usize, usize)> = Vec::new();

        if let Some(contract) = self.contract.extract(&query) {
            trace!(contract = %contract.value, "contract matched");
            claimed.push(contract.position);
            filter.contract = Some(contract.value);
        }

        if let Some(invoice_type) = self.invoice_type.extract(&query) {
            trace!(invoice_type = %invoice_type.value, source = %invoice_type.source, "type matched");
            filter.invoice_type = Some(invoice_type.value);
        }

        let contract_span = claimed.first().copied();
        let temporal = self
            .temporal
            .extract_all(&query)
            .into_iter()
            .find(|m| contract_span.is_none_or(|span| !m.overlaps(span)));
        if let Some(temporal) = temporal {
            trace!(range = %temporal.value, source = %temporal.source, "temporal matched");
            claimed.push(temporal.position);
            filter.date_range = Some(temporal.value);
        }

        if let Some(status) = self.status.extract(&query) {
            trace!(status = %status.value, "status matched");
            filter.status = Some(status.value);
        }

        if filter.contract.is_some() {
            trace!("contract present, skipping client name");
        } else {
            let client = self.client.extract_all(&query).into_iter().find(|candidate| {
                let overlapping = claimed.iter().any(|span| candidate.overlaps(*span));
                if overlapping {
                    debug!(candidate = %candidate.value, "client candidate overlaps a claimed span, skipped");
                }
                !overlapping
            });
            if let Some(client) = client {
                trace!(client = %client.value, "client matched");
                filter.client = Some(client.value);
            }
        }

        debug!(query = %query, filter = ?filter, "compiled query");
        filter
    }
}

/// Compile a query against the local date.
pub fn compile(query: &str) -> StructuredFilter {
    QueryCompiler::new(Local::now().date_naive()).compile(query)
}

/// Lower-case, trim and collapse runs of whitespace.
pub fn normalize(query: &str) -> String {
    query
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
