//! Financial reports over a filtered invoice set.

mod aging;
mod cash_flow;
mod exchange;

pub use aging::{aging_summary, days_overdue, AgingBucket, AgingSummary, BucketSummary};
pub use cash_flow::{cash_flow, CashFlowProjection, CurrencySubtotal, DEFAULT_HORIZON_DAYS};
pub use exchange::{normalize_code, ExchangeRateTable};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::evaluator;
use crate::models::config::{InvoqConfig, ReportingConfig};
use crate::models::filter::StructuredFilter;
use crate::models::invoice::InvoiceRecord;
use crate::query::QueryCompiler;

/// Which sections to include in a report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub aging: bool,
    pub cash_flow: bool,
    /// Overrides the engine's horizon for this report.
    pub horizon_days: Option<u32>,
}

/// Result of running a filter and the requested reports over a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub filter: StructuredFilter,
    pub matching_invoices: Vec<&'a InvoiceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aging_summary: Option<AgingSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_flow: Option<CashFlowProjection>,
}

/// Produces reports against a fixed reference date and exchange-rate table.
pub struct ReportEngine {
    rates: ExchangeRateTable,
    today: NaiveDate,
    horizon_days: u32,
    compiler: QueryCompiler,
}

impl ReportEngine {
    pub fn new(rates: ExchangeRateTable, today: NaiveDate) -> Self {
        Self {
            rates,
            today,
            horizon_days: DEFAULT_HORIZON_DAYS,
            compiler: QueryCompiler::new(today),
        }
    }

    /// Create an engine from the reporting configuration.
    pub fn from_reporting_config(config: &ReportingConfig, today: NaiveDate) -> Self {
        Self::new(config.exchange_rate_table(), today)
            .with_horizon_days(config.cash_flow_horizon_days)
    }

    /// Create an engine whose queries also honor the query configuration.
    pub fn from_config(config: &InvoqConfig, today: NaiveDate) -> Self {
        Self::from_reporting_config(&config.reporting, today)
            .with_compiler(QueryCompiler::from_config(&config.query, today))
    }

    /// Replace the compiler used by [`ReportEngine::run`].
    pub fn with_compiler(mut self, compiler: QueryCompiler) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    pub fn rates(&self) -> &ExchangeRateTable {
        &self.rates
    }

    pub fn aging<'a, I>(&self, invoices: I) -> AgingSummary
    where
        I: IntoIterator<Item = &'a InvoiceRecord>,
    {
        aging_summary(invoices, self.today)
    }

    pub fn cash_flow<'a, I>(&self, invoices: I) -> CashFlowProjection
    where
        I: IntoIterator<Item = &'a InvoiceRecord>,
    {
        cash_flow(invoices, &self.rates, self.today, self.horizon_days)
    }

    /// Compile a free-text query and report on the invoices it matches.
    pub fn run<'a>(
        &self,
        query: &str,
        invoices: &'a [InvoiceRecord],
        options: ReportOptions,
    ) -> Report<'a> {
        let filter = self.compiler.compile(query);
        self.build(filter, invoices, options)
    }

    /// Filter the snapshot and build the requested report sections.
    pub fn build<'a>(
        &self,
        filter: StructuredFilter,
        invoices: &'a [InvoiceRecord],
        options: ReportOptions,
    ) -> Report<'a> {
        let matching_invoices = evaluator::apply(&filter, invoices);

        let aging_summary = options
            .aging
            .then(|| self.aging(matching_invoices.iter().copied()));

        let horizon_days = options.horizon_days.unwrap_or(self.horizon_days);
        let cash_flow = options.cash_flow.then(|| {
            cash_flow(
                matching_invoices.iter().copied(),
                &self.rates,
                self.today,
                horizon_days,
            )
        });

        info!(
            matched = matching_invoices.len(),
            aging = aging_summary.is_some(),
            cash_flow = cash_flow.is_some(),
            "built report"
        );

        Report {
            filter,
            matching_invoices,
            aging_summary,
            cash_flow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rust_decimal::Decimal;

    #[test]
    fn test_overdue_aud_invoice_in_usd_report() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let invoices = vec![
            InvoiceRecord::new("1", "Barwon Health", Decimal::new(1000, 0))
                .with_currency("AUD")
                .with_due_date(today - Days::new(61)),
        ];
        let rates = ExchangeRateTable::identity("USD").with_rate("AUD", Decimal::new(65, 2));
        let engine = ReportEngine::new(rates, today);

        let report = engine.build(
            StructuredFilter::default(),
            &invoices,
            ReportOptions {
                aging: true,
                cash_flow: true,
                horizon_days: None,
            },
        );

        let aging = report.aging_summary.unwrap();
        assert_eq!(aging.bucket(AgingBucket::Days61To90).unwrap().count, 1);

        let cash_flow = report.cash_flow.unwrap();
        assert_eq!(cash_flow.total, Decimal::new(650, 0));
    }

    #[test]
    fn test_sections_are_optional() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let engine = ReportEngine::new(ExchangeRateTable::identity("USD"), today);
        let invoices = vec![InvoiceRecord::new("1", "A", Decimal::ONE)];

        let report = engine.build(StructuredFilter::default(), &invoices, ReportOptions::default());
        assert_eq!(report.matching_invoices.len(), 1);
        assert!(report.aging_summary.is_none());
        assert!(report.cash_flow.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("aging_summary").is_none());
    }

    #[test]
    fn test_from_config_uses_horizon() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut config = ReportingConfig::default();
        config.cash_flow_horizon_days = 10;

        let engine = ReportEngine::from_reporting_config(&config, today);
        let invoices: Vec<InvoiceRecord> = Vec::new();
        let projection = engine.cash_flow(&invoices);
        assert_eq!(
            projection.horizon,
            NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
        );
        assert_eq!(engine.rates().reporting_currency(), "USD");
    }

    #[test]
    fn test_run_compiles_query_with_config_exclusions() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let invoices = vec![
            InvoiceRecord::new("1", "Barwon Health", Decimal::new(100, 0))
                .with_due_date(today - Days::new(61)),
            InvoiceRecord::new("2", "Internal Ops", Decimal::new(50, 0)),
        ];

        let engine = ReportEngine::new(ExchangeRateTable::identity("USD"), today);
        let report = engine.run("Barwon Health invoices", &invoices, ReportOptions::default());
        assert_eq!(report.filter.client.as_deref(), Some("barwon health"));
        assert_eq!(report.matching_invoices.len(), 1);

        let mut config = InvoqConfig::default();
        config.query.extra_client_exclusions.push("internal".to_string());
        let engine = ReportEngine::from_config(&config, today);
        let report = engine.run("internal invoices", &invoices, ReportOptions::default());
        assert!(report.filter.is_empty());
        assert_eq!(report.matching_invoices.len(), 2);
    }
}
