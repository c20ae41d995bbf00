//! Report command - aging and cash-flow reports over matching invoices.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{info, warn};

use invoq_core::report::{
    AgingBucket, AgingSummary, CashFlowProjection, Report, ReportEngine, ReportOptions,
};

use super::query::format_filter_text;
use super::{load_config, load_invoices, resolve_today};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Free-text query selecting the invoices to report on
    #[arg(required = true)]
    query: String,

    /// Invoice snapshot (JSON array or CSV)
    #[arg(short, long, required = true)]
    invoices: PathBuf,

    /// Include the aging summary
    #[arg(long)]
    aging: bool,

    /// Include the cash-flow projection
    #[arg(long)]
    cash_flow: bool,

    /// Cash-flow horizon in days (default: from config)
    #[arg(long, value_name = "DAYS")]
    horizon_days: Option<u32>,

    /// Reference date for relative periods and aging (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ReportFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

impl ReportArgs {
    /// Both sections when neither flag is given.
    fn options(&self) -> ReportOptions {
        let both = !self.aging && !self.cash_flow;
        ReportOptions {
            aging: self.aging || both,
            cash_flow: self.cash_flow || both,
            horizon_days: self.horizon_days,
        }
    }
}

pub async fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let today = resolve_today(args.today);

    let invoices = load_invoices(&args.invoices).await?;

    let engine = ReportEngine::from_config(&config, today);
    let report = engine.run(&args.query, &invoices, args.options());

    let aging_warnings = report.aging_summary.iter().flat_map(|a| &a.warnings);
    let cash_flow_warnings = report.cash_flow.iter().flat_map(|c| &c.warnings);
    for warning in aging_warnings.chain(cash_flow_warnings) {
        warn!("{}", warning);
    }
    info!(
        "Report over {} of {} invoices",
        report.matching_invoices.len(),
        invoices.len()
    );

    let output = match args.format {
        ReportFormat::Json => serde_json::to_string_pretty(&report)?,
        ReportFormat::Text => format_text(&report),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(report: &Report<'_>) -> String {
    let mut output = format_filter_text(&report.filter);
    output.push_str(&format!(
        "\n\nMatching invoices: {}\n",
        report.matching_invoices.len()
    ));

    if let Some(aging) = &report.aging_summary {
        output.push('\n');
        output.push_str(&format_aging(aging));
    }

    if let Some(cash_flow) = &report.cash_flow {
        output.push('\n');
        output.push_str(&format_cash_flow(cash_flow));
    }

    output.trim_end().to_string()
}

fn format_aging(aging: &AgingSummary) -> String {
    let mut output = format!("Aging as of {}:\n", aging.as_of);

    for bucket in AgingBucket::ALL {
        let Some(summary) = aging.bucket(bucket) else {
            continue;
        };
        let totals = summary
            .total_by_currency
            .iter()
            .map(|(currency, total)| format!("{} {}", total, currency))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "  {:<8} {:>4}  {}\n",
            bucket.label(),
            summary.count,
            totals
        ));
    }

    if aging.missing_due_date > 0 {
        output.push_str(&format!(
            "  {} {} unsettled invoice(s) have no due date\n",
            style("ℹ").blue(),
            aging.missing_due_date
        ));
    }
    if aging.excluded_settled > 0 {
        output.push_str(&format!(
            "  {} {} paid or cancelled invoice(s) excluded\n",
            style("ℹ").blue(),
            aging.excluded_settled
        ));
    }
    for warning in &aging.warnings {
        output.push_str(&format!("  {} {}\n", style("!").yellow(), warning));
    }

    output
}

fn format_cash_flow(cash_flow: &CashFlowProjection) -> String {
    let mut output = format!(
        "Cash flow {} to {}: {} {}\n",
        cash_flow.as_of, cash_flow.horizon, cash_flow.total, cash_flow.reporting_currency
    );

    for (currency, subtotal) in &cash_flow.by_currency {
        output.push_str(&format!(
            "  {:<4} {:>4} invoice(s)  {} x {} = {} {}\n",
            currency,
            subtotal.count,
            subtotal.original,
            subtotal.rate,
            subtotal.converted,
            cash_flow.reporting_currency
        ));
    }

    if cash_flow.missing_due_date > 0 {
        output.push_str(&format!(
            "  {} {} pending invoice(s) have no due date\n",
            style("ℹ").blue(),
            cash_flow.missing_due_date
        ));
    }
    for warning in &cash_flow.warnings {
        output.push_str(&format!("  {} {}\n", style("!").yellow(), warning));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use invoq_core::models::filter::StructuredFilter;
    use invoq_core::models::invoice::InvoiceRecord;
    use invoq_core::report::ExchangeRateTable;
    use rust_decimal::Decimal;

    #[test]
    fn test_text_report_sections() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let invoices = vec![
            InvoiceRecord::new("1", "Barwon Health", Decimal::new(1000, 0))
                .with_currency("AUD")
                .with_due_date(today - Days::new(61)),
            InvoiceRecord::new("2", "Barwon Health", Decimal::new(40, 0))
                .with_currency("XYZ")
                .with_due_date(today),
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

        let text = format_text(&report);
        assert!(text.contains("Matching invoices: 2"));
        assert!(text.contains("Aging as of 2025-06-18:"));
        assert!(text.contains("Cash flow 2025-06-18 to 2025-07-18: 690.00 USD"));
        assert!(text.contains("no exchange rate for XYZ"));
    }
}
