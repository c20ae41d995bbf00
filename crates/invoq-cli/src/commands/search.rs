//! Search command - filter an invoice snapshot with a free-text query.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use invoq_core::evaluator;
use invoq_core::models::filter::StructuredFilter;
use invoq_core::models::invoice::InvoiceRecord;
use invoq_core::query::QueryCompiler;

use super::query::format_filter_text;
use super::{load_config, load_invoices, resolve_today};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query
    #[arg(required = true)]
    query: String,

    /// Invoice snapshot (JSON array or CSV)
    #[arg(short, long, required = true)]
    invoices: PathBuf,

    /// Reference date for relative periods (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct SearchResult<'a> {
    filter: &'a StructuredFilter,
    count: usize,
    invoices: &'a [&'a InvoiceRecord],
}

pub async fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let today = resolve_today(args.today);

    let invoices = load_invoices(&args.invoices).await?;

    let filter = QueryCompiler::from_config(&config.query, today).compile(&args.query);
    let matching = evaluator::apply(&filter, &invoices);
    info!("{} of {} invoices matched", matching.len(), invoices.len());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&SearchResult {
            filter: &filter,
            count: matching.len(),
            invoices: &matching,
        })?,
        OutputFormat::Csv => format_csv(&matching)?,
        OutputFormat::Text => format_text(&filter, &matching),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_csv(invoices: &[&InvoiceRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Write header
    wtr.write_record([
        "id",
        "client_name",
        "customer_contract",
        "invoice_type",
        "invoice_date",
        "due_date",
        "status",
        "amount_due",
        "currency",
        "payment_date",
    ])?;

    // Write data
    for invoice in invoices {
        wtr.write_record([
            invoice.id.clone(),
            invoice.client_name.clone(),
            invoice.customer_contract.clone().unwrap_or_default(),
            optional(invoice.invoice_type),
            optional(invoice.invoice_date),
            optional(invoice.due_date),
            invoice.status.to_string(),
            invoice.amount_due.to_string(),
            invoice.currency.clone(),
            optional(invoice.payment_date),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(filter: &StructuredFilter, invoices: &[&InvoiceRecord]) -> String {
    let mut output = format_filter_text(filter);
    output.push_str("\n\n");

    if invoices.is_empty() {
        output.push_str(&format!("{}", style("No matching invoices.").yellow()));
        return output;
    }

    output.push_str(&format!(
        "{} invoice(s) matched:\n",
        style(invoices.len()).bold()
    ));
    for invoice in invoices {
        output.push_str(&format!(
            "  {:<12} {:<28} {:<8} {:<11} {:<9} {:>12} {}\n",
            invoice.id,
            invoice.client_name,
            optional(invoice.invoice_type),
            optional(invoice.invoice_date),
            invoice.status,
            invoice.amount_due,
            invoice.currency,
        ));
    }

    output.trim_end().to_string()
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
