//! Query command - compile a free-text query and show the detected filters.

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::debug;

use invoq_core::models::filter::StructuredFilter;
use invoq_core::query::QueryCompiler;

use super::{load_config, resolve_today};

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// Free-text query, e.g. "overdue maintenance invoices for Barwon Health"
    #[arg(required = true)]
    query: String,

    /// Reference date for relative periods (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: FilterFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FilterFormat {
    /// JSON output
    Json,
    /// Detected filters, one per line
    Text,
}

pub async fn run(args: QueryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let today = resolve_today(args.today);

    let compiler = QueryCompiler::from_config(&config.query, today);
    let filter = compiler.compile(&args.query);
    debug!("Compiled {:?} against {}", args.query, today);

    println!("{}", format_filter(&filter, args.format)?);

    Ok(())
}

/// Render a filter for display.
pub fn format_filter(filter: &StructuredFilter, format: FilterFormat) -> anyhow::Result<String> {
    match format {
        FilterFormat::Json => Ok(serde_json::to_string_pretty(filter)?),
        FilterFormat::Text => Ok(format_filter_text(filter)),
    }
}

pub fn format_filter_text(filter: &StructuredFilter) -> String {
    if filter.is_empty() {
        return format!(
            "{} No filters detected, all invoices match.",
            style("ℹ").blue()
        );
    }

    let mut output = String::from("Detected filters:\n");
    for line in filter.describe() {
        output.push_str(&format!("  {}\n", line));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoq_core::models::invoice::InvoiceType;

    #[test]
    fn test_text_lists_each_field() {
        let filter = StructuredFilter {
            client: Some("barwon health".to_string()),
            invoice_type: Some(InvoiceType::Maintenance),
            ..Default::default()
        };

        let text = format_filter_text(&filter);
        assert!(text.starts_with("Detected filters:"));
        assert!(text.contains("  Client: barwon health"));
        assert!(text.contains("  Type: Maint"));
    }

    #[test]
    fn test_text_for_empty_filter() {
        let text = format_filter_text(&StructuredFilter::default());
        assert!(text.contains("No filters detected"));
    }

    #[test]
    fn test_json_omits_missing_fields() {
        let filter = StructuredFilter {
            contract: Some("527995".to_string()),
            ..Default::default()
        };
        let json = format_filter(&filter, FilterFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"contract": "527995"}));
    }
}
