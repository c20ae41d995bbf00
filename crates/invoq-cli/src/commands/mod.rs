//! Subcommands and the helpers they share.

pub mod config;
pub mod query;
pub mod report;
pub mod search;

use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use invoq_core::models::config::InvoqConfig;
use invoq_core::models::invoice::InvoiceRecord;

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvoqConfig> {
    let path = config::resolve_config_path(config_path);

    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        InvoqConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else if config_path.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    } else {
        Ok(InvoqConfig::default())
    }
}

/// The reference date for relative periods and aging.
pub fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

/// Read an invoice snapshot. `.csv` files are read as CSV with a header row,
/// anything else as a JSON array.
pub async fn load_invoices(path: &Path) -> anyhow::Result<Vec<InvoiceRecord>> {
    if !path.exists() {
        anyhow::bail!("Invoice file not found: {}", path.display());
    }

    let content = tokio::fs::read_to_string(path).await?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let invoices = match extension.as_str() {
        "csv" => parse_csv(&content)
            .with_context(|| format!("Failed to parse CSV invoices in {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON invoices in {}", path.display()))?,
    };

    info!("Loaded {} invoices from {}", invoices.len(), path.display());

    Ok(invoices)
}

fn parse_csv(content: &str) -> anyhow::Result<Vec<InvoiceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut invoices = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        // Header is line 1
        let record: InvoiceRecord = row.with_context(|| format!("Invalid row at line {}", i + 2))?;
        invoices.push(record);
    }

    Ok(invoices)
}
