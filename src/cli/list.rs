//! `orphanmap list`: one fetch of the listing, printed to stdout.

use crate::api::{ApiClient, OrphanageApi};
use crate::components::footer::counter_label;
use crate::config::Config;
use crate::models::LocationRecord;
use anyhow::{Context, Result};
use tokio::runtime::Runtime;

pub fn run(config: &Config, json: bool) -> Result<()> {
    let api = ApiClient::new(&config.api).context("Failed to create API client")?;
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    let records = runtime
        .block_on(api.list_orphanages())
        .with_context(|| format!("Failed to fetch orphanages from {}", api.base_url()))?;

    print!("{}", format_listing(&records, json)?);
    Ok(())
}

/// Render the records in server order, followed by the counter line
pub fn format_listing(records: &[LocationRecord], json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(records).context("Failed to encode JSON")?;
        out.push('\n');
        return Ok(out);
    }

    let id_width = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{:>width$}  {}  ({:.6}, {:.6})\n",
            record.id,
            record.name,
            record.latitude,
            record.longitude,
            width = id_width
        ));
    }
    out.push_str(&counter_label(records.len()));
    out.push('\n');
    Ok(out)
}
