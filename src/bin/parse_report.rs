//! Utility to parse a bureau XML file and print the canonical report as JSON.

use anyhow::Context;
use credit_report_api::parse_credit_report;
use std::env;

/// Main entry point for the parse utility.
///
/// Usage: `parse_report <report.xml>`
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_report_api=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: parse_report <report.xml>"))?;

    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", path))?;
    tracing::info!("Parsing {} ({} bytes)", path, bytes.len());

    let report = parse_credit_report(bytes)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
