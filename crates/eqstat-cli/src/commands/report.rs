//! `eqstat report` command implementation
//!
//! Downloads the one-page PDF report for a dataset.

use crate::api::ApiClient;
use crate::error::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Download the PDF report for a dataset
pub async fn run(server_url: Option<String>, id: i64, output: Option<PathBuf>) -> Result<()> {
    let client = ApiClient::from_env(server_url)?;
    let bytes = client.report(id).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("report_{id}.pdf")));
    tokio::fs::write(&path, &bytes).await?;

    println!(
        "{} report for dataset {} to {} ({} bytes)",
        "Saved".green().bold(),
        id,
        path.display(),
        bytes.len()
    );

    Ok(())
}
