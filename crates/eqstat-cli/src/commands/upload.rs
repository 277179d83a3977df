//! `eqstat upload` command implementation
//!
//! Uploads a CSV file and prints the computed summary, the equipment type
//! distribution, and the row preview.

use crate::api::ApiClient;
use crate::error::{CliError, Result};
use crate::output;
use colored::Colorize;
use std::path::PathBuf;

/// Upload a CSV file and print its summary
pub async fn run(server_url: Option<String>, file: PathBuf) -> Result<()> {
    if !file.is_file() {
        return Err(CliError::FileNotFound(file.display().to_string()));
    }

    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.csv".to_string());
    let content = tokio::fs::read(&file).await?;

    let client = ApiClient::from_env(server_url)?;
    let receipt = client.upload(&filename, content).await?;

    println!(
        "{} dataset {} ({} rows)",
        "Uploaded".green().bold(),
        receipt.id,
        receipt.summary.total_count
    );
    println!();

    println!("{}", "Summary:".cyan().bold());
    println!("{}", output::summary_table(&receipt.summary));
    println!();

    println!("{}", "Type distribution:".cyan().bold());
    println!("{}", output::distribution_table(&receipt.type_distribution));
    println!();

    println!(
        "{} (first {} rows)",
        "Preview:".cyan().bold(),
        receipt.preview.rows.len()
    );
    println!("{}", output::preview_table(&receipt.preview));

    Ok(())
}
