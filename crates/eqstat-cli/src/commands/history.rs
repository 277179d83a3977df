//! `eqstat history` command implementation
//!
//! Lists the stored datasets, newest first.

use crate::api::ApiClient;
use crate::error::Result;
use crate::output;
use colored::Colorize;

/// List the stored datasets
pub async fn run(server_url: Option<String>) -> Result<()> {
    let client = ApiClient::from_env(server_url)?;
    let datasets = client.history().await?;

    if datasets.is_empty() {
        println!("No datasets stored.");
        println!("Run 'eqstat upload <file.csv>' to upload one.");
        return Ok(());
    }

    println!("{}", "Stored datasets (newest first):".cyan().bold());
    println!("{}", output::history_table(&datasets));

    Ok(())
}
