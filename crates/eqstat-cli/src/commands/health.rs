//! `eqstat health` command implementation

use crate::api::ApiClient;
use crate::error::Result;
use colored::Colorize;

/// Check server health
pub async fn run(server_url: Option<String>) -> Result<()> {
    let client = ApiClient::from_env_unauthenticated(server_url)?;

    if client.health_check().await? {
        println!("{} {}", "Server healthy:".green().bold(), client.base_url());
    } else {
        println!("{} {}", "Server unreachable:".red().bold(), client.base_url());
        std::process::exit(1);
    }

    Ok(())
}
