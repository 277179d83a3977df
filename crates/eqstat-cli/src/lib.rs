//! Eqstat CLI Library
//!
//! A thin HTTP caller for the eqstat server: uploads CSV files, lists the
//! stored datasets, and downloads PDF reports, rendering results as terminal
//! tables.

pub mod api;
pub mod commands;
pub mod error;
pub mod output;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the eqstat server
#[derive(Debug, Parser)]
#[command(name = "eqstat", version, about = "Upload equipment CSV files and fetch summaries and reports")]
pub struct Cli {
    /// Server URL (defaults to EQSTAT_SERVER_URL or http://localhost:8000)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Upload a CSV file and print its summary
    Upload {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// List the stored datasets, newest first
    History,

    /// Download the PDF report for a dataset
    Report {
        /// Dataset identifier
        id: i64,

        /// Output path (defaults to report_<id>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check server health
    Health,
}
