//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Leadpipe: bulk lead importer for tabular CRM exports
#[derive(Parser)]
#[command(name = "leadpipe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a lead export file into the lead store
    Import {
        /// Path to the export file (comma-delimited text)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Leads committed per chunk
        #[arg(long, default_value_t = leadpipe::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Owner id stamped on every created lead
        #[arg(long)]
        owner: Option<String>,

        /// Lead store base URL (default: LEADPIPE_STORE_URL)
        #[arg(long)]
        store_url: Option<String>,

        /// Run the whole pipeline against an in-memory store
        #[arg(long)]
        dry_run: bool,

        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },
}
