//! Command-line parsing for the CDR rate fetcher.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch/summarize code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::data::cdr::{DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rates", version, about = "CDR Open Banking home-loan rate fetcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crawl the bank registry and write a rates snapshot JSON.
    Fetch(FetchArgs),
    /// List the configured banks and their tracked products.
    Banks,
    /// Print the summary of a previously written snapshot.
    Show(ShowArgs),
}

/// Options for the crawl.
#[derive(Debug, Parser, Clone)]
pub struct FetchArgs {
    /// Output path for the snapshot (default: data/rates.json, or $RATES_OUT).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Crawl only the named bank keys (repeatable, e.g. -b CBA -b ING).
    #[arg(short = 'b', long = "bank")]
    pub banks: Vec<String>,

    /// Maximum attempts per product request.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_retries: u32,

    /// Per-attempt request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Pause between banks in milliseconds.
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Suppress per-product progress lines.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options for showing a saved snapshot.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Snapshot JSON produced by `rates fetch`.
    #[arg(default_value = "data/rates.json")]
    pub snapshot: PathBuf,
}
