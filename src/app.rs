//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the crawl pipeline
//! - writes the snapshot
//! - prints the run summary

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::cli::{Command, FetchArgs, ShowArgs};
use crate::data::banks::select_banks;
use crate::data::cdr::CdrClient;
use crate::error::AppError;
use crate::report::format;

pub mod pipeline;

/// Entry point for the `rates` binary.
pub fn run() -> Result<(), AppError> {
    // Optional .env for things like RATES_OUT; absence is fine.
    dotenvy::dotenv().ok();

    // We want a bare `rates` (and `rates -b CBA`) to behave like `rates fetch`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fetch(args) => handle_fetch(args),
        Command::Banks => handle_banks(),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_fetch(args: FetchArgs) -> Result<(), AppError> {
    let banks = select_banks(&args.banks)?;
    let client = CdrClient::new(args.max_retries, Duration::from_secs(args.timeout_secs))?;
    let opts = pipeline::CrawlOptions {
        bank_delay: Duration::from_millis(args.delay_ms),
        verbose: !args.quiet,
    };

    println!("{}", format::format_run_header());
    let report = pipeline::run_crawl(&client, &banks, &opts);

    // The write happens only after the full loop completes, so a crash
    // mid-crawl never leaves a truncated snapshot behind.
    let out = resolve_output_path(args.out);
    crate::io::write_report_json(&out, &report)?;

    println!("{}", format::format_run_summary(&report, &out));
    Ok(())
}

fn handle_banks() -> Result<(), AppError> {
    let banks = select_banks(&[])?;
    println!("{}", format::format_bank_table(&banks));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let report = crate::io::read_report_json(&args.snapshot)?;
    println!("{}", format::format_run_summary(&report, &args.snapshot));
    Ok(())
}

/// CLI flag wins, then $RATES_OUT, then the conventional default.
fn resolve_output_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os("RATES_OUT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data/rates.json"))
}

/// Rewrite argv so `rates` defaults to `rates fetch`.
///
/// Rules:
/// - `rates`                       -> `rates fetch`
/// - `rates -b CBA ...`            -> `rates fetch -b CBA ...`
/// - `rates --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fetch".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fetch" | "banks" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fetch flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fetch".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
