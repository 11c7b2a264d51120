//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fetch/summarize code stays clean and testable
//! - output changes are localized (the console output is for humans, not a
//!   machine-readable contract)

use std::path::Path;

use crate::data::banks::BankConfig;
use crate::report::FetchReport;

pub fn format_run_header() -> String {
    "=== CDR Open Banking Rate Fetcher ===\n".to_string()
}

/// Final run summary: success ratios, per-error lines, output location.
pub fn format_run_summary(report: &FetchReport, output: &Path) -> String {
    let mut out = String::new();

    out.push_str("=== Summary ===\n");
    out.push_str(&format!(
        "Banks: {}/{} successful\n",
        report.stats.success_banks, report.stats.total_banks
    ));
    out.push_str(&format!(
        "Products: {}/{} successful\n",
        report.stats.success_products, report.stats.total_products
    ));

    if !report.errors.is_empty() {
        out.push_str(&format!("\n{} error(s):\n", report.errors.len()));
        for err in &report.errors {
            out.push_str(&format!("- {} / {}: {}\n", err.bank, err.product, err.error));
        }
    }

    out.push_str(&format!("\nRates saved to {}\n", output.display()));
    out.push_str(&format!("Fetched at: {} AEST\n", report.fetched_at_aest));

    out
}

/// Registry listing for the `banks` subcommand.
pub fn format_bank_table(banks: &[&BankConfig]) -> String {
    let mut out = String::new();
    out.push_str("Configured banks:\n");
    for bank in banks {
        out.push_str(&format!(
            "{:<10} {:<26} {} products\n",
            bank.key,
            bank.display_name,
            bank.products.len()
        ));
        for product in bank.products {
            out.push_str(&format!("           - {} ({})\n", product.name, product.id));
        }
    }
    out
}
