//! The crawl pipeline: registry → fetch → extract → summarize → report.
//!
//! The crawl is strictly sequential: banks in registry order, products in
//! definition order, one request in flight at a time, with a polite pause
//! between banks. Per-product failures are recorded and never abort the run;
//! the report leaves this function complete, ready to be written.

use std::time::Duration;

use chrono::Utc;
use indexmap::IndexMap;

use crate::data::banks::BankConfig;
use crate::data::cdr::{CdrClient, ProductData};
use crate::error::AppError;
use crate::rates::{extract_lending_rates, summarize_rates};
use crate::report::{
    BankResult, ErrorEntry, FetchReport, ProductError, ProductRates, ProductResult,
};

/// Where product payloads come from. The production impl is `CdrClient`;
/// tests substitute a canned source.
pub trait ProductSource {
    fn fetch_product(&self, base_url: &str, product_id: &str) -> Result<ProductData, AppError>;
}

impl ProductSource for CdrClient {
    fn fetch_product(&self, base_url: &str, product_id: &str) -> Result<ProductData, AppError> {
        CdrClient::fetch_product(self, base_url, product_id)
    }
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Pause after each bank (rate-limit politeness, not correctness).
    pub bank_delay: Duration,
    /// Echo progress lines to stdout.
    pub verbose: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            bank_delay: Duration::from_millis(500),
            verbose: true,
        }
    }
}

/// Crawl every product of every bank and aggregate the results.
///
/// Invariant: each attempted product lands exactly once in its bank's product
/// map, as rate data or as an error object.
pub fn run_crawl(
    source: &impl ProductSource,
    banks: &[&BankConfig],
    opts: &CrawlOptions,
) -> FetchReport {
    let mut report = FetchReport::new(Utc::now(), banks.len());

    for bank in banks {
        if opts.verbose {
            println!("Fetching {} ({})...", bank.key, bank.display_name);
        }

        let mut bank_result = BankResult {
            display_name: bank.display_name.to_string(),
            products: IndexMap::new(),
            fetched_at: Utc::now(),
            success: true,
        };

        for product in bank.products {
            report.stats.total_products += 1;
            if opts.verbose {
                println!("  -> {} ({})", product.name, product.id);
            }

            match fetch_product_rates(source, bank.base_url, product.id) {
                Ok(rates) => {
                    if opts.verbose {
                        println!("  ok {}: {} rate entries", rates.name, rates.rates.len());
                    }
                    report.stats.success_products += 1;
                    bank_result
                        .products
                        .insert(product.name.to_string(), ProductResult::Rates(Box::new(rates)));
                }
                Err(err) => {
                    if opts.verbose {
                        println!("  FAILED {}: {err}", product.name);
                    }
                    report.stats.failed_products += 1;
                    bank_result.products.insert(
                        product.name.to_string(),
                        ProductResult::Error(ProductError {
                            error: err.message().to_string(),
                            product_id: product.id.to_string(),
                        }),
                    );
                    report.errors.push(ErrorEntry {
                        bank: bank.key.to_string(),
                        product: product.name.to_string(),
                        product_id: product.id.to_string(),
                        error: err.message().to_string(),
                    });
                }
            }
        }

        if bank_result.all_products_failed() {
            bank_result.success = false;
            report.stats.failed_banks += 1;
        } else {
            report.stats.success_banks += 1;
        }

        report.banks.insert(bank.key.to_string(), bank_result);
        if opts.verbose {
            println!();
        }

        if !opts.bank_delay.is_zero() {
            std::thread::sleep(opts.bank_delay);
        }
    }

    report
}

/// Fetch one product and normalize it into its report entry.
fn fetch_product_rates(
    source: &impl ProductSource,
    base_url: &str,
    product_id: &str,
) -> Result<ProductRates, AppError> {
    let payload = source.fetch_product(base_url, product_id)?;
    let rates = extract_lending_rates(&payload);
    let summary = summarize_rates(&rates);

    Ok(ProductRates {
        product_id: payload.product_id.unwrap_or_else(|| product_id.to_string()),
        name: payload.name.unwrap_or_else(|| product_id.to_string()),
        description: payload.description,
        last_updated: payload.last_updated,
        rates,
        summary,
    })
}
