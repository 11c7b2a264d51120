//! The run report: everything one crawl learned, success and failure alike.
//!
//! The report is built wholly in memory and written once at the end of the
//! run; nothing persists between runs. Bank and product maps are insertion
//! ordered so the snapshot diffs cleanly from run to run.

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{RateEntry, RateSummary};

pub mod format;

const AEST_OFFSET_SECS: i32 = 10 * 3600;

/// Top-level aggregate written to `data/rates.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReport {
    pub fetched_at: DateTime<Utc>,
    #[serde(rename = "fetchedAtAEST")]
    pub fetched_at_aest: String,
    pub banks: IndexMap<String, BankResult>,
    pub errors: Vec<ErrorEntry>,
    pub stats: RunStats,
}

impl FetchReport {
    pub fn new(at: DateTime<Utc>, total_banks: usize) -> Self {
        Self {
            fetched_at: at,
            fetched_at_aest: aest_timestamp(at),
            banks: IndexMap::new(),
            errors: Vec::new(),
            stats: RunStats {
                total_banks,
                ..RunStats::default()
            },
        }
    }
}

/// One bank's slice of the report.
///
/// `success` is false only when every attempted product under the bank
/// failed; a bank with partial failures still counts as successful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankResult {
    pub display_name: String,
    pub products: IndexMap<String, ProductResult>,
    pub fetched_at: DateTime<Utc>,
    pub success: bool,
}

impl BankResult {
    /// A bank failed outright when it had products and all of them errored.
    pub fn all_products_failed(&self) -> bool {
        !self.products.is_empty() && self.products.values().all(ProductResult::is_error)
    }
}

/// Success-or-error per product. Serialized untagged so the snapshot carries
/// either the rate data or an `{error, productId}` object, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductResult {
    Rates(Box<ProductRates>),
    Error(ProductError),
}

impl ProductResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ProductResult::Error(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRates {
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,
    pub last_updated: Option<String>,
    pub rates: Vec<RateEntry>,
    pub summary: RateSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductError {
    pub error: String,
    pub product_id: String,
}

/// Flat record of a product failure, for the report's global error list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    pub bank: String,
    pub product: String,
    pub product_id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub total_banks: usize,
    pub success_banks: usize,
    pub failed_banks: usize,
    pub total_products: usize,
    pub success_products: usize,
    pub failed_products: usize,
}

/// Render an instant at the fixed AEST offset (UTC+10).
pub fn aest_timestamp(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(AEST_OFFSET_SECS) {
        Some(offset) => at
            .with_timezone(&offset)
            .format("%d/%m/%Y %H:%M:%S")
            .to_string(),
        None => at.to_rfc3339(),
    }
}
