//! CDR product-reference API client.
//!
//! Each bank exposes `GET {base}/banking/products/{productId}` publicly (no
//! auth), versioned via the `x-v` header. Requests are retried a bounded
//! number of times with a linearly growing pause between attempts
//! (`attempt * 2s`); the schedule is inherited from the tracker this tool
//! replaced and is kept as-is for comparable behavior. Each attempt carries
//! its own 15 s timeout.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::AppError;

/// CDR product-reference API version sent as `x-v`.
pub const CDR_API_VERSION: &str = "4";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Raw `data` object of a CDR product detail response.
///
/// Everything is optional: banks disagree on which fields they populate and a
/// sparse payload must still yield a usable (if thin) snapshot entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductData {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub last_updated: Option<String>,
    pub lending_rates: Vec<RawLendingRate>,
}

/// One raw `lendingRates` item. Rates arrive as CDR `RateString`s (decimal
/// strings like `"0.0539"`), parsed downstream in `rates::extract`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLendingRate {
    pub lending_rate_type: Option<String>,
    pub rate: Option<String>,
    pub comparison_rate: Option<String>,
    pub repayment_type: Option<String>,
    pub loan_purpose: Option<String>,
    /// For FIXED rates this is an ISO-8601 duration such as `P3Y`.
    pub additional_value: Option<String>,
    pub additional_info: Option<String>,
    pub additional_info_uri: Option<String>,
    pub tiers: Vec<RawTier>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTier {
    pub name: Option<String>,
    pub minimum_value: Option<f64>,
    pub maximum_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    data: ProductData,
}

pub struct CdrClient {
    http: Client,
    max_attempts: u32,
}

impl CdrClient {
    pub fn new(max_attempts: u32, request_timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AppError::new(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Fetch one product's detail payload, retrying per the module schedule.
    pub fn fetch_product(&self, base_url: &str, product_id: &str) -> Result<ProductData, AppError> {
        let url = product_url(base_url, product_id)?;
        let response = fetch_with_retry(self.max_attempts, RETRY_DELAY, std::thread::sleep, || {
            self.get_product(&url)
        })?;
        Ok(response.data)
    }

    /// One attempt. The error is a plain message: the retry loop treats every
    /// failure cause the same, only the wording differs (timeout vs HTTP vs
    /// transport vs payload).
    fn get_product(&self, url: &Url) -> Result<ProductResponse, String> {
        let resp = self
            .http
            .get(url.clone())
            .header("x-v", CDR_API_VERSION)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(request_failure)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            ));
        }

        resp.json::<ProductResponse>().map_err(|e| {
            if e.is_timeout() {
                "Request timeout".to_string()
            } else {
                format!("Unexpected product payload: {e}")
            }
        })
    }
}

fn request_failure(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timeout".to_string()
    } else {
        e.to_string()
    }
}

/// Build `{base}/banking/products/{productId}` with the id percent-encoded.
pub fn product_url(base_url: &str, product_id: &str) -> Result<Url, AppError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::new(format!("Invalid base URL '{base_url}': {e}")))?;
    url.path_segments_mut()
        .map_err(|_| AppError::new(format!("Base URL cannot have segments appended: {base_url}")))?
        .pop_if_empty()
        .extend(["banking", "products", product_id]);
    Ok(url)
}

/// Run `attempt` up to `max_attempts` times, sleeping `retry_delay * n` after
/// the n-th failure. The sleep hook is injected so tests can record the
/// schedule instead of waiting it out.
///
/// Note the delay grows linearly (2s, 4s, 6s, ...), not exponentially.
pub fn fetch_with_retry<T>(
    max_attempts: u32,
    retry_delay: Duration,
    mut sleep: impl FnMut(Duration),
    mut attempt: impl FnMut() -> Result<T, String>,
) -> Result<T, AppError> {
    let max_attempts = max_attempts.max(1);
    let mut last_failure = String::new();

    for n in 1..=max_attempts {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(reason) => {
                last_failure = reason;
                if n < max_attempts {
                    sleep(retry_delay * n);
                }
            }
        }
    }

    Err(AppError::new(format!(
        "Failed after {max_attempts} attempts: {last_failure}"
    )))
}
