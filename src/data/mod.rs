//! External data: the static bank registry and the CDR HTTP client.

pub mod banks;
pub mod cdr;

pub use banks::{BANKS, BankConfig, Product, select_banks};
pub use cdr::{CdrClient, ProductData};
