//! Rate normalization: raw CDR payloads → flat entries → nested summary.

pub mod extract;
pub mod summary;

pub use extract::extract_lending_rates;
pub use summary::summarize_rates;
