//! Snapshot file I/O.

pub mod snapshot;

pub use snapshot::{read_report_json, write_report_json};
