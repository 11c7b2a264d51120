//! Read/write the rates snapshot JSON.
//!
//! The snapshot is the "portable" output of a crawl: the full `FetchReport`,
//! pretty-printed so diffs and manual inspection stay pleasant. The write
//! happens once, after the whole crawl; a fatal mid-run error therefore never
//! leaves a partial file behind.

use std::fs::{self, File};
use std::path::Path;

use crate::error::AppError;
use crate::report::FetchReport;

/// Write the report, creating the parent directory if needed.
pub fn write_report_json(path: &Path, report: &FetchReport) -> Result<(), AppError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::new(format!("Failed to create output dir '{}': {e}", dir.display()))
            })?;
        }
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(format!("Failed to create snapshot '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(format!("Failed to write snapshot JSON: {e}")))?;

    Ok(())
}

/// Read a previously written snapshot.
pub fn read_report_json(path: &Path) -> Result<FetchReport, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(format!("Failed to open snapshot '{}': {e}", path.display())))?;
    let report: FetchReport = serde_json::from_reader(file)
        .map_err(|e| AppError::new(format!("Invalid snapshot JSON: {e}")))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn snapshot_round_trips_through_a_nested_dir() {
        let dir = std::env::temp_dir().join(format!(
            "cdr-rates-test-{}-{}",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or(0)
        ));
        let path = dir.join("data").join("rates.json");

        let report = FetchReport::new(Utc::now(), 3);
        write_report_json(&path, &report).unwrap();

        let loaded = read_report_json(&path).unwrap();
        assert_eq!(loaded.stats.total_banks, 3);
        assert_eq!(loaded.fetched_at_aest, report.fetched_at_aest);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn reading_a_missing_snapshot_fails_with_the_path() {
        let err = read_report_json(Path::new("/nonexistent/rates.json")).unwrap_err();
        assert!(err.message().contains("/nonexistent/rates.json"));
    }
}
