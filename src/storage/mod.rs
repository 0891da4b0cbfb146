//! Flat-file storage
//!
//! Reads and writes the food database and daily logs as pretty-printed
//! JSON. The food database is an array of tagged food records; the log
//! file maps date strings to entry arrays. Both formats match the files
//! written by the original tool.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::{FoodRecord, LogEntry};

/// Storage error types. Malformed record shapes are structural: they fail
/// the whole load.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Load flat food records. A missing file is an empty database, not an
/// error.
pub fn load_food_records(path: &Path) -> StorageResult<Vec<FoodRecord>> {
    if !path.exists() {
        tracing::info!("No food database at {}; starting empty", path.display());
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path)?;
    let records: Vec<FoodRecord> = serde_json::from_str(&contents)?;
    tracing::info!("Loaded {} food records from {}", records.len(), path.display());
    Ok(records)
}

/// Save flat food records, pretty-printed
pub fn save_food_records(path: &Path, records: &[FoodRecord]) -> StorageResult<()> {
    let contents = serde_json::to_string_pretty(records)?;
    fs::write(path, contents)?;
    tracing::info!("Saved {} food records to {}", records.len(), path.display());
    Ok(())
}

/// Load the per-date logs. A missing file is an empty ledger.
pub fn load_logs(path: &Path) -> StorageResult<BTreeMap<String, Vec<LogEntry>>> {
    if !path.exists() {
        tracing::info!("No log file at {}; starting empty", path.display());
        return Ok(BTreeMap::new());
    }
    let contents = fs::read_to_string(path)?;
    let days: BTreeMap<String, Vec<LogEntry>> = serde_json::from_str(&contents)?;
    tracing::info!("Loaded logs for {} days from {}", days.len(), path.display());
    Ok(days)
}

/// Save the per-date logs, pretty-printed
pub fn save_logs(path: &Path, days: &BTreeMap<String, Vec<LogEntry>>) -> StorageResult<()> {
    let contents = serde_json::to_string_pretty(days)?;
    fs::write(path, contents)?;
    tracing::info!("Saved logs for {} days to {}", days.len(), path.display());
    Ok(())
}
