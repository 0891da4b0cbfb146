//! Food Diary
//!
//! Interactive terminal tracker for foods and per-day consumption logs.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use food_diary::catalog::resolve_catalog;
use food_diary::cli::DiaryCli;
use food_diary::ledger::DailyLedger;
use food_diary::{build_info, storage};

/// Food database path: first CLI argument, then env var, then default
fn get_food_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOOD_DIARY_DATABASE").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("food_database.json"))
}

/// Log file path: second CLI argument, then env var, then default
fn get_log_path() -> PathBuf {
    std::env::args()
        .nth(2)
        .or_else(|| std::env::var("FOOD_DIARY_LOG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("food_log.json"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so the menu output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("food_diary=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let food_path = get_food_path();
    let log_path = get_log_path();
    eprintln!("Food database: {}", food_path.display());
    eprintln!("Log file: {}", log_path.display());

    // Malformed files abort here; dangling references only warn
    let records = storage::load_food_records(&food_path)?;
    let (catalog, diagnostics) = resolve_catalog(records);
    for diagnostic in &diagnostics {
        tracing::warn!("{diagnostic}");
    }
    eprintln!("Loaded {} foods.", catalog.len());

    let ledger = DailyLedger::from_days(storage::load_logs(&log_path)?);

    let mut cli = DiaryCli::new(catalog, ledger, food_path, log_path);
    cli.run()?;

    Ok(())
}
