//! Daily ledger
//!
//! Per-date ordered log entries, mutated only through commands, with a
//! LIFO undo stack.

mod command;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::catalog::FoodCatalog;
use crate::models::LogEntry;

pub use command::Command;

/// Tolerance when matching fractional servings during undo
pub const SERVINGS_EPSILON: f64 = 1e-3;

/// Ledger error types. Every variant refuses the operation and leaves the
/// ledger unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid date '{0}'; expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid servings value {0}; must be positive")]
    InvalidServings(f64),

    #[error("Food not found: {0}")]
    UnknownFood(String),

    #[error("No log entry at index {index} for {date}")]
    InvalidIndex { date: String, index: usize },
}

/// Check a `YYYY-MM-DD` date string
pub fn is_valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Today's date as a `YYYY-MM-DD` string
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// The date-keyed store of logged consumption entries.
///
/// Entries are insertion-ordered within a date; the index is the addressing
/// scheme for deletion. Executed commands are retained on the undo stack,
/// latest on top.
#[derive(Debug, Default)]
pub struct DailyLedger {
    days: BTreeMap<String, Vec<LogEntry>>,
    undo_stack: Vec<Command>,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from loaded log records. The undo stack starts
    /// empty: history does not persist across sessions.
    pub fn from_days(days: BTreeMap<String, Vec<LogEntry>>) -> Self {
        Self {
            days,
            undo_stack: Vec::new(),
        }
    }

    /// Execute a command, record it for undo, and return its description
    pub fn apply(&mut self, command: Command) -> String {
        command.execute(&mut self.days);
        let description = command.describe();
        self.undo_stack.push(command);
        description
    }

    /// Undo the most recent command, returning its description, or `None`
    /// when there is nothing to undo
    pub fn undo_last(&mut self) -> Option<String> {
        let command = self.undo_stack.pop()?;
        command.undo(&mut self.days);
        Some(command.describe())
    }

    /// Construct and apply an add command
    pub fn add_entry(
        &mut self,
        catalog: &FoodCatalog,
        date: &str,
        food_name: &str,
        servings: f64,
    ) -> Result<String, LedgerError> {
        let command = Command::add_entry(catalog, date, food_name, servings)?;
        Ok(self.apply(command))
    }

    /// Construct and apply a delete command
    pub fn delete_entry(&mut self, date: &str, index: usize) -> Result<String, LedgerError> {
        let command = Command::delete_entry(self, date, index)?;
        Ok(self.apply(command))
    }

    /// Entries for a date in insertion order; empty if the date has none
    pub fn entries_for_date(&self, date: &str) -> &[LogEntry] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total snapshot calories logged for a date
    pub fn total_calories(&self, date: &str) -> f64 {
        self.entries_for_date(date).iter().map(|e| e.calories).sum()
    }

    /// Dates with at least one entry, in ascending order
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    pub fn has_entries(&self, date: &str) -> bool {
        self.days.contains_key(date)
    }

    /// Executed commands, latest first, for the undo-stack view
    pub fn history(&self) -> impl Iterator<Item = &Command> {
        self.undo_stack.iter().rev()
    }

    /// The full date-keyed entry map, for saving
    pub fn days(&self) -> &BTreeMap<String, Vec<LogEntry>> {
        &self.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Food;

    fn catalog() -> FoodCatalog {
        let mut catalog = FoodCatalog::new();
        catalog.add(Food::basic("Rice", vec![], 200.0)).unwrap();
        catalog.add(Food::basic("Beans", vec![], 150.0)).unwrap();
        catalog
    }

    #[test]
    fn test_add_entry_snapshots_calories() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();

        let description = ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.5)
            .unwrap();
        assert_eq!(
            description,
            "Add 1.5 serving(s) of Rice (300 calories) on 2024-01-01"
        );
        assert!((ledger.total_calories("2024-01-01") - 300.0).abs() < 1e-9);
        assert_eq!(ledger.entries_for_date("2024-01-01").len(), 1);
    }

    #[test]
    fn test_undo_add_removes_empty_date_key() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.5)
            .unwrap();

        let undone = ledger.undo_last();
        assert!(undone.is_some());
        assert!(!ledger.has_entries("2024-01-01"));
        assert_eq!(ledger.dates().count(), 0);
    }

    #[test]
    fn test_undo_add_matches_latest_with_tolerance() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.0)
            .unwrap();
        ledger
            .add_entry(&catalog, "2024-01-01", "Beans", 2.0)
            .unwrap();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.0)
            .unwrap();

        // Undo removes the latest Rice entry, not the first
        ledger.undo_last().unwrap();
        let entries = ledger.entries_for_date("2024-01-01");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].food_name, "Rice");
        assert_eq!(entries[1].food_name, "Beans");
    }

    #[test]
    fn test_delete_then_undo_restores_entry() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 2.0)
            .unwrap();

        let description = ledger.delete_entry("2024-01-01", 0).unwrap();
        assert_eq!(description, "Delete 2 serving(s) of Rice from 2024-01-01");
        assert!(!ledger.has_entries("2024-01-01"));

        ledger.undo_last().unwrap();
        let entries = ledger.entries_for_date("2024-01-01");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].food_name, "Rice");
        assert!((entries[0].calories - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_delete_undo_appends_at_end() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.0)
            .unwrap();
        ledger
            .add_entry(&catalog, "2024-01-01", "Beans", 1.0)
            .unwrap();

        ledger.delete_entry("2024-01-01", 0).unwrap();
        ledger.undo_last().unwrap();

        // Restored at the end, not at its original index
        let names: Vec<&str> = ledger
            .entries_for_date("2024-01-01")
            .iter()
            .map(|e| e.food_name.as_str())
            .collect();
        assert_eq!(names, vec!["Beans", "Rice"]);
    }

    #[test]
    fn test_undo_with_empty_stack_is_noop() {
        let mut ledger = DailyLedger::new();
        assert_eq!(ledger.undo_last(), None);
    }

    #[test]
    fn test_unknown_food_rejected() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        let err = ledger
            .add_entry(&catalog, "2024-01-01", "Pizza", 1.0)
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnknownFood(name) if name == "Pizza"));
        assert!(!ledger.has_entries("2024-01-01"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        for date in ["2024-13-01", "2024-02-30", "01-01-2024", "yesterday"] {
            let err = ledger.add_entry(&catalog, date, "Rice", 1.0).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidDate(_)), "{date}");
        }
        // Leap day is fine
        assert!(ledger.add_entry(&catalog, "2024-02-29", "Rice", 1.0).is_ok());
    }

    #[test]
    fn test_invalid_servings_rejected() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        for servings in [0.0, -1.0, f64::NAN] {
            let err = ledger
                .add_entry(&catalog, "2024-01-01", "Rice", servings)
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidServings(_)));
        }
    }

    #[test]
    fn test_invalid_index_rejected_without_state_change() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.0)
            .unwrap();

        let err = ledger.delete_entry("2024-01-01", 5).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidIndex { index: 5, .. }));
        let err = ledger.delete_entry("2024-01-02", 0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidIndex { index: 0, .. }));

        assert_eq!(ledger.entries_for_date("2024-01-01").len(), 1);
        // Failed deletes left nothing on the undo stack
        ledger.undo_last().unwrap();
        assert_eq!(ledger.undo_last(), None);
    }

    #[test]
    fn test_execute_then_undo_restores_observable_state() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.0)
            .unwrap();
        ledger
            .add_entry(&catalog, "2024-01-02", "Beans", 2.0)
            .unwrap();
        let before = ledger.days().clone();
        let total_before = ledger.total_calories("2024-01-01");

        ledger
            .add_entry(&catalog, "2024-01-01", "Beans", 1.0)
            .unwrap();
        ledger.undo_last().unwrap();

        assert_eq!(ledger.days(), &before);
        assert!((ledger.total_calories("2024-01-01") - total_before).abs() < 1e-9);
    }

    #[test]
    fn test_history_is_latest_first() {
        let catalog = catalog();
        let mut ledger = DailyLedger::new();
        ledger
            .add_entry(&catalog, "2024-01-01", "Rice", 1.0)
            .unwrap();
        ledger
            .add_entry(&catalog, "2024-01-01", "Beans", 1.0)
            .unwrap();

        let descriptions: Vec<String> = ledger.history().map(Command::describe).collect();
        assert_eq!(descriptions.len(), 2);
        assert!(descriptions[0].contains("Beans"));
        assert!(descriptions[1].contains("Rice"));
    }
}
