//! Log commands
//!
//! Reversible mutations over the daily ledger. A closed variant set rather
//! than a trait hierarchy: each variant captures at construction everything
//! needed to apply and exactly reverse its effect.

use std::collections::BTreeMap;

use crate::catalog::FoodCatalog;
use crate::models::LogEntry;

use super::{is_valid_date, DailyLedger, LedgerError, SERVINGS_EPSILON};

/// A reversible ledger mutation
#[derive(Debug, Clone)]
pub enum Command {
    /// Append a snapshot entry to a date's log
    AddEntry { date: String, entry: LogEntry },
    /// Remove the entry at `index`; `removed` is the captured copy for undo
    DeleteEntry {
        date: String,
        index: usize,
        removed: LogEntry,
    },
}

impl Command {
    /// Build an add command, snapshotting calories from the catalog.
    ///
    /// Unknown foods are rejected here rather than producing an inert
    /// zero-calorie entry.
    pub fn add_entry(
        catalog: &FoodCatalog,
        date: &str,
        food_name: &str,
        servings: f64,
    ) -> Result<Self, LedgerError> {
        if !is_valid_date(date) {
            return Err(LedgerError::InvalidDate(date.to_string()));
        }
        if !servings.is_finite() || servings <= 0.0 {
            return Err(LedgerError::InvalidServings(servings));
        }
        let food = catalog
            .lookup(food_name)
            .ok_or_else(|| LedgerError::UnknownFood(food_name.to_string()))?;
        let calories = food.calories() * servings;
        Ok(Command::AddEntry {
            date: date.to_string(),
            entry: LogEntry::new(food_name, servings, calories),
        })
    }

    /// Build a delete command, capturing the entry at `index` so undo can
    /// restore it after removal.
    pub fn delete_entry(
        ledger: &DailyLedger,
        date: &str,
        index: usize,
    ) -> Result<Self, LedgerError> {
        let entries = ledger.entries_for_date(date);
        let removed = entries
            .get(index)
            .cloned()
            .ok_or_else(|| LedgerError::InvalidIndex {
                date: date.to_string(),
                index,
            })?;
        Ok(Command::DeleteEntry {
            date: date.to_string(),
            index,
            removed,
        })
    }

    /// Apply the command's effect
    pub(super) fn execute(&self, days: &mut BTreeMap<String, Vec<LogEntry>>) {
        match self {
            Command::AddEntry { date, entry } => {
                days.entry(date.clone()).or_default().push(entry.clone());
            }
            Command::DeleteEntry { date, index, .. } => {
                if let Some(entries) = days.get_mut(date) {
                    if *index < entries.len() {
                        entries.remove(*index);
                    }
                    if entries.is_empty() {
                        days.remove(date);
                    }
                }
            }
        }
    }

    /// Reverse exactly the effect of the most recent `execute`.
    ///
    /// Not idempotent; the ledger only calls this when popping the command
    /// off the undo stack.
    pub(super) fn undo(&self, days: &mut BTreeMap<String, Vec<LogEntry>>) {
        match self {
            Command::AddEntry { date, entry } => {
                if let Some(entries) = days.get_mut(date) {
                    // Remove the latest entry matching both food and servings
                    // (within tolerance, for fractional servings)
                    let position = entries.iter().rposition(|e| {
                        e.food_name == entry.food_name
                            && (e.servings - entry.servings).abs() < SERVINGS_EPSILON
                    });
                    if let Some(position) = position {
                        entries.remove(position);
                    }
                    if entries.is_empty() {
                        days.remove(date);
                    }
                }
            }
            Command::DeleteEntry { date, removed, .. } => {
                // Re-appends at the end: positional order is not restored if
                // other entries changed in between
                days.entry(date.clone()).or_default().push(removed.clone());
            }
        }
    }

    /// Human-readable summary for audit display
    pub fn describe(&self) -> String {
        match self {
            Command::AddEntry { date, entry } => format!(
                "Add {} serving(s) of {} ({} calories) on {}",
                entry.servings, entry.food_name, entry.calories, date
            ),
            Command::DeleteEntry { date, removed, .. } => format!(
                "Delete {} serving(s) of {} from {}",
                removed.servings, removed.food_name, date
            ),
        }
    }
}
