//! Log entry model
//!
//! Represents one logged consumption within a day.

use serde::{Deserialize, Serialize};

/// A logged food consumption.
///
/// Calories are captured at insertion time, not recomputed later: edits to
/// a food definition never change historical log totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "food")]
    pub food_name: String,
    pub servings: f64,
    pub calories: f64,
}

impl LogEntry {
    pub fn new(food_name: impl Into<String>, servings: f64, calories: f64) -> Self {
        Self {
            food_name: food_name.into(),
            servings,
            calories,
        }
    }
}
