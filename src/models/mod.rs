//! Data models
//!
//! Rust structs for foods, raw food records, and log entries.

mod food;
mod log_entry;

pub use food::{Component, ComponentRecord, Food, FoodKind, FoodRecord};
pub use log_entry::LogEntry;
