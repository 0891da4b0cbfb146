//! Food Diary library
//!
//! Core functionality for the food catalog (basic and composite foods,
//! graph resolution, search) and the reversible daily consumption log.

pub mod build_info;
pub mod catalog;
pub mod cli;
pub mod ledger;
pub mod models;
pub mod storage;
