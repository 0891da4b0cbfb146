//! Food catalog
//!
//! Name-keyed repository over the resolved food graph, with lookup and
//! keyword search.

mod resolver;

use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

use crate::models::{Food, FoodRecord};

pub use resolver::{resolve_catalog, Diagnostic};

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("A food named '{0}' already exists")]
    DuplicateName(String),

    #[error("Food name must not be empty")]
    EmptyName,
}

/// How multi-keyword search combines its keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every keyword must match the food
    All,
    /// At least one keyword must match the food
    Any,
}

/// The resolved food collection, keyed by unique name.
///
/// Backed by a `BTreeMap` so listing output is deterministic and ordered
/// by name.
#[derive(Debug, Default)]
pub struct FoodCatalog {
    foods: BTreeMap<String, Rc<Food>>,
}

impl FoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a food, rejecting duplicate or empty names
    pub fn add(&mut self, food: Food) -> Result<Rc<Food>, CatalogError> {
        if food.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.foods.contains_key(&food.name) {
            return Err(CatalogError::DuplicateName(food.name));
        }
        let food = Rc::new(food);
        self.foods.insert(food.name.clone(), Rc::clone(&food));
        Ok(food)
    }

    /// Look up a food by exact name
    pub fn lookup(&self, name: &str) -> Option<&Rc<Food>> {
        self.foods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.foods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Iterate foods in name order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Food>> {
        self.foods.values()
    }

    /// Search foods by keywords, case-insensitively.
    ///
    /// A keyword matches a food if it is a substring of the lowercased name
    /// or of any lowercased food keyword. `MatchMode::All` requires every
    /// keyword to match; `MatchMode::Any` requires at least one. Results
    /// come back in name order.
    pub fn search(&self, keywords: &[String], mode: MatchMode) -> Vec<Rc<Food>> {
        self.foods
            .values()
            .filter(|food| match mode {
                MatchMode::All => keywords.iter().all(|k| food.matches_keyword(k)),
                MatchMode::Any => keywords.iter().any(|k| food.matches_keyword(k)),
            })
            .cloned()
            .collect()
    }

    /// Flatten the catalog back into raw records for saving, in name order
    pub fn to_records(&self) -> Vec<FoodRecord> {
        self.foods.values().map(|food| food.to_record()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Component;

    fn sample_catalog() -> FoodCatalog {
        let mut catalog = FoodCatalog::new();
        let rice = catalog
            .add(Food::basic("Rice", vec!["grain".to_string()], 200.0))
            .unwrap();
        let beans = catalog
            .add(Food::basic(
                "Black Beans",
                vec!["legume".to_string(), "protein".to_string()],
                150.0,
            ))
            .unwrap();
        catalog
            .add(Food::composite(
                "Burrito",
                vec!["mexican".to_string(), "wrap".to_string()],
                vec![Component::new(rice, 2.0), Component::new(beans, 1.0)],
            ))
            .unwrap();
        catalog
    }

    #[test]
    fn test_lookup_by_exact_name() {
        let catalog = sample_catalog();
        assert!(catalog.lookup("Rice").is_some());
        assert!(catalog.lookup("rice").is_none());
        assert!(catalog.lookup("Pizza").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = sample_catalog();
        let err = catalog
            .add(Food::basic("Rice", vec![], 100.0))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(name) if name == "Rice"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut catalog = FoodCatalog::new();
        let err = catalog.add(Food::basic("", vec![], 100.0)).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyName));
    }

    #[test]
    fn test_iteration_is_name_ordered() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Black Beans", "Burrito", "Rice"]);
    }

    #[test]
    fn test_search_any_mode() {
        let catalog = sample_catalog();
        let results = catalog.search(
            &["grain".to_string(), "legume".to_string()],
            MatchMode::Any,
        );
        let names: Vec<&str> = results.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Black Beans", "Rice"]);
    }

    #[test]
    fn test_search_all_mode() {
        let catalog = sample_catalog();
        // "Black Beans" matches both "bean" (name) and "protein" (keyword)
        let results = catalog.search(
            &["bean".to_string(), "protein".to_string()],
            MatchMode::All,
        );
        let names: Vec<&str> = results.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Black Beans"]);

        // No single food matches both
        let results = catalog.search(
            &["grain".to_string(), "legume".to_string()],
            MatchMode::All,
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = sample_catalog();
        let results = catalog.search(&["BURR".to_string()], MatchMode::All);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Burrito");
    }
}
