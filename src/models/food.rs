//! Food model
//!
//! Represents basic and composite foods and their raw record forms.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A component of a composite food: a shared food handle and a serving count.
///
/// Components hold `Rc` handles because the same base food is typically
/// reused across many composites. Foods are immutable once placed in a
/// catalog, so the aliasing is read-only.
#[derive(Debug, Clone)]
pub struct Component {
    pub food: Rc<Food>,
    pub servings: f64,
}

impl Component {
    pub fn new(food: Rc<Food>, servings: f64) -> Self {
        Self { food, servings }
    }
}

/// The two food variants
#[derive(Debug, Clone)]
pub enum FoodKind {
    /// Calories are a stored scalar
    Basic { calories: f64 },
    /// Calories are derived from the components, recomputed on demand
    Composite { components: Vec<Component> },
}

/// A food with search keywords and a calorie contract
#[derive(Debug, Clone)]
pub struct Food {
    pub name: String,
    pub keywords: Vec<String>,
    pub kind: FoodKind,
}

impl Food {
    /// Create a basic food with a stored calorie value
    pub fn basic(name: impl Into<String>, keywords: Vec<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            keywords,
            kind: FoodKind::Basic { calories },
        }
    }

    /// Create a composite food from resolved components
    pub fn composite(name: impl Into<String>, keywords: Vec<String>, components: Vec<Component>) -> Self {
        Self {
            name: name.into(),
            keywords,
            kind: FoodKind::Composite { components },
        }
    }

    /// Calories for one serving of this food.
    ///
    /// Composite totals are never cached: the sum is recomputed through the
    /// component graph on every call, so nested composites stay consistent.
    /// The resolver guarantees the graph is acyclic.
    pub fn calories(&self) -> f64 {
        match &self.kind {
            FoodKind::Basic { calories } => *calories,
            FoodKind::Composite { components } => components
                .iter()
                .map(|c| c.food.calories() * c.servings)
                .sum(),
        }
    }

    /// Components of a composite food; empty for basic foods
    pub fn components(&self) -> &[Component] {
        match &self.kind {
            FoodKind::Basic { .. } => &[],
            FoodKind::Composite { components } => components,
        }
    }

    /// The record tag for this food ("basic" or "composite")
    pub fn kind_str(&self) -> &'static str {
        match &self.kind {
            FoodKind::Basic { .. } => "basic",
            FoodKind::Composite { .. } => "composite",
        }
    }

    /// Case-insensitive substring match of `keyword` against the food name
    /// and every food keyword
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.keywords
            .iter()
            .any(|k| k.to_lowercase().contains(&needle))
    }

    /// Flatten back into the raw record form for saving
    pub fn to_record(&self) -> FoodRecord {
        match &self.kind {
            FoodKind::Basic { calories } => FoodRecord::Basic {
                name: self.name.clone(),
                keywords: self.keywords.clone(),
                calories: *calories,
            },
            FoodKind::Composite { components } => FoodRecord::Composite {
                name: self.name.clone(),
                keywords: self.keywords.clone(),
                components: components
                    .iter()
                    .map(|c| ComponentRecord {
                        name: c.food.name.clone(),
                        servings: c.servings,
                    })
                    .collect(),
            },
        }
    }
}

/// A raw component reference inside a composite record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub servings: f64,
}

/// A flat food record as stored on disk, before resolution.
///
/// Composite records reference their components by name only; the resolver
/// materializes the references. Extra fields (the original tool writes a
/// derived `calories` value on composites) are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FoodRecord {
    Basic {
        name: String,
        #[serde(default)]
        keywords: Vec<String>,
        calories: f64,
    },
    Composite {
        name: String,
        #[serde(default)]
        keywords: Vec<String>,
        components: Vec<ComponentRecord>,
    },
}

impl FoodRecord {
    /// The food name this record defines
    pub fn name(&self) -> &str {
        match self {
            FoodRecord::Basic { name, .. } => name,
            FoodRecord::Composite { name, .. } => name,
        }
    }
}
