//! Food graph resolver
//!
//! Builds a resolved catalog from flat food records, materializing
//! composite-to-component references recursively.

use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use thiserror::Error;

use crate::models::{Component, ComponentRecord, Food, FoodRecord};

use super::FoodCatalog;

/// A non-fatal problem found during resolution.
///
/// Diagnostics degrade the result instead of failing the load: a catalog
/// with dangling references still resolves, with the offending components
/// dropped and reported here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Duplicate food name '{name}'; keeping the first definition")]
    DuplicateName { name: String },

    #[error("Skipped a food record with an empty name")]
    EmptyName,

    #[error("Component '{component}' of '{composite}' not found; component dropped")]
    MissingComponent { composite: String, component: String },

    #[error("Component '{component}' of '{composite}' would form a cycle; component dropped")]
    ComponentCycle { composite: String, component: String },
}

/// Why a name failed to resolve
enum Miss {
    Unknown,
    Cycle,
}

struct Resolver {
    resolved: BTreeMap<String, Rc<Food>>,
    pending: BTreeMap<String, PendingComposite>,
    in_progress: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

struct PendingComposite {
    keywords: Vec<String>,
    components: Vec<ComponentRecord>,
}

impl Resolver {
    fn new() -> Self {
        Self {
            resolved: BTreeMap::new(),
            pending: BTreeMap::new(),
            in_progress: HashSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Partition records: basics resolve immediately, composites are
    /// deferred until their components can be looked up.
    fn partition(&mut self, records: Vec<FoodRecord>) {
        for record in records {
            let name = record.name().to_string();
            if name.is_empty() {
                self.diagnostics.push(Diagnostic::EmptyName);
                continue;
            }
            if self.resolved.contains_key(&name) || self.pending.contains_key(&name) {
                self.diagnostics.push(Diagnostic::DuplicateName { name });
                continue;
            }
            match record {
                FoodRecord::Basic {
                    name,
                    keywords,
                    calories,
                } => {
                    let food = Rc::new(Food::basic(name.clone(), keywords, calories));
                    self.resolved.insert(name, food);
                }
                FoodRecord::Composite {
                    name,
                    keywords,
                    components,
                } => {
                    self.pending.insert(
                        name,
                        PendingComposite {
                            keywords,
                            components,
                        },
                    );
                }
            }
        }
    }

    /// Resolve a food by name, recursing into pending composites.
    ///
    /// Memoized: each name is resolved at most once, so every composite that
    /// references it shares the same `Rc<Food>`. The `in_progress` set
    /// breaks component cycles, which would otherwise recurse unboundedly.
    fn resolve(&mut self, name: &str) -> Result<Rc<Food>, Miss> {
        if let Some(food) = self.resolved.get(name) {
            return Ok(Rc::clone(food));
        }
        if self.in_progress.contains(name) {
            return Err(Miss::Cycle);
        }
        let Some(record) = self.pending.remove(name) else {
            return Err(Miss::Unknown);
        };

        self.in_progress.insert(name.to_string());
        let mut components = Vec::with_capacity(record.components.len());
        for component in record.components {
            match self.resolve(&component.name) {
                Ok(food) => components.push(Component::new(food, component.servings)),
                Err(Miss::Unknown) => self.diagnostics.push(Diagnostic::MissingComponent {
                    composite: name.to_string(),
                    component: component.name,
                }),
                Err(Miss::Cycle) => self.diagnostics.push(Diagnostic::ComponentCycle {
                    composite: name.to_string(),
                    component: component.name,
                }),
            }
        }
        self.in_progress.remove(name);

        let food = Rc::new(Food::composite(name, record.keywords, components));
        self.resolved.insert(name.to_string(), Rc::clone(&food));
        Ok(food)
    }
}

/// Resolve flat food records into a catalog.
///
/// Best-effort: a missing or cyclic component reference drops that
/// component (with a diagnostic) rather than failing the whole load.
/// Malformed record shapes never reach this function; they fail at the
/// storage boundary.
pub fn resolve_catalog(records: Vec<FoodRecord>) -> (FoodCatalog, Vec<Diagnostic>) {
    let mut resolver = Resolver::new();
    resolver.partition(records);

    let pending_names: Vec<String> = resolver.pending.keys().cloned().collect();
    for name in pending_names {
        // Already consumed entries resolve from the memo table
        let _ = resolver.resolve(&name);
    }

    let catalog = FoodCatalog {
        foods: resolver.resolved,
    };
    (catalog, resolver.diagnostics)
}
