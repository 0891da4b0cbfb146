//! Interactive menu
//!
//! Terminal front end over the catalog and the ledger. All mutation goes
//! through the core: log edits are commands, food creation goes through
//! `FoodCatalog::add`.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::catalog::{FoodCatalog, MatchMode};
use crate::ledger::{is_valid_date, today, DailyLedger};
use crate::models::{Component, Food, FoodKind};
use crate::storage;

/// Split a comma-separated keyword list, trimming whitespace and dropping
/// empty tokens
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// The interactive session state
pub struct DiaryCli {
    catalog: FoodCatalog,
    ledger: DailyLedger,
    current_date: String,
    food_path: PathBuf,
    log_path: PathBuf,
    foods_modified: bool,
    logs_modified: bool,
}

impl DiaryCli {
    pub fn new(
        catalog: FoodCatalog,
        ledger: DailyLedger,
        food_path: PathBuf,
        log_path: PathBuf,
    ) -> Self {
        Self {
            catalog,
            ledger,
            current_date: today(),
            food_path,
            log_path,
            foods_modified: false,
            logs_modified: false,
        }
    }

    /// Run the menu loop until the user exits
    pub fn run(&mut self) -> io::Result<()> {
        println!("Welcome to Food Diary!");
        loop {
            println!("\n--- Food Diary ({}) ---", self.current_date);
            println!("1. Search foods");
            println!("2. View food details");
            println!("3. Add basic food");
            println!("4. Create composite food");
            println!("5. List all foods");
            println!("6. View daily log");
            println!("7. Add food to log");
            println!("8. Delete log entry");
            println!("9. Change current date");
            println!("10. Undo last action");
            println!("11. View undo stack");
            println!("12. Save");
            println!("13. Exit");

            match prompt("Choice: ")?.as_str() {
                "1" => self.search_foods()?,
                "2" => self.view_food_details()?,
                "3" => self.add_basic_food()?,
                "4" => self.create_composite_food()?,
                "5" => self.list_all_foods(),
                "6" => self.display_daily_log(),
                "7" => self.add_food_to_log()?,
                "8" => self.delete_food_from_log()?,
                "9" => self.change_date()?,
                "10" => self.undo(),
                "11" => self.show_undo_stack(),
                "12" => self.save(),
                "13" => {
                    self.handle_exit()?;
                    break;
                }
                _ => println!("Invalid choice. Please try again."),
            }
        }
        println!("Thank you for using Food Diary. Goodbye!");
        Ok(())
    }

    fn search_foods(&self) -> io::Result<()> {
        let input = prompt("Enter keywords (separated by spaces): ")?;
        let keywords: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        if keywords.is_empty() {
            println!("No keywords provided.");
            return Ok(());
        }

        let mode = match prompt("Match: 1. All keywords or 2. Any keyword? ")?.as_str() {
            "1" => MatchMode::All,
            "2" => MatchMode::Any,
            _ => {
                println!("Invalid choice.");
                return Ok(());
            }
        };

        let results = self.catalog.search(&keywords, mode);
        if results.is_empty() {
            println!("No foods match the given keywords.");
        } else {
            println!("\nMatching Foods ({}):", results.len());
            for (i, food) in results.iter().enumerate() {
                println!(
                    "{}. {} ({}) - {} calories",
                    i + 1,
                    food.name,
                    food.kind_str(),
                    food.calories()
                );
            }
        }
        Ok(())
    }

    fn view_food_details(&self) -> io::Result<()> {
        let name = prompt("Enter food name: ")?;
        let Some(food) = self.catalog.lookup(&name) else {
            println!("Food '{name}' not found.");
            return Ok(());
        };

        println!("\nFood Details: {}", food.name);
        println!("Type: {}", food.kind_str());
        println!("Calories: {}", food.calories());
        println!("Keywords: {}", food.keywords.join(", "));
        if let FoodKind::Composite { components } = &food.kind {
            println!("Components:");
            for component in components {
                println!(
                    "  - {} ({} serving(s))",
                    component.food.name, component.servings
                );
            }
        }
        Ok(())
    }

    fn add_basic_food(&mut self) -> io::Result<()> {
        println!("\n=== Add Basic Food ===");
        let name = prompt("Enter food name: ")?;
        let calories: f64 = match prompt("Enter calories per serving: ")?.parse() {
            Ok(value) => value,
            Err(_) => {
                println!("Invalid calorie value.");
                return Ok(());
            }
        };
        let keywords = parse_keywords(&prompt("Enter keywords (comma-separated): ")?);

        match self.catalog.add(Food::basic(name.clone(), keywords, calories)) {
            Ok(_) => {
                self.foods_modified = true;
                println!("Basic food '{name}' added successfully.");
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    fn create_composite_food(&mut self) -> io::Result<()> {
        println!("\n=== Create Composite Food ===");
        let name = prompt("Enter composite food name: ")?;
        let keywords = parse_keywords(&prompt("Enter keywords (comma-separated): ")?);

        let mut components = Vec::new();
        loop {
            let component_name = prompt("\nEnter component food name (or 'done' to finish): ")?;
            if component_name == "done" {
                break;
            }
            let Some(food) = self.catalog.lookup(&component_name) else {
                println!("Food '{component_name}' not found.");
                continue;
            };
            let servings: f64 = match prompt("Enter number of servings: ")?.parse() {
                Ok(value) if value > 0.0 => value,
                _ => {
                    println!("Invalid number of servings.");
                    continue;
                }
            };
            components.push(Component::new(std::rc::Rc::clone(food), servings));
            println!("Added {servings} serving(s) of '{component_name}'");
        }

        if components.is_empty() {
            println!("No components added. Composite food creation cancelled.");
            return Ok(());
        }

        match self.catalog.add(Food::composite(name.clone(), keywords, components)) {
            Ok(food) => {
                self.foods_modified = true;
                println!("Composite food '{name}' created successfully.");
                println!("Total calories: {}", food.calories());
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    fn list_all_foods(&self) {
        println!("\n=== All Foods ({}) ===", self.catalog.len());
        for food in self.catalog.iter() {
            println!(
                "{:<30} {:<12} {:>10} calories",
                food.name,
                food.kind_str(),
                food.calories()
            );
        }
    }

    fn display_daily_log(&self) {
        let entries = self.ledger.entries_for_date(&self.current_date);
        if entries.is_empty() {
            println!("No food entries for {}", self.current_date);
            return;
        }

        println!("\nFood Log for {}:", self.current_date);
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{:<5} {:<30} {:<10} {:>10} calories",
                i + 1,
                entry.food_name,
                entry.servings,
                entry.calories
            );
        }
        println!(
            "Total Calories: {}",
            self.ledger.total_calories(&self.current_date)
        );
    }

    fn add_food_to_log(&mut self) -> io::Result<()> {
        let name = prompt("Enter food name (use search to find one): ")?;
        let servings: f64 = match prompt("Enter number of servings: ")?.parse() {
            Ok(value) => value,
            Err(_) => {
                println!("Invalid number of servings.");
                return Ok(());
            }
        };

        let date = self.current_date.clone();
        match self.ledger.add_entry(&self.catalog, &date, &name, servings) {
            Ok(description) => {
                self.logs_modified = true;
                println!("Executed: {description}");
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    fn delete_food_from_log(&mut self) -> io::Result<()> {
        self.display_daily_log();
        if self.ledger.entries_for_date(&self.current_date).is_empty() {
            return Ok(());
        }

        let index: usize = match prompt("Enter entry number to delete: ")?.parse::<usize>() {
            Ok(number) if number >= 1usize => number - 1,
            _ => {
                println!("Invalid entry number.");
                return Ok(());
            }
        };

        let date = self.current_date.clone();
        match self.ledger.delete_entry(&date, index) {
            Ok(description) => {
                self.logs_modified = true;
                println!("Executed: {description}");
            }
            Err(err) => println!("Error: {err}"),
        }
        Ok(())
    }

    fn change_date(&mut self) -> io::Result<()> {
        let date = prompt("Enter date (YYYY-MM-DD): ")?;
        if is_valid_date(&date) {
            self.current_date = date;
            println!("Current date set to: {}", self.current_date);
        } else {
            println!("Invalid date format. Please use YYYY-MM-DD.");
        }
        Ok(())
    }

    fn undo(&mut self) {
        match self.ledger.undo_last() {
            Some(description) => {
                self.logs_modified = true;
                println!("Undone: {description}");
            }
            None => println!("Nothing to undo."),
        }
    }

    fn show_undo_stack(&self) {
        let mut shown = false;
        for (i, command) in self.ledger.history().enumerate() {
            if !shown {
                println!("\nUndo Stack (latest first):");
                shown = true;
            }
            println!("{}. {}", i + 1, command.describe());
        }
        if !shown {
            println!("Undo stack is empty.");
        }
    }

    fn save(&mut self) {
        match storage::save_food_records(&self.food_path, &self.catalog.to_records()) {
            Ok(()) => self.foods_modified = false,
            Err(err) => {
                tracing::error!("Failed to save food database: {err}");
                println!("Error saving food database: {err}");
            }
        }
        match storage::save_logs(&self.log_path, self.ledger.days()) {
            Ok(()) => self.logs_modified = false,
            Err(err) => {
                tracing::error!("Failed to save logs: {err}");
                println!("Error saving logs: {err}");
            }
        }
        if !self.foods_modified && !self.logs_modified {
            println!("Saved.");
        }
    }

    fn handle_exit(&mut self) -> io::Result<()> {
        if self.foods_modified || self.logs_modified {
            let choice = prompt("Unsaved changes. Save before exit? (y/n): ")?;
            if choice.eq_ignore_ascii_case("y") {
                self.save();
            }
        }
        Ok(())
    }
}
