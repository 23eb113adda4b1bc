use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Stock a new household starts with: name, quantity, unit, price
const DEFAULT_STOCK: [(&str, f64, &str, f64); 5] = [
    ("Tomato", 5.0, "gram", 3.0),
    ("Banana", 3.0, "gram", 5.0),
    ("Onion", 2.0, "piece", 1.5),
    ("Garlic", 3.0, "clove", 0.5),
    ("Olive Oil", 1.0, "liter", 8.0),
];

/// An ingredient kept in the shared pantry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
}

impl PantryItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            price,
        }
    }
}

/// Shared household inventory, keyed by ingredient name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pantry {
    items: BTreeMap<String, PantryItem>,
}

impl Pantry {
    /// Creates an empty pantry
    pub fn new() -> Self {
        Self::default()
    }

    /// Pantry stocked with tomatoes, bananas, onions, garlic and olive oil
    pub fn with_defaults() -> Self {
        let mut pantry = Self::new();
        for (name, quantity, unit, price) in DEFAULT_STOCK {
            pantry.upsert(PantryItem::new(name, quantity, unit, price));
        }
        pantry
    }

    /// Adds an item, replacing any existing item with the same name
    pub fn upsert(&mut self, item: PantryItem) -> Option<PantryItem> {
        self.items.insert(item.name.clone(), item)
    }

    /// Removes an item by name
    pub fn remove(&mut self, name: &str) -> Option<PantryItem> {
        self.items.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&PantryItem> {
        self.items.get(name)
    }

    /// All items ordered by name
    pub fn items(&self) -> Vec<PantryItem> {
        self.items.values().cloned().collect()
    }

    /// Ingredient names used for automatic recipe search
    pub fn ingredient_names(&self) -> BTreeSet<String> {
        self.items.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: f64) -> PantryItem {
        PantryItem::new(name, quantity, "piece", 1.5)
    }

    #[test]
    fn test_new_pantry() {
        let pantry = Pantry::new();
        assert!(pantry.is_empty());
        assert!(pantry.ingredient_names().is_empty());
    }

    #[test]
    fn test_default_stock() {
        let pantry = Pantry::with_defaults();

        let names: Vec<String> = pantry.ingredient_names().into_iter().collect();
        assert_eq!(names, vec!["Banana", "Garlic", "Olive Oil", "Onion", "Tomato"]);
        assert_eq!(
            pantry.get("Garlic"),
            Some(&PantryItem::new("Garlic", 3.0, "clove", 0.5))
        );
        assert_eq!(
            pantry.get("Olive Oil"),
            Some(&PantryItem::new("Olive Oil", 1.0, "liter", 8.0))
        );
        assert_eq!(pantry.get("Tomato").map(|i| i.unit.as_str()), Some("gram"));
    }

    #[test]
    fn test_upsert_replaces_by_name() {
        let mut pantry = Pantry::new();
        assert!(pantry.upsert(item("Onion", 2.0)).is_none());
        let previous = pantry.upsert(item("Onion", 5.0));

        assert_eq!(previous.map(|i| i.quantity), Some(2.0));
        assert_eq!(pantry.items().len(), 1);
        assert_eq!(pantry.get("Onion").map(|i| i.quantity), Some(5.0));
    }

    #[test]
    fn test_remove() {
        let mut pantry = Pantry::new();
        pantry.upsert(item("Garlic", 3.0));

        assert!(pantry.remove("Garlic").is_some());
        assert!(pantry.remove("Garlic").is_none()); // Already gone
        assert!(pantry.is_empty());
    }

    #[test]
    fn test_ingredient_names_sorted() {
        let mut pantry = Pantry::new();
        pantry.upsert(item("Tomato", 5.0));
        pantry.upsert(item("Banana", 3.0));

        let names: Vec<String> = pantry.ingredient_names().into_iter().collect();
        assert_eq!(names, vec!["Banana", "Tomato"]);
    }
}
