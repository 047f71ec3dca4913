//! # Shopping List Data Model
//!
//! This module defines the typed records that flow through the grocery list
//! engine: parsed ingredient lines, recipes, the aggregated shopping list, store
//! inventories and the results of pricing a list against them.
//!
//! ## Core Concepts
//!
//! - **ParsedIngredient**: One ingredient line broken into quantity, unit, item and preparation
//! - **Recipe**: A named sequence of raw ingredient lines
//! - **AggregatedItem**: The running total for one normalized item across recipes
//! - **ShoppingList**: Insertion-ordered map of normalized item name to `AggregatedItem`
//! - **StoreInventory**: Lowercase item name to price record lookup table
//! - **PriceComparisonResult**: Total, itemized lines and missing items for one store
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::ingredient_model::{AggregatedItem, ShoppingList};
//!
//! let mut list = ShoppingList::new();
//! list.insert("flour", AggregatedItem::new(2.0, "cups", "Cookies"));
//!
//! assert_eq!(list.len(), 1);
//! assert_eq!(list.get("flour").map(|i| i.quantity), Some(2.0));
//! ```

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Unit assigned to lines that carry no explicit unit
pub const DEFAULT_UNIT: &str = "each";

/// Represents one parsed ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Amount required (never negative)
    pub quantity: f64,

    /// Unit as written in the recipe, lowercased (e.g., "cups", "tbsp", "each")
    pub unit: String,

    /// Item text before normalization, lowercased (e.g., "roma tomatoes")
    pub item: String,

    /// Preparation keyword found in the line (e.g., "diced")
    pub preparation: Option<String>,
}

/// A recipe as handed over by a recipe source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name, used as the provenance label in the shopping list
    pub name: String,

    /// Raw ingredient lines in recipe order
    pub ingredients: Vec<String>,
}

/// Aggregated quantity of one normalized item across recipes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedItem {
    /// Sum of all contributions, expressed in `unit`
    pub quantity: f64,

    /// Unit of the first contribution seen for this item
    pub unit: String,

    /// Contributing recipe names in first-seen order, without duplicates
    pub recipes: Vec<String>,

    /// Unit mismatch warnings recorded while merging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Insertion-ordered shopping list keyed by normalized item name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    entries: Vec<(String, AggregatedItem)>,
    index: HashMap<String, usize>,
}

/// Price record for one item of a store inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Price per unit (never negative)
    pub price: f64,

    /// Brand label, passed through untouched
    #[serde(default)]
    pub brand: Option<String>,

    /// Package size, passed through untouched
    #[serde(default)]
    pub size: Option<String>,

    /// Package unit, passed through untouched
    #[serde(default)]
    pub unit: Option<String>,

    /// Store's own category label, passed through untouched
    #[serde(default)]
    pub category: Option<String>,

    /// Date the price was last checked
    #[serde(default)]
    pub date_checked: Option<NaiveDate>,
}

/// Read-only lookup table of a store's prices, keyed by lowercase item name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreInventory {
    items: HashMap<String, InventoryItem>,
}

/// One priced line of a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemizedLine {
    /// Shopping list item name
    pub item: String,
    /// Quantity from the shopping list
    pub quantity: f64,
    /// Unit from the shopping list
    pub unit: String,
    /// Inventory price for the matched entry
    pub unit_price: f64,
    /// `quantity * unit_price`, rounded to cents
    pub line_total: f64,
}

/// Result of pricing one shopping list against one store inventory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceComparisonResult {
    /// Sum of all line totals, rounded to cents
    pub total: f64,
    /// Priced lines in shopping list order
    pub itemized: Vec<ItemizedLine>,
    /// Items with no inventory entry, even after fuzzy retry
    pub not_found: Vec<String>,
}

/// Per-store summary produced by the store comparator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    /// Store name as requested
    pub store: String,
    /// Basket total, or `f64::INFINITY` when the inventory could not be loaded
    pub total: f64,
    /// Number of shopping list items priced at this store
    pub items_found: usize,
    /// Number of shopping list items not priced at this store
    pub items_missing: usize,
    /// Priced lines
    pub itemized: Vec<ItemizedLine>,
    /// Item names missing from this store
    pub not_found: Vec<String>,
}

/// Store summaries sorted by ascending total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreComparison {
    stores: Vec<StoreSummary>,
}

impl ParsedIngredient {
    /// Create an ingredient of one unitless item
    pub fn new(item: &str) -> Self {
        Self {
            quantity: 1.0,
            unit: DEFAULT_UNIT.to_string(),
            item: item.to_string(),
            preparation: None,
        }
    }

    /// Parsed value of an empty or whitespace-only line
    pub fn empty() -> Self {
        Self {
            quantity: 0.0,
            unit: DEFAULT_UNIT.to_string(),
            item: String::new(),
            preparation: None,
        }
    }

    /// Set quantity and unit
    pub fn with_quantity(mut self, quantity: f64, unit: &str) -> Self {
        self.quantity = quantity;
        self.unit = unit.to_string();
        self
    }

    /// Set the preparation keyword
    pub fn with_preparation(mut self, preparation: &str) -> Self {
        self.preparation = Some(preparation.to_string());
        self
    }

    /// Whether the line carried no item text at all
    pub fn is_empty(&self) -> bool {
        self.item.is_empty()
    }
}

impl Recipe {
    /// Create a recipe from a name and its raw ingredient lines
    pub fn new<S: Into<String>>(name: &str, ingredients: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

impl AggregatedItem {
    /// Start an aggregate from a first contribution
    pub fn new(quantity: f64, unit: &str, recipe: &str) -> Self {
        Self {
            quantity,
            unit: unit.to_string(),
            recipes: vec![recipe.to_string()],
            notes: None,
        }
    }

    /// Record a contributing recipe; repeated names are ignored
    pub fn add_recipe(&mut self, recipe: &str) {
        if !self.recipes.iter().any(|r| r == recipe) {
            self.recipes.push(recipe.to_string());
        }
    }

    /// Append a note, joining with any previous ones
    pub fn push_note(&mut self, note: &str) {
        self.notes = Some(match self.notes.take() {
            Some(prev) if !prev.is_empty() => format!("{prev} | {note}"),
            _ => note.to_string(),
        });
    }

    /// Whether merging recorded any warnings for this item
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.is_empty())
    }
}

impl ShoppingList {
    /// Create an empty shopping list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an item with this exact key exists
    pub fn contains(&self, item: &str) -> bool {
        self.index.contains_key(item)
    }

    /// Look up an item by its exact key
    pub fn get(&self, item: &str) -> Option<&AggregatedItem> {
        self.index.get(item).map(|&i| &self.entries[i].1)
    }

    /// Mutable lookup by exact key
    pub fn get_mut(&mut self, item: &str) -> Option<&mut AggregatedItem> {
        match self.index.get(item) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Insert or replace an item. A new key is appended at the end; replacing
    /// keeps the key's original position.
    pub fn insert(&mut self, item: &str, value: AggregatedItem) -> Option<AggregatedItem> {
        if let Some(&i) = self.index.get(item) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(item.to_string(), self.entries.len());
        self.entries.push((item.to_string(), value));
        None
    }

    /// Remove an item by exact key, preserving the order of the rest
    pub fn remove(&mut self, item: &str) -> Option<AggregatedItem> {
        let position = self.index.remove(item)?;
        let (_, removed) = self.entries.remove(position);
        for (_, slot) in self.index.iter_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Iterate items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregatedItem)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate items mutably in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AggregatedItem)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Item names in insertion order
    pub fn item_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Every recipe that contributed to the list, in first-seen order
    pub fn recipes(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for (_, item) in &self.entries {
            for recipe in &item.recipes {
                if !seen.contains(recipe) {
                    seen.push(recipe.clone());
                }
            }
        }
        seen
    }

    /// Items that carry unit mismatch notes
    pub fn items_with_notes(&self) -> Vec<(&str, &AggregatedItem)> {
        self.iter().filter(|(_, item)| item.has_notes()).collect()
    }
}

impl<K: Into<String>> FromIterator<(K, AggregatedItem)> for ShoppingList {
    fn from_iter<I: IntoIterator<Item = (K, AggregatedItem)>>(iter: I) -> Self {
        let mut list = ShoppingList::new();
        for (key, value) in iter {
            let key: String = key.into();
            list.insert(&key, value);
        }
        list
    }
}

impl Serialize for ShoppingList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ShoppingList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ShoppingListVisitor;

        impl<'de> Visitor<'de> for ShoppingListVisitor {
            type Value = ShoppingList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of item name to aggregated item")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut list = ShoppingList::new();
                while let Some((key, value)) = access.next_entry::<String, AggregatedItem>()? {
                    list.insert(&key, value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(ShoppingListVisitor)
    }
}

impl InventoryItem {
    /// Inventory entry carrying only a price
    pub fn priced(price: f64) -> Self {
        Self {
            price,
            brand: None,
            size: None,
            unit: None,
            category: None,
            date_checked: None,
        }
    }
}

impl StoreInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; the key is trimmed and lowercased
    pub fn insert(&mut self, name: &str, item: InventoryItem) {
        self.items.insert(name.trim().to_lowercase(), item);
    }

    /// Exact lookup by lowercase key
    pub fn get(&self, key: &str) -> Option<&InventoryItem> {
        self.items.get(key)
    }

    /// Number of priced items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the inventory has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, InventoryItem)> for StoreInventory {
    fn from_iter<I: IntoIterator<Item = (K, InventoryItem)>>(iter: I) -> Self {
        let mut inventory = StoreInventory::new();
        for (name, item) in iter {
            inventory.insert(name.as_ref(), item);
        }
        inventory
    }
}

impl PriceComparisonResult {
    /// Number of items that were priced
    pub fn items_found(&self) -> usize {
        self.itemized.len()
    }

    /// Number of items that were not found
    pub fn items_missing(&self) -> usize {
        self.not_found.len()
    }

    /// Priced line for a given item
    pub fn line(&self, item: &str) -> Option<&ItemizedLine> {
        self.itemized.iter().find(|line| line.item == item)
    }
}

impl StoreSummary {
    /// Summarize a successful pricing run
    pub fn from_result(store: &str, result: PriceComparisonResult) -> Self {
        Self {
            store: store.to_string(),
            total: result.total,
            items_found: result.items_found(),
            items_missing: result.items_missing(),
            itemized: result.itemized,
            not_found: result.not_found,
        }
    }

    /// Sentinel summary for a store whose inventory could not be loaded;
    /// every item on the list counts as not found
    pub fn unavailable(store: &str, list: &ShoppingList) -> Self {
        let not_found: Vec<String> = list.item_names().into_iter().map(String::from).collect();
        Self {
            store: store.to_string(),
            total: f64::INFINITY,
            items_found: 0,
            items_missing: not_found.len(),
            itemized: Vec::new(),
            not_found,
        }
    }

    /// Whether the store's inventory was available
    pub fn is_available(&self) -> bool {
        self.total.is_finite()
    }
}

impl StoreComparison {
    /// Build a comparison, sorting summaries by ascending total. Ties keep the
    /// order in which stores were supplied.
    pub fn new(mut stores: Vec<StoreSummary>) -> Self {
        stores.sort_by(|a, b| a.total.total_cmp(&b.total));
        Self { stores }
    }

    /// Cheapest store with a loadable inventory
    pub fn cheapest(&self) -> Option<&StoreSummary> {
        self.stores.iter().find(|s| s.is_available())
    }

    /// Summary for a store, matched case-insensitively
    pub fn get(&self, store: &str) -> Option<&StoreSummary> {
        self.stores
            .iter()
            .find(|s| s.store.eq_ignore_ascii_case(store))
    }

    /// Summaries in ascending total order
    pub fn iter(&self) -> impl Iterator<Item = &StoreSummary> {
        self.stores.iter()
    }

    /// Number of compared stores
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether no stores were compared
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Store names in ascending total order
    pub fn store_names(&self) -> Vec<&str> {
        self.stores.iter().map(|s| s.store.as_str()).collect()
    }
}

/// Render a quantity without a trailing ".0" on whole numbers
pub fn format_quantity(quantity: f64) -> String {
    if quantity.is_finite() && quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", format_quantity(self.quantity), self.unit, self.item)?;

        if let Some(preparation) = &self.preparation {
            write!(f, " ({})", preparation)?;
        }

        Ok(())
    }
}

impl fmt::Display for AggregatedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            format_quantity(self.quantity),
            self.unit,
            self.recipes.join(", ")
        )
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shopping List ({} items):", self.len())?;

        for (name, item) in self.iter() {
            writeln!(
                f,
                "  [ ] {} {} {} --- used in {}",
                format_quantity(item.quantity),
                item.unit,
                name,
                item.recipes.join(", ")
            )?;
            if let Some(notes) = &item.notes {
                writeln!(f, "      Notes: {}", notes)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for StoreComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, summary) in self.stores.iter().enumerate() {
            if summary.is_available() {
                writeln!(
                    f,
                    "{}. {}: ${:.2} ({} found, {} missing)",
                    rank + 1,
                    summary.store,
                    summary.total,
                    summary.items_found,
                    summary.items_missing
                )?;
            } else {
                writeln!(f, "{}. {}: no inventory data", rank + 1, summary.store)?;
            }
        }
        Ok(())
    }
}
