//! # Grocery List
//!
//! Turns a batch of recipes into one shopping list and prices it at several
//! stores. Ingredient lines are parsed, their names normalized and their
//! quantities scaled and merged across units; the merged list can be grouped
//! by store section and compared store by store.
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::ingredient_model::{InventoryItem, Recipe, StoreInventory};
//! use grocery_list::inventory_source::InMemoryInventorySource;
//! use grocery_list::shopping_list::compile_shopping_list;
//! use grocery_list::store_pricing::compare_store_totals;
//! use std::collections::HashMap;
//!
//! let recipes = vec![Recipe::new("Salad", ["2 each tomato", "1 head lettuce"])];
//! let list = compile_shopping_list(&recipes, &HashMap::new())?;
//!
//! let giant: StoreInventory = vec![
//!     ("tomato", InventoryItem::priced(0.5)),
//!     ("lettuce", InventoryItem::priced(1.99)),
//! ]
//! .into_iter()
//! .collect();
//! let source = InMemoryInventorySource::new().with_store("giant", giant);
//!
//! let comparison = compare_store_totals(&list, &["giant"], &source);
//! assert_eq!(comparison.cheapest().map(|s| s.total), Some(2.99));
//! # Ok::<(), grocery_list::errors::GroceryError>(())
//! ```

pub mod categorizer;
pub mod config;
pub mod errors;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod inventory_source;
pub mod logging;
pub mod normalizer;
pub mod recipe_source;
pub mod shopping_list;
pub mod store_pricing;
pub mod unit_conversion;
