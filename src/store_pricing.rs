//! # Store Pricing
//!
//! Prices a shopping list against store inventories and ranks stores by
//! basket total.
//!
//! ## Features
//!
//! - Fuzzy item lookup: verbatim, then `item + "s"`, then the singular form
//! - Whole-basket totals with itemized lines and a list of items not carried
//! - Multi-store comparison where a store without inventory data sorts last
//!   instead of aborting the comparison
//! - Head-to-head comparison of two stores with the savings of the cheaper one
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::ingredient_model::{AggregatedItem, InventoryItem, ShoppingList, StoreInventory};
//! use grocery_list::store_pricing::price_shopping_list;
//!
//! let list: ShoppingList = vec![("tomato", AggregatedItem::new(2.0, "count", "Pasta"))]
//!     .into_iter()
//!     .collect();
//! let inventory: StoreInventory = vec![("tomato", InventoryItem::priced(0.50))]
//!     .into_iter()
//!     .collect();
//!
//! let result = price_shopping_list(&list, &inventory);
//! assert_eq!(result.total, 1.0);
//! assert!(result.not_found.is_empty());
//! ```

use crate::ingredient_model::{
    InventoryItem, ItemizedLine, PriceComparisonResult, ShoppingList, StoreComparison,
    StoreInventory, StoreSummary,
};
use crate::inventory_source::InventorySource;
use crate::unit_conversion::round_to;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals closer than this are a tie
pub const TIE_TOLERANCE: f64 = 0.01;

/// Cheaper side of a head-to-head comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    First,
    Second,
    Tie,
}

/// Result of pricing one list at two stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub first_total: f64,
    pub second_total: f64,
    pub winner: Winner,
    /// Amount saved by shopping at the winner, zero on a tie
    pub savings: f64,
}

/// Look up an item's price record with singular/plural retry
///
/// The name is trimmed and lowercased and tried verbatim. On a miss the plural
/// forms (`+s`, `+es`) are tried, then the singular forms (`-s`, `-es`).
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::{InventoryItem, StoreInventory};
/// use grocery_list::store_pricing::find_item_price;
///
/// let inventory: StoreInventory = vec![("tomato", InventoryItem::priced(0.5))]
///     .into_iter()
///     .collect();
///
/// assert!(find_item_price("Tomatoes", &inventory).is_some());
/// assert!(find_item_price("tomatos", &inventory).is_some());
/// assert!(find_item_price("potato", &inventory).is_none());
/// ```
pub fn find_item_price<'a>(item: &str, inventory: &'a StoreInventory) -> Option<&'a InventoryItem> {
    let key = item.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    if let Some(hit) = inventory.get(&key) {
        return Some(hit);
    }

    let plurals = [format!("{key}s"), format!("{key}es")];
    let singulars = [key.strip_suffix('s'), key.strip_suffix("es")];
    let candidates = plurals
        .into_iter()
        .chain(singulars.into_iter().flatten().map(str::to_string))
        .filter(|candidate| !candidate.is_empty());

    for candidate in candidates {
        if let Some(hit) = inventory.get(&candidate) {
            debug!("Fuzzy match '{}' -> '{}'", key, candidate);
            return Some(hit);
        }
    }
    None
}

/// Price every item of a shopping list at one store
///
/// Items the inventory does not carry are listed in `not_found` and left out
/// of the total. Line totals are rounded to cents; the basket total is the
/// rounded sum of the unrounded line totals.
pub fn price_shopping_list(list: &ShoppingList, inventory: &StoreInventory) -> PriceComparisonResult {
    let mut result = PriceComparisonResult::default();
    let mut total = 0.0;

    for (name, item) in list.iter() {
        match find_item_price(name, inventory) {
            Some(entry) => {
                let line_total = item.quantity * entry.price;
                total += line_total;
                result.itemized.push(ItemizedLine {
                    item: name.to_string(),
                    quantity: item.quantity,
                    unit: item.unit.clone(),
                    unit_price: entry.price,
                    line_total: round_to(line_total, 2),
                });
            }
            None => {
                debug!("'{}' not carried", name);
                result.not_found.push(name.to_string());
            }
        }
    }

    result.total = round_to(total, 2);
    debug!(
        "Priced {} items, {} not found, total {:.2}",
        result.items_found(),
        result.items_missing(),
        result.total
    );
    result
}

/// Price a shopping list at several stores and rank them by total
///
/// Each store's inventory is loaded from `source`. A store whose inventory
/// cannot be loaded is kept with an infinite total, no items found and every
/// item missing, so it sorts after all priced stores. Equal totals keep the
/// order of `stores`.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::{AggregatedItem, InventoryItem, ShoppingList, StoreInventory};
/// use grocery_list::inventory_source::InMemoryInventorySource;
/// use grocery_list::store_pricing::compare_store_totals;
///
/// let list: ShoppingList = vec![("milk", AggregatedItem::new(1.0, "gallon", "Cereal"))]
///     .into_iter()
///     .collect();
/// let source = InMemoryInventorySource::new()
///     .with_store("giant", vec![("milk", InventoryItem::priced(3.99))].into_iter().collect())
///     .with_store("safeway", vec![("milk", InventoryItem::priced(3.49))].into_iter().collect());
///
/// let comparison = compare_store_totals(&list, &["giant", "closed", "safeway"], &source);
/// assert_eq!(comparison.store_names(), vec!["safeway", "giant", "closed"]);
/// ```
pub fn compare_store_totals<S: AsRef<str>>(
    list: &ShoppingList,
    stores: &[S],
    source: &dyn InventorySource,
) -> StoreComparison {
    tracing::info!(stores = stores.len(), items = list.len(), "Comparing store totals");

    let summaries = stores
        .iter()
        .map(|store| {
            let store = store.as_ref();
            match source.load_inventory(store) {
                Ok(inventory) => {
                    let summary = StoreSummary::from_result(store, price_shopping_list(list, &inventory));
                    tracing::info!(
                        store = %store,
                        total = summary.total,
                        items_missing = summary.items_missing,
                        "Store priced"
                    );
                    summary
                }
                Err(e) => {
                    tracing::warn!(store = %store, error = %e, "Store inventory unavailable");
                    StoreSummary::unavailable(store, list)
                }
            }
        })
        .collect();

    let comparison = StoreComparison::new(summaries);
    if let Some(best) = comparison.cheapest() {
        tracing::info!(store = %best.store, total = best.total, "Cheapest store");
    }
    comparison
}

/// Price one list at two stores and report which is cheaper
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::{AggregatedItem, InventoryItem, ShoppingList, StoreInventory};
/// use grocery_list::store_pricing::{compare_two, Winner};
///
/// let list: ShoppingList = vec![("bread", AggregatedItem::new(2.0, "loaf", "Toast"))]
///     .into_iter()
///     .collect();
/// let cheap: StoreInventory = vec![("bread", InventoryItem::priced(2.00))].into_iter().collect();
/// let pricey: StoreInventory = vec![("bread", InventoryItem::priced(2.75))].into_iter().collect();
///
/// let result = compare_two(&list, &pricey, &cheap);
/// assert_eq!(result.winner, Winner::Second);
/// assert_eq!(result.savings, 1.5);
/// ```
pub fn compare_two(list: &ShoppingList, first: &StoreInventory, second: &StoreInventory) -> HeadToHead {
    let first_total = price_shopping_list(list, first).total;
    let second_total = price_shopping_list(list, second).total;

    let (winner, savings) = if (first_total - second_total).abs() < TIE_TOLERANCE {
        (Winner::Tie, 0.0)
    } else if first_total < second_total {
        (Winner::First, round_to(second_total - first_total, 2))
    } else {
        (Winner::Second, round_to(first_total - second_total, 2))
    };

    HeadToHead {
        first_total,
        second_total,
        winner,
        savings,
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::First => write!(f, "first"),
            Winner::Second => write!(f, "second"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{GroceryError, Result};
    use crate::ingredient_model::AggregatedItem;
    use crate::inventory_source::InMemoryInventorySource;

    fn inventory(entries: &[(&str, f64)]) -> StoreInventory {
        entries
            .iter()
            .map(|(name, price)| (*name, InventoryItem::priced(*price)))
            .collect()
    }

    fn list(entries: &[(&str, f64)]) -> ShoppingList {
        entries
            .iter()
            .map(|(name, quantity)| (*name, AggregatedItem::new(*quantity, "count", "Test")))
            .collect()
    }

    #[test]
    fn test_price_single_item() {
        let result = price_shopping_list(&list(&[("tomato", 2.0)]), &inventory(&[("tomato", 0.50)]));
        assert_eq!(result.total, 1.0);
        assert!(result.not_found.is_empty());

        let line = result.line("tomato").unwrap();
        assert_eq!(line.unit_price, 0.5);
        assert_eq!(line.line_total, 1.0);
        assert_eq!(line.unit, "count");
    }

    #[test]
    fn test_fuzzy_match_both_directions() {
        let inv = inventory(&[("tomato", 0.5), ("eggs", 0.25)]);
        assert_eq!(find_item_price("tomatos", &inv).map(|i| i.price), Some(0.5));
        assert_eq!(find_item_price("egg", &inv).map(|i| i.price), Some(0.25));
        assert_eq!(find_item_price("  TOMATO ", &inv).map(|i| i.price), Some(0.5));
        assert!(find_item_price("", &inv).is_none());
        assert!(find_item_price("s", &inv).is_none());
    }

    #[test]
    fn test_es_plurals() {
        let inv = inventory(&[("tomato", 0.5), ("potatoes", 0.8)]);
        assert_eq!(find_item_price("tomatoes", &inv).map(|i| i.price), Some(0.5));
        assert_eq!(find_item_price("potato", &inv).map(|i| i.price), Some(0.8));
        assert!(find_item_price("tomatoe", &inv).is_none());
    }

    #[test]
    fn test_plural_retry_precedes_singular() {
        let inv = inventory(&[("pea", 1.0), ("peass", 2.0)]);
        assert_eq!(find_item_price("peas", &inv).map(|i| i.price), Some(2.0));
    }

    #[test]
    fn test_missing_items_excluded_from_total() {
        let result = price_shopping_list(
            &list(&[("milk", 1.0), ("saffron", 1.0), ("bread", 2.0)]),
            &inventory(&[("milk", 3.49), ("bread", 2.25)]),
        );
        assert_eq!(result.total, 7.99);
        assert_eq!(result.not_found, vec!["saffron"]);
        assert_eq!(result.items_found(), 2);
    }

    #[test]
    fn test_total_rounds_unrounded_sum() {
        let result = price_shopping_list(
            &list(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]),
            &inventory(&[("a", 0.333), ("b", 0.333), ("c", 0.333)]),
        );
        assert_eq!(result.line("a").map(|l| l.line_total), Some(0.33));
        assert_eq!(result.total, 1.0);
    }

    #[test]
    fn test_empty_list_costs_nothing() {
        let result = price_shopping_list(&ShoppingList::new(), &inventory(&[("milk", 3.0)]));
        assert_eq!(result, PriceComparisonResult::default());
    }

    #[test]
    fn test_compare_sorts_and_keeps_unavailable_last() {
        let shopping = list(&[("milk", 1.0), ("bread", 1.0)]);
        let source = InMemoryInventorySource::new()
            .with_store("giant", inventory(&[("milk", 4.0), ("bread", 3.0)]))
            .with_store("safeway", inventory(&[("milk", 3.0), ("bread", 2.0)]))
            .with_store("aldi", inventory(&[("milk", 2.0)]));

        let comparison = compare_store_totals(&shopping, &["missing", "giant", "safeway", "aldi"], &source);
        assert_eq!(comparison.store_names(), vec!["aldi", "safeway", "giant", "missing"]);

        let missing = comparison.get("missing").unwrap();
        assert_eq!(missing.total, f64::INFINITY);
        assert_eq!(missing.items_found, 0);
        assert_eq!(missing.items_missing, 2);
        assert_eq!(missing.not_found, vec!["milk", "bread"]);

        let aldi = comparison.get("aldi").unwrap();
        assert_eq!(aldi.items_missing, 1);
        assert_eq!(comparison.cheapest().map(|s| s.store.as_str()), Some("aldi"));
    }

    struct FailingSource;

    impl InventorySource for FailingSource {
        fn load_inventory(&self, store: &str) -> Result<StoreInventory> {
            Err(GroceryError::InventoryFormat {
                store: store.to_string(),
                reason: "corrupt".to_string(),
            })
        }
    }

    #[test]
    fn test_compare_survives_every_store_failing() {
        let comparison = compare_store_totals(&list(&[("milk", 1.0)]), &["a", "b"], &FailingSource);
        assert_eq!(comparison.store_names(), vec!["a", "b"]);
        assert!(comparison.cheapest().is_none());
    }

    #[test]
    fn test_compare_two() {
        let shopping = list(&[("milk", 1.0)]);
        let a = inventory(&[("milk", 3.00)]);
        let b = inventory(&[("milk", 3.50)]);
        let c = inventory(&[("milk", 3.004)]);

        let result = compare_two(&shopping, &a, &b);
        assert_eq!(result.winner, Winner::First);
        assert_eq!(result.savings, 0.5);

        let result = compare_two(&shopping, &b, &a);
        assert_eq!(result.winner, Winner::Second);

        let result = compare_two(&shopping, &a, &c);
        assert_eq!(result.winner, Winner::Tie);
        assert_eq!(result.savings, 0.0);
    }
}
