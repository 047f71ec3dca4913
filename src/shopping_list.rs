//! # Shopping List Aggregation
//!
//! Merges the ingredients of many recipes into one [`ShoppingList`]. Each line
//! is parsed, its item name normalized and its quantity scaled by the recipe's
//! servings multiplier before being folded into the list.
//!
//! ## Merge policy
//!
//! - The first unit recorded for an item is authoritative.
//! - A contribution in the same unit (exact string match) is added directly.
//! - A contribution in another unit is converted when possible and added
//!   either way; a note records the mismatch. When no conversion exists the
//!   raw magnitude is summed, which can produce meaningless totals such as
//!   cups plus pounds. The note is what tells a reader about it.
//! - Contributing recipe names are recorded once each, in first-seen order.

use crate::errors::{GroceryError, Result};
use crate::ingredient_model::{AggregatedItem, ParsedIngredient, Recipe, ShoppingList};
use crate::ingredient_parser::parse_ingredient_line;
use crate::normalizer::normalize_ingredient_name;
use crate::unit_conversion::{round_to, try_convert_units};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Servings multiplier used for recipes missing from the servings map
pub const DEFAULT_SERVINGS: f64 = 1.0;

/// Decimal places kept on aggregated quantities
pub const QUANTITY_PRECISION: i32 = 3;

/// Aggregate the ingredients of several recipes into one shopping list
///
/// `servings_by_recipe` maps recipe names to multipliers; recipes missing
/// from it use [`DEFAULT_SERVINGS`]. The result lists items in the order they
/// were first seen, with quantities rounded to three decimals.
///
/// # Errors
///
/// Returns [`GroceryError::InvalidRecipe`] for a recipe with an empty name and
/// [`GroceryError::InvalidServings`] for a multiplier that is not a finite
/// positive number. Inputs are validated before anything is aggregated.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_model::Recipe;
/// use grocery_list::shopping_list::compile_shopping_list;
/// use std::collections::HashMap;
///
/// let recipes = vec![
///     Recipe::new("Cookies", ["2 cups flour"]),
///     Recipe::new("Bread", ["1 cups flour"]),
/// ];
/// let servings = HashMap::from([("Cookies".to_string(), 1.0), ("Bread".to_string(), 1.0)]);
///
/// let list = compile_shopping_list(&recipes, &servings)?;
/// let flour = list.get("flour").unwrap();
/// assert_eq!(flour.quantity, 3.0);
/// assert_eq!(flour.recipes, vec!["Cookies", "Bread"]);
/// # Ok::<(), grocery_list::errors::GroceryError>(())
/// ```
pub fn compile_shopping_list(
    recipes: &[Recipe],
    servings_by_recipe: &HashMap<String, f64>,
) -> Result<ShoppingList> {
    info!("Compiling shopping list from {} recipes", recipes.len());

    let mut batch = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let servings = servings_by_recipe
            .get(&recipe.name)
            .copied()
            .unwrap_or(DEFAULT_SERVINGS);
        validate_recipe(recipe, servings)?;
        batch.push((recipe, servings));
    }

    let mut list = ShoppingList::new();
    for (recipe, servings) in batch {
        list.merge_recipe(recipe, servings);
    }
    list.round_quantities(QUANTITY_PRECISION);

    info!(
        "Compiled shopping list with {} items ({} with unit notes)",
        list.len(),
        list.items_with_notes().len()
    );
    Ok(list)
}

/// Sum several `(quantity, unit)` contributions in the first entry's unit
///
/// Contributions in other units are converted when possible and summed as-is
/// otherwise. An empty slice yields `(0.0, "unknown")`.
///
/// # Examples
///
/// ```rust
/// use grocery_list::shopping_list::calculate_total_quantity;
///
/// let (quantity, unit) = calculate_total_quantity(&[(2.0, "cups"), (8.0, "tbsp")]);
/// assert_eq!(quantity, 2.5);
/// assert_eq!(unit, "cups");
/// ```
pub fn calculate_total_quantity<S: AsRef<str>>(entries: &[(f64, S)]) -> (f64, String) {
    let Some((_, base_unit)) = entries.first() else {
        return (0.0, "unknown".to_string());
    };
    let base_unit = base_unit.as_ref();

    let total: f64 = entries
        .iter()
        .map(|(quantity, unit)| {
            let unit = unit.as_ref();
            if unit == base_unit {
                *quantity
            } else {
                try_convert_units(*quantity, unit, base_unit).unwrap_or(*quantity)
            }
        })
        .sum();

    (round_to(total, QUANTITY_PRECISION), base_unit.to_string())
}

fn validate_recipe(recipe: &Recipe, servings: f64) -> Result<()> {
    if recipe.name.trim().is_empty() {
        return Err(GroceryError::InvalidRecipe {
            reason: "recipe name must not be empty".to_string(),
        });
    }
    if !servings.is_finite() || servings <= 0.0 {
        return Err(GroceryError::InvalidServings {
            recipe: recipe.name.clone(),
            servings,
        });
    }
    Ok(())
}

impl ShoppingList {
    /// Fold one parsed ingredient into the list under its normalized name
    ///
    /// The quantity is used as given; scale it before calling. Returns `false`
    /// when the item normalizes to an empty name and nothing was added.
    pub fn add_ingredient(&mut self, ingredient: &ParsedIngredient, recipe: &str) -> bool {
        let key = normalize_ingredient_name(&ingredient.item);
        if key.is_empty() {
            debug!("Skipping ingredient with empty item name from '{}'", recipe);
            return false;
        }

        self.merge(&key, ingredient.quantity, &ingredient.unit, recipe);
        true
    }

    /// Add every ingredient of a recipe, scaled by `servings`
    ///
    /// # Errors
    ///
    /// Fails without modifying the list when the recipe name is empty or
    /// `servings` is not a finite positive number.
    pub fn add_recipe(&mut self, recipe: &Recipe, servings: f64) -> Result<()> {
        validate_recipe(recipe, servings)?;
        self.merge_recipe(recipe, servings);
        Ok(())
    }

    /// Remove an item, normalizing the given name first
    pub fn remove_item(&mut self, name: &str) -> bool {
        self.remove(&normalize_ingredient_name(name)).is_some()
    }

    /// Round every quantity to `places` decimals
    pub fn round_quantities(&mut self, places: i32) {
        for (_, item) in self.iter_mut() {
            item.quantity = round_to(item.quantity, places);
        }
    }

    fn merge_recipe(&mut self, recipe: &Recipe, servings: f64) {
        debug!(
            "Adding recipe '{}' ({} lines) x{}",
            recipe.name,
            recipe.ingredients.len(),
            servings
        );

        for line in &recipe.ingredients {
            let mut parsed = parse_ingredient_line(line);
            parsed.quantity *= servings;
            self.add_ingredient(&parsed, &recipe.name);
        }
    }

    fn merge(&mut self, key: &str, quantity: f64, unit: &str, recipe: &str) {
        if let Some(existing) = self.get_mut(key) {
            if existing.unit == unit {
                existing.quantity += quantity;
            } else {
                let (added, outcome) = match try_convert_units(quantity, unit, &existing.unit) {
                    Some(converted) => {
                        debug!(
                            "Converted {} {} of '{}' to {} {}",
                            quantity, unit, key, converted, existing.unit
                        );
                        (converted, "converted")
                    }
                    None => {
                        warn!(
                            "Cannot convert '{}' to '{}' for '{}', summing {} as-is",
                            unit, existing.unit, key, quantity
                        );
                        (quantity, "not convertible, summed as-is")
                    }
                };
                existing.quantity += added;
                let note = format!(
                    "unit mismatch kept as '{}', saw '{}' ({})",
                    existing.unit, unit, outcome
                );
                existing.push_note(&note);
            }
            existing.add_recipe(recipe);
            return;
        }

        self.insert(key, AggregatedItem::new(quantity, unit, recipe));
    }
}
