use anyhow::{bail, Context, Result};
use grocery_list::categorizer::group_items_by_category;
use grocery_list::config::GroceryConfig;
use grocery_list::ingredient_model::format_quantity;
use grocery_list::inventory_source::CsvInventorySource;
use grocery_list::logging::init_logging;
use grocery_list::recipe_source::recipe_source_for_path;
use grocery_list::shopping_list::compile_shopping_list;
use grocery_list::store_pricing::compare_store_totals;
use log::info;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    let config = GroceryConfig::from_env();
    init_logging(&config.logging);

    let mut args = env::args().skip(1);
    let Some(recipe_path) = args.next().map(PathBuf::from) else {
        bail!("usage: grocery_list <recipes.json|recipe.txt> [store...]");
    };
    let requested: Vec<String> = args.collect();
    let stores = if requested.is_empty() {
        config.preferred_stores.clone()
    } else {
        requested
    };

    info!("Starting grocery list for {}", recipe_path.display());

    let source = recipe_source_for_path(&recipe_path)
        .with_context(|| format!("Cannot read recipes from {}", recipe_path.display()))?;
    let recipes = source
        .load_recipes()
        .with_context(|| format!("Failed to load recipes from {}", recipe_path.display()))?;

    let servings: HashMap<String, f64> = recipes
        .iter()
        .map(|r| (r.name.clone(), config.default_servings))
        .collect();
    let list = compile_shopping_list(&recipes, &servings).context("Failed to compile shopping list")?;

    println!("Shopping list for: {}", list.recipes().join(", "));
    for (category, items) in group_items_by_category(&list) {
        println!("\n{}", category.name().to_uppercase());
        for (name, item) in items.iter() {
            println!(
                "  [ ] {} {} {}",
                format_quantity(item.quantity),
                item.unit,
                name
            );
            if let Some(notes) = &item.notes {
                println!("      note: {}", notes);
            }
        }
    }

    let inventories = CsvInventorySource::new(&config.store_data_dir);
    let comparison = compare_store_totals(&list, stores.as_slice(), &inventories);

    println!("\nStore comparison:");
    print!("{}", comparison);

    match comparison.cheapest() {
        Some(best) => {
            println!("\nCheapest: {} at ${:.2}", best.store, best.total);
            if !best.not_found.is_empty() {
                println!("  Not carried: {}", best.not_found.join(", "));
            }
        }
        None => println!(
            "\nNo store inventories found in {}",
            config.store_data_dir.display()
        ),
    }

    Ok(())
}
