//! # Recipe Sources
//!
//! Recipes reach the aggregator through the [`RecipeSource`] trait: anything
//! that can produce named lists of raw ingredient lines. Two adapters are
//! provided, picked by file extension with [`recipe_source_for_path`]:
//!
//! - [`JsonRecipeFile`]: a `.json` file holding one recipe object or an array of them
//! - [`PlainTextRecipe`]: a `.txt` recipe whose first non-empty line is its name
//!
//! ## JSON layout
//!
//! ```json
//! [
//!   { "name": "Cookies", "ingredients": ["2 cups flour", "1 cup sugar"] },
//!   { "name": "Bread", "ingredients": ["1 cup flour"] }
//! ]
//! ```

use crate::errors::{GroceryError, Result};
use crate::ingredient_model::Recipe;
use crate::ingredient_parser::extract_ingredient_lines;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name given to a text recipe with no title line
pub const UNTITLED_RECIPE: &str = "Untitled Recipe";

/// A source of recipes
pub trait RecipeSource {
    /// Load every recipe the source holds
    fn load_recipes(&self) -> Result<Vec<Recipe>>;
}

/// Recipes stored as JSON
#[derive(Debug, Clone)]
pub struct JsonRecipeFile {
    path: PathBuf,
}

/// A single recipe written as plain text
#[derive(Debug, Clone)]
pub enum PlainTextRecipe {
    /// Text read from a file on each load
    File(PathBuf),
    /// Text held in memory
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    Many(Vec<Recipe>),
    One(Recipe),
}

impl JsonRecipeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecipeSource for JsonRecipeFile {
    fn load_recipes(&self) -> Result<Vec<Recipe>> {
        let content = read_source(&self.path)?;

        let recipes = match serde_json::from_str::<RecipeDocument>(&content)? {
            RecipeDocument::Many(recipes) => recipes,
            RecipeDocument::One(recipe) => vec![recipe],
        };

        if let Some(unnamed) = recipes.iter().position(|r| r.name.trim().is_empty()) {
            return Err(GroceryError::RecipeSource {
                source_name: self.path.display().to_string(),
                reason: format!("recipe #{} has an empty name", unnamed + 1),
            });
        }

        info!(
            "Loaded {} recipes from {}",
            recipes.len(),
            self.path.display()
        );
        Ok(recipes)
    }
}

impl PlainTextRecipe {
    /// Recipe read from a text file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        PlainTextRecipe::File(path.into())
    }

    /// Recipe from text already in memory
    pub fn from_text(text: impl Into<String>) -> Self {
        PlainTextRecipe::Text(text.into())
    }

    /// Build a recipe from its text
    pub fn parse(text: &str) -> Recipe {
        let name = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or(UNTITLED_RECIPE);

        let ingredients = extract_ingredient_lines(text);
        if ingredients.is_empty() {
            warn!("No ingredient lines found in recipe '{}'", name);
        }
        debug!("Parsed text recipe '{}' with {} lines", name, ingredients.len());

        Recipe::new(name, ingredients)
    }
}

impl RecipeSource for PlainTextRecipe {
    fn load_recipes(&self) -> Result<Vec<Recipe>> {
        let recipe = match self {
            PlainTextRecipe::File(path) => Self::parse(&read_source(path)?),
            PlainTextRecipe::Text(text) => Self::parse(text),
        };
        Ok(vec![recipe])
    }
}

/// Choose a recipe source for a file by its extension
///
/// # Errors
///
/// [`GroceryError::RecipeSource`] for extensions other than `json` and `txt`.
pub fn recipe_source_for_path(path: &Path) -> Result<Box<dyn RecipeSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonRecipeFile::new(path))),
        Some("txt") => Ok(Box::new(PlainTextRecipe::from_path(path))),
        _ => Err(GroceryError::RecipeSource {
            source_name: path.display().to_string(),
            reason: "unsupported recipe format, expected .json or .txt".to_string(),
        }),
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GroceryError::RecipeSource {
            source_name: path.display().to_string(),
            reason: "file not found".to_string(),
        },
        _ => GroceryError::Io(e),
    })
}
