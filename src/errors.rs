//! # Error Types Module
//!
//! This module defines the error types surfaced by the grocery list engine.
//!
//! Messy recipe text never produces an error: unparseable lines, unknown units
//! and missing inventory items are absorbed with best-effort fallbacks. The
//! variants below cover contract violations by a caller and failures of the
//! recipe/inventory sources.

use std::path::PathBuf;

/// Errors returned by the grocery list engine and its data sources
#[derive(Debug, thiserror::Error)]
pub enum GroceryError {
    /// A recipe handed to the aggregator violates its input contract
    #[error("Invalid recipe: {reason}")]
    InvalidRecipe { reason: String },

    /// A servings multiplier is not a finite, positive number
    #[error("Invalid servings for recipe '{recipe}': {servings}")]
    InvalidServings { recipe: String, servings: f64 },

    /// No inventory data exists for the requested store
    #[error("No inventory for store '{store}' at {}", path.display())]
    InventoryNotFound { store: String, path: PathBuf },

    /// Inventory data exists but cannot be interpreted
    #[error("Malformed inventory for store '{store}': {reason}")]
    InventoryFormat { store: String, reason: String },

    /// A recipe source could not produce a recipe
    #[error("Recipe source '{source_name}' failed: {reason}")]
    RecipeSource { source_name: String, reason: String },

    /// Underlying file system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, GroceryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GroceryError::InvalidServings {
            recipe: "Pasta".to_string(),
            servings: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid servings for recipe 'Pasta': -1");

        let err = GroceryError::InventoryNotFound {
            store: "giant".to_string(),
            path: PathBuf::from("data/stores/giant.csv"),
        };
        assert_eq!(
            err.to_string(),
            "No inventory for store 'giant' at data/stores/giant.csv"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GroceryError = io.into();
        assert!(matches!(err, GroceryError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
