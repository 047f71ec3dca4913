//! # Ingredient Name Normalizer
//!
//! Canonicalizes ingredient names so that lines referring to the same item
//! collide on one shopping list key. Normalization is deterministic and free
//! of side effects; the tables below are process-wide immutable data.
//!
//! Steps, in order:
//!
//! 1. lowercase and trim
//! 2. remove descriptor words wherever they occur as substrings, then collapse whitespace
//! 3. exact-match synonym replacement
//! 4. drop a trailing `s` from names longer than three characters
//!
//! The trailing-`s` rule is naive: it folds "tomatoes" into "tomatoe" and
//! "glass" into "glas", and normalizing twice is not always a no-op
//! ("green onions" becomes "green onion", which the synonym table then maps to
//! "scallion").

use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Descriptor words stripped from ingredient names, in removal order
pub const DESCRIPTOR_WORDS: [&str; 9] = [
    "fresh", "organic", "ripe", "kosher", "sea", "extra", "virgin", "raw", "whole",
];

/// Exact-match synonym table applied after descriptor removal
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("green onion", "scallion");
    map.insert("spring onion", "scallion");
    map.insert("cilantro", "coriander");
    map.insert("roma tomato", "tomato");
    map.insert("plum tomato", "tomato");
    map
});

/// Normalize a raw ingredient name
///
/// Returns an empty string for empty or whitespace-only input.
///
/// # Examples
///
/// ```rust
/// use grocery_list::normalizer::normalize_ingredient_name;
///
/// assert_eq!(normalize_ingredient_name("Green onion"), "scallion");
/// assert_eq!(normalize_ingredient_name("Fresh Basil"), "basil");
/// assert_eq!(normalize_ingredient_name("carrots"), "carrot");
/// assert_eq!(normalize_ingredient_name("   "), "");
/// ```
pub fn normalize_ingredient_name(raw: &str) -> String {
    let mut name = raw.trim().to_lowercase();
    if name.is_empty() {
        return name;
    }

    for word in DESCRIPTOR_WORDS {
        name = name.replace(word, "");
    }
    name = name.split_whitespace().collect::<Vec<_>>().join(" ");

    if let Some(canonical) = SYNONYMS.get(name.as_str()) {
        name = canonical.to_string();
    }

    if name.chars().count() > 3 && name.ends_with('s') {
        name.pop();
    }

    let normalized = name.trim().to_string();
    trace!("Normalized '{}' -> '{}'", raw, normalized);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize_ingredient_name("  FLOUR  "), "flour");
    }

    #[test]
    fn test_descriptor_removal() {
        assert_eq!(normalize_ingredient_name("fresh organic basil"), "basil");
        assert_eq!(normalize_ingredient_name("extra virgin olive oil"), "olive oil");
        assert_eq!(normalize_ingredient_name("kosher salt"), "salt");
        assert_eq!(normalize_ingredient_name("whole milk"), "milk");
    }

    #[test]
    fn test_descriptor_removal_matches_substrings() {
        // "sea" is removed inside other words too
        assert_eq!(normalize_ingredient_name("seasoning"), "soning");
        // "raw" inside "strawberry"
        assert_eq!(normalize_ingredient_name("strawberry"), "stberry");
    }

    #[test]
    fn test_synonyms() {
        assert_eq!(normalize_ingredient_name("green onion"), "scallion");
        assert_eq!(normalize_ingredient_name("Spring Onion"), "scallion");
        assert_eq!(normalize_ingredient_name("cilantro"), "coriander");
        assert_eq!(normalize_ingredient_name("roma tomato"), "tomato");
        assert_eq!(normalize_ingredient_name("fresh plum tomato"), "tomato");
    }

    #[test]
    fn test_synonyms_are_exact_match_only() {
        // The plural is not in the table, so only the trailing "s" is dropped
        assert_eq!(normalize_ingredient_name("green onions"), "green onion");
    }

    #[test]
    fn test_naive_singularization() {
        assert_eq!(normalize_ingredient_name("carrots"), "carrot");
        assert_eq!(normalize_ingredient_name("Fresh Tomatoes"), "tomatoe");
        assert_eq!(normalize_ingredient_name("eggs"), "egg");
        // Three characters or fewer are left alone
        assert_eq!(normalize_ingredient_name("gas"), "gas");
        assert_eq!(normalize_ingredient_name("peas"), "pea");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_ingredient_name(""), "");
        assert_eq!(normalize_ingredient_name(" \t "), "");
        // Only descriptors leaves nothing behind
        assert_eq!(normalize_ingredient_name("fresh"), "");
    }

    #[test]
    fn test_idempotent_on_common_names() {
        for raw in ["Fresh Tomatoes", "cilantro", "2% milk", "Extra Virgin Olive Oil", "eggs", "green onion"] {
            let once = normalize_ingredient_name(raw);
            assert_eq!(normalize_ingredient_name(&once), once, "input: {raw}");
        }
    }
}
