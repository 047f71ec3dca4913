//! # Store Section Categorizer
//!
//! Buckets shopping list items into grocery store sections for display and
//! export. Classification is a substring match of the item name against a
//! fixed keyword table; sections are tried in table order and the first match
//! wins, so "eggplant" is Produce (checked before Dairy's "egg") and "steak"
//! is Meat & Seafood (checked before Beverages' "tea").
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::categorizer::{categorize_item, Category};
//!
//! assert_eq!(categorize_item("tomato"), Category::Produce);
//! assert_eq!(categorize_item("parmesan"), Category::Dairy);
//! assert_eq!(categorize_item("dragon fruit jam"), Category::Other);
//! ```

use crate::ingredient_model::ShoppingList;
use log::{debug, trace};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Grocery store section. Ordering follows the keyword table, with
/// [`Category::Other`] last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Produce,
    Dairy,
    MeatSeafood,
    CannedGoods,
    PastaGrains,
    SpicesSeasonings,
    Baking,
    CondimentsSauces,
    Frozen,
    Beverages,
    /// Items matching no keyword
    Other,
}

/// Section keywords in match order
const CATEGORY_KEYWORDS: [(Category, &[&str]); 10] = [
    (
        Category::Produce,
        &[
            "tomato", "lettuce", "onion", "scallion", "garlic", "carrot", "celery",
            "bell pepper", "jalapeno", "cucumber", "potato", "broccoli", "spinach",
            "mushroom", "zucchini", "squash", "eggplant", "avocado", "lemon", "lime",
            "apple", "banana", "berr", "melon", "ginger", "parsley",
        ],
    ),
    (
        Category::Dairy,
        &["milk", "cheese", "butter", "yogurt", "cream", "egg", "parmesan", "mozzarella"],
    ),
    (
        Category::MeatSeafood,
        &[
            "chicken", "beef", "steak", "pork", "turkey", "fish", "salmon", "shrimp",
            "bacon", "sausage", "ham",
        ],
    ),
    (
        Category::CannedGoods,
        &["canned", "bean", "corn", "soup", "broth", "tuna", "chickpea"],
    ),
    (
        Category::PastaGrains,
        &[
            "pasta", "spaghetti", "penne", "rice", "flour", "bread", "tortilla", "noodle",
            "oat", "quinoa",
        ],
    ),
    (
        Category::SpicesSeasonings,
        &[
            "salt", "pepper", "cumin", "paprika", "oregano", "basil", "coriander",
            "cinnamon", "thyme", "chili powder", "nutmeg",
        ],
    ),
    (
        Category::Baking,
        &[
            "sugar", "baking soda", "baking powder", "vanilla", "yeast", "cocoa",
            "chocolate chip",
        ],
    ),
    (
        Category::CondimentsSauces,
        &["ketchup", "mustard", "mayonnaise", "sauce", "vinegar", "oil", "honey", "salsa"],
    ),
    (Category::Frozen, &["frozen"]),
    (
        Category::Beverages,
        &["juice", "coffee", "tea", "soda", "water", "wine", "beer"],
    ),
];

impl Category {
    /// Every category in display order
    pub const ALL: [Category; 11] = [
        Category::Produce,
        Category::Dairy,
        Category::MeatSeafood,
        Category::CannedGoods,
        Category::PastaGrains,
        Category::SpicesSeasonings,
        Category::Baking,
        Category::CondimentsSauces,
        Category::Frozen,
        Category::Beverages,
        Category::Other,
    ];

    /// Display name of the section
    pub fn name(self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Dairy => "Dairy",
            Category::MeatSeafood => "Meat & Seafood",
            Category::CannedGoods => "Canned Goods",
            Category::PastaGrains => "Pasta & Grains",
            Category::SpicesSeasonings => "Spices & Seasonings",
            Category::Baking => "Baking",
            Category::CondimentsSauces => "Condiments & Sauces",
            Category::Frozen => "Frozen",
            Category::Beverages => "Beverages",
            Category::Other => "Other",
        }
    }

    /// Keywords that select this category; empty for [`Category::Other`]
    pub fn keywords(self) -> &'static [&'static str] {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Classify one item name
pub fn categorize_item(name: &str) -> Category {
    let name = name.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS.iter() {
        if let Some(keyword) = keywords.iter().find(|k| name.contains(*k)) {
            trace!("'{}' matched '{}' -> {}", name, keyword, category);
            return *category;
        }
    }

    trace!("'{}' matched no keyword -> Other", name);
    Category::Other
}

/// Group a shopping list by store section
///
/// Items keep their shopping list order within each section. Sections with no
/// items are left out. The input list is not modified.
///
/// # Examples
///
/// ```rust
/// use grocery_list::categorizer::{group_items_by_category, Category};
/// use grocery_list::ingredient_model::{AggregatedItem, ShoppingList};
///
/// let list: ShoppingList = vec![
///     ("tomato", AggregatedItem::new(6.0, "count", "Pasta")),
///     ("pasta", AggregatedItem::new(1.0, "lb", "Pasta")),
/// ]
/// .into_iter()
/// .collect();
///
/// let grouped = group_items_by_category(&list);
/// assert_eq!(grouped.len(), 2);
/// assert!(grouped[&Category::Produce].contains("tomato"));
/// assert!(grouped[&Category::PastaGrains].contains("pasta"));
/// ```
pub fn group_items_by_category(list: &ShoppingList) -> BTreeMap<Category, ShoppingList> {
    let mut grouped: BTreeMap<Category, ShoppingList> = BTreeMap::new();

    for (name, item) in list.iter() {
        grouped
            .entry(categorize_item(name))
            .or_default()
            .insert(name, item.clone());
    }

    debug!(
        "Grouped {} items into {} categories",
        list.len(),
        grouped.len()
    );
    grouped
}
