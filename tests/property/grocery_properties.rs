use grocery_list::categorizer::group_items_by_category;
use grocery_list::ingredient_model::{AggregatedItem, InventoryItem, ShoppingList, StoreInventory};
use grocery_list::ingredient_parser::{parse_ingredient_line, PREPARATION_KEYWORDS};
use grocery_list::inventory_source::InMemoryInventorySource;
use grocery_list::normalizer::{normalize_ingredient_name, DESCRIPTOR_WORDS};
use grocery_list::store_pricing::compare_store_totals;
use grocery_list::unit_conversion::convert_units;
use proptest::prelude::*;

const UNITS: [&str; 14] = [
    "cup", "cups", "tbsp", "tablespoon", "tsp", "teaspoon", "lb", "pound", "oz", "ounce",
    "each", "head", "can", "count",
];

const VOLUME: [&str; 6] = ["cup", "cups", "tbsp", "tablespoon", "tsp", "teaspoon"];
const WEIGHT: [&str; 4] = ["lb", "pound", "oz", "ounce"];

fn has_keyword(text: &str) -> bool {
    PREPARATION_KEYWORDS.iter().any(|k| text.contains(k))
}

proptest! {
    #[test]
    fn three_tokens_give_unit_and_item(
        quantity in 0u32..1000,
        unit in "[a-z]{1,8}",
        item in "[a-z]{2,8}( [a-z]{2,8}){0,2}",
    ) {
        prop_assume!(!has_keyword(&item));
        let parsed = parse_ingredient_line(&format!("{quantity} {unit} {item}"));
        prop_assert_eq!(parsed.quantity, f64::from(quantity));
        prop_assert_eq!(parsed.unit, unit);
        prop_assert_eq!(parsed.item, item);
    }

    #[test]
    fn two_tokens_default_to_each(quantity in 0u32..1000, item in "[a-z]{2,8}") {
        prop_assume!(!has_keyword(&item));
        let parsed = parse_ingredient_line(&format!("{quantity} {item}"));
        prop_assert_eq!(parsed.quantity, f64::from(quantity));
        prop_assert_eq!(parsed.unit, "each");
        prop_assert_eq!(parsed.item, item);
    }

    #[test]
    fn parsing_never_panics(line in ".{0,80}") {
        let parsed = parse_ingredient_line(&line);
        prop_assert!(parsed.quantity >= 0.0);
    }

    #[test]
    fn normalize_is_idempotent(
        descriptor in prop::option::of(prop::sample::select(DESCRIPTOR_WORDS.to_vec())),
        base in "[a-z]{3,8}",
        plural in any::<bool>(),
        shout in any::<bool>(),
    ) {
        prop_assume!(!base.ends_with('s'));
        prop_assume!(base != "cilantro");
        prop_assume!(!DESCRIPTOR_WORDS.iter().any(|d| base.contains(d)));

        let mut raw = match descriptor {
            Some(d) => format!("{d} {base}"),
            None => base.clone(),
        };
        if plural {
            raw.push('s');
        }
        if shout {
            raw = raw.to_uppercase();
        }

        let once = normalize_ingredient_name(&raw);
        prop_assert_eq!(&normalize_ingredient_name(&once), &once);
    }

    #[test]
    fn convert_identity(quantity in 0.0f64..1e6, index in 0usize..UNITS.len()) {
        let unit = UNITS[index];
        prop_assert_eq!(convert_units(quantity, unit, unit), quantity);
    }

    #[test]
    fn convert_round_trips_within_family(
        quantity in 0.0f64..1000.0,
        volume in any::<bool>(),
        a in 0usize..6,
        b in 0usize..6,
    ) {
        let family: &[&str] = if volume { &VOLUME } else { &WEIGHT };
        let from = family[a % family.len()];
        let to = family[b % family.len()];

        let back = convert_units(convert_units(quantity, from, to), to, from);
        // A cup is 48 teaspoons, so 0.005 cup of rounding is 0.24 teaspoon
        prop_assert!((back - quantity).abs() <= 0.25, "{} {} -> {} -> {}", quantity, from, to, back);
    }

    #[test]
    fn categorize_never_drops_items(names in prop::collection::vec("[a-z]{1,10}( [a-z]{1,10})?", 0..30)) {
        let list: ShoppingList = names
            .iter()
            .map(|name| (name.as_str(), AggregatedItem::new(1.0, "each", "Test")))
            .collect();

        let grouped = group_items_by_category(&list);
        let total: usize = grouped.values().map(ShoppingList::len).sum();
        prop_assert_eq!(total, list.len());
        prop_assert!(grouped.values().all(|items| !items.is_empty()));
    }

    #[test]
    fn comparison_is_sorted_with_missing_store_last(
        prices in prop::collection::vec(prop::collection::vec(0.0f64..20.0, 3), 1..6),
    ) {
        let list: ShoppingList = ["milk", "bread", "eggs"]
            .iter()
            .map(|name| (*name, AggregatedItem::new(2.0, "each", "Test")))
            .collect();

        let mut source = InMemoryInventorySource::new();
        let mut stores = vec!["closed".to_string()];
        for (i, store_prices) in prices.iter().enumerate() {
            let inventory: StoreInventory = ["milk", "bread", "eggs"]
                .iter()
                .zip(store_prices)
                .map(|(name, price)| (*name, InventoryItem::priced(*price)))
                .collect();
            let name = format!("store{i}");
            source.insert(&name, inventory);
            stores.push(name);
        }

        let comparison = compare_store_totals(&list, stores.as_slice(), &source);
        let totals: Vec<f64> = comparison.iter().map(|s| s.total).collect();
        prop_assert!(totals.windows(2).all(|w| w[0] <= w[1]));

        let last = comparison.iter().last().unwrap();
        prop_assert_eq!(last.store.as_str(), "closed");
        prop_assert_eq!(last.items_missing, list.len());
    }
}
