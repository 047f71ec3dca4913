//! # Store Inventory Sources
//!
//! A store inventory is anything that can answer "what does this store charge
//! for an item". The [`InventorySource`] trait is that capability; the store
//! comparator only ever talks to the trait.
//!
//! ## Adapters
//!
//! - [`CsvInventorySource`]: one `<store>.csv` file per store in a data directory
//! - [`InMemoryInventorySource`]: inventories built in code, for tests and embedding
//!
//! ## CSV layout
//!
//! ```text
//! item,brand,price,size,unit,category,date_checked
//! tomato,Generic,0.50,1,each,produce,2025-10-01
//! "cheese, cheddar",Tillamook,4.99,8,oz,dairy,2025-10-01
//! ```
//!
//! The `item` (or `name`) and `price` columns are required; the others are
//! optional and passed through. Fields may be double-quoted, with `""` for a
//! literal quote. Rows with an empty item or a price that is not a
//! non-negative number are skipped with a warning.

use crate::errors::{GroceryError, Result};
use crate::ingredient_model::{InventoryItem, StoreInventory};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Date format of the `date_checked` column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A source of per-store price tables
pub trait InventorySource {
    /// Load the inventory of one store
    ///
    /// # Errors
    ///
    /// [`GroceryError::InventoryNotFound`] when the source has no data for the
    /// store; other variants when the data exists but cannot be read.
    fn load_inventory(&self, store: &str) -> Result<StoreInventory>;
}

/// Inventories read from `<data_dir>/<store>.csv`
#[derive(Debug, Clone)]
pub struct CsvInventorySource {
    data_dir: PathBuf,
}

/// Inventories held in memory, keyed by lowercase store name
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventorySource {
    stores: HashMap<String, StoreInventory>,
}

/// Positions of the known columns in a CSV header
#[derive(Debug, Default)]
struct ColumnMap {
    item: usize,
    price: usize,
    brand: Option<usize>,
    size: Option<usize>,
    unit: Option<usize>,
    category: Option<usize>,
    date_checked: Option<usize>,
}

impl CsvInventorySource {
    /// Create a source reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding the store files
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing a store
    pub fn store_path(&self, store: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.csv", store.trim().to_lowercase()))
    }
}

impl InventorySource for CsvInventorySource {
    fn load_inventory(&self, store: &str) -> Result<StoreInventory> {
        let store_key = store.trim().to_lowercase();
        if store_key.is_empty() || store_key.contains(['/', '\\']) || store_key.contains("..") {
            return Err(GroceryError::InventoryFormat {
                store: store.to_string(),
                reason: "store name is not a plain file name".to_string(),
            });
        }

        let path = self.store_path(&store_key);
        debug!("Loading inventory for '{}' from {}", store_key, path.display());

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GroceryError::InventoryNotFound {
                store: store_key.clone(),
                path: path.clone(),
            },
            _ => GroceryError::Io(e),
        })?;

        let inventory = parse_inventory_csv(&store_key, &content)?;
        info!(
            "Loaded {} inventory items for '{}'",
            inventory.len(),
            store_key
        );
        Ok(inventory)
    }
}

impl InMemoryInventorySource {
    /// Create a source with no stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a store's inventory
    pub fn with_store(mut self, store: &str, inventory: StoreInventory) -> Self {
        self.insert(store, inventory);
        self
    }

    /// Add or replace a store's inventory; the name is matched case-insensitively
    pub fn insert(&mut self, store: &str, inventory: StoreInventory) {
        self.stores.insert(store.trim().to_lowercase(), inventory);
    }
}

impl InventorySource for InMemoryInventorySource {
    fn load_inventory(&self, store: &str) -> Result<StoreInventory> {
        let key = store.trim().to_lowercase();
        self.stores
            .get(&key)
            .cloned()
            .ok_or_else(|| GroceryError::InventoryNotFound {
                store: key.clone(),
                path: PathBuf::from(format!("memory:{key}")),
            })
    }
}

/// Parse the text of a store CSV file
///
/// # Errors
///
/// [`GroceryError::InventoryFormat`] when the file is empty or its header
/// lacks an item or price column.
pub fn parse_inventory_csv(store: &str, content: &str) -> Result<StoreInventory> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or_else(|| GroceryError::InventoryFormat {
        store: store.to_string(),
        reason: "file is empty".to_string(),
    })?;
    let columns = ColumnMap::from_header(store, &split_csv_row(header))?;

    let mut inventory = StoreInventory::new();
    for (index, line) in lines {
        let row_number = index + 1;
        let fields = split_csv_row(line);

        let name = field(&fields, Some(columns.item)).unwrap_or_default();
        if name.is_empty() {
            warn!("{}: skipping row {} with no item name", store, row_number);
            continue;
        }

        let raw_price = field(&fields, Some(columns.price)).unwrap_or_default();
        let price = match raw_price.trim_start_matches('$').parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => price,
            _ => {
                warn!(
                    "{}: skipping row {} ('{}') with invalid price '{}'",
                    store, row_number, name, raw_price
                );
                continue;
            }
        };

        let date_checked = field(&fields, columns.date_checked).and_then(|raw| {
            match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    debug!("{}: ignoring date '{}' on row {}: {}", store, raw, row_number, e);
                    None
                }
            }
        });

        inventory.insert(
            &name,
            InventoryItem {
                price,
                brand: field(&fields, columns.brand),
                size: field(&fields, columns.size),
                unit: field(&fields, columns.unit),
                category: field(&fields, columns.category),
                date_checked,
            },
        );
    }

    Ok(inventory)
}

impl ColumnMap {
    fn from_header(store: &str, header: &[String]) -> Result<Self> {
        let position = |names: &[&str]| {
            header
                .iter()
                .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
        };

        let missing = |column: &str| GroceryError::InventoryFormat {
            store: store.to_string(),
            reason: format!("header has no '{column}' column"),
        };

        Ok(Self {
            item: position(&["item", "name"]).ok_or_else(|| missing("item"))?,
            price: position(&["price"]).ok_or_else(|| missing("price"))?,
            brand: position(&["brand"]),
            size: position(&["size"]),
            unit: position(&["unit"]),
            category: position(&["category"]),
            date_checked: position(&["date_checked"]),
        })
    }
}

/// Trimmed, non-empty value of an optional column
fn field(fields: &[String], column: Option<usize>) -> Option<String> {
    let value = fields.get(column?)?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Split one CSV row into fields, honouring double quotes
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const SAMPLE: &str = "item,brand,price,size,unit,category,date_checked\n\
        tomato,Generic,0.50,1,each,produce,2025-10-01\n\
        \"cheese, cheddar\",Tillamook,4.99,8,oz,dairy,2025-10-02\n\
        Flour,King Arthur,$3.49,5,lb,baking,\n";

    #[test]
    fn test_split_csv_row() {
        assert_eq!(split_csv_row("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(split_csv_row("\"a, b\",c"), vec!["a, b", "c"]);
        assert_eq!(split_csv_row("\"say \"\"hi\"\"\",x"), vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn test_parse_inventory_csv() {
        let inventory = parse_inventory_csv("safeway", SAMPLE).unwrap();
        assert_eq!(inventory.len(), 3);

        let tomato = inventory.get("tomato").unwrap();
        assert_eq!(tomato.price, 0.5);
        assert_eq!(tomato.brand.as_deref(), Some("Generic"));
        assert_eq!(tomato.date_checked, NaiveDate::from_ymd_opt(2025, 10, 1));

        let cheese = inventory.get("cheese, cheddar").unwrap();
        assert_eq!(cheese.unit.as_deref(), Some("oz"));

        let flour = inventory.get("flour").unwrap();
        assert_eq!(flour.price, 3.49);
        assert_eq!(flour.date_checked, None);
    }

    #[test]
    fn test_columns_found_in_any_order() {
        let csv = "price,Name\n1.25,Onion\n";
        let inventory = parse_inventory_csv("giant", csv).unwrap();
        assert_eq!(inventory.get("onion").map(|i| i.price), Some(1.25));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = "item,price\nmilk,abc\n,1.00\neggs,-2\nbread,2.50\n";
        let inventory = parse_inventory_csv("giant", csv).unwrap();
        assert_eq!(inventory.len(), 1);
        assert!(inventory.get("bread").is_some());
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse_inventory_csv("giant", "item,brand\nmilk,Horizon\n").unwrap_err();
        assert!(matches!(err, GroceryError::InventoryFormat { .. }));
        assert!(err.to_string().contains("'price'"));

        let err = parse_inventory_csv("giant", "\n\n").unwrap_err();
        assert!(matches!(err, GroceryError::InventoryFormat { .. }));
    }

    #[test]
    fn test_csv_source_reads_store_file() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut file = File::create(dir.path().join("safeway.csv"))?;
        file.write_all(SAMPLE.as_bytes())?;

        let source = CsvInventorySource::new(dir.path());
        let inventory = source.load_inventory("Safeway")?;
        assert_eq!(inventory.len(), 3);
        Ok(())
    }

    #[test]
    fn test_csv_source_missing_store() {
        let dir = tempdir().unwrap();
        let source = CsvInventorySource::new(dir.path());

        let err = source.load_inventory("giant").unwrap_err();
        match err {
            GroceryError::InventoryNotFound { store, path } => {
                assert_eq!(store, "giant");
                assert!(path.ends_with("giant.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_source_rejects_path_like_names() {
        let source = CsvInventorySource::new("data/stores");
        for name in ["../secrets", "a/b", "", "  "] {
            assert!(matches!(
                source.load_inventory(name),
                Err(GroceryError::InventoryFormat { .. })
            ));
        }
    }

    #[test]
    fn test_in_memory_source() {
        let inventory: StoreInventory = vec![("tomato", InventoryItem::priced(0.5))]
            .into_iter()
            .collect();
        let source = InMemoryInventorySource::new().with_store("Giant", inventory);

        assert_eq!(source.load_inventory("giant").unwrap().len(), 1);
        assert!(matches!(
            source.load_inventory("safeway"),
            Err(GroceryError::InventoryNotFound { .. })
        ));
    }
}
