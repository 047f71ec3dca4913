//! # Configuration Module
//!
//! Runtime settings for the grocery list binary: where store inventories live,
//! which stores to compare by default, the default servings multiplier and
//! how logs are written. Values come from the environment (and a `.env` file
//! when present); anything unset or unparseable falls back to the defaults
//! below.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `GROCERY_STORE_DIR` | directory of `<store>.csv` inventories |
//! | `GROCERY_STORES` | comma separated store names to compare |
//! | `GROCERY_DEFAULT_SERVINGS` | servings multiplier for every recipe |
//! | `GROCERY_LOG_FORMAT` | `text` or `json` |
//! | `GROCERY_LOG_LEVEL` | default level when `RUST_LOG` is unset |

pub use crate::shopping_list::DEFAULT_SERVINGS;
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Defaults
pub const DEFAULT_STORE_DATA_DIR: &str = "data/stores";
pub const DEFAULT_PREFERRED_STORES: [&str; 3] = ["safeway", "giant", "trader_joes"];
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment variable names
pub const ENV_STORE_DIR: &str = "GROCERY_STORE_DIR";
pub const ENV_STORES: &str = "GROCERY_STORES";
pub const ENV_DEFAULT_SERVINGS: &str = "GROCERY_DEFAULT_SERVINGS";
pub const ENV_LOG_FORMAT: &str = "GROCERY_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "GROCERY_LOG_LEVEL";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines through `env_logger`
    #[default]
    Text,
    /// One JSON object per event through `tracing-subscriber`
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter used when `RUST_LOG` is not set (e.g., "info", "grocery_list=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Configuration for the grocery list binary
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryConfig {
    /// Directory holding one `<store>.csv` inventory per store
    pub store_data_dir: PathBuf,
    /// Stores compared when none are named on the command line
    pub preferred_stores: Vec<String>,
    /// Servings multiplier applied to every recipe
    pub default_servings: f64,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for GroceryConfig {
    fn default() -> Self {
        Self {
            store_data_dir: PathBuf::from(DEFAULT_STORE_DATA_DIR),
            preferred_stores: DEFAULT_PREFERRED_STORES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_servings: DEFAULT_SERVINGS,
            logging: LoggingConfig::default(),
        }
    }
}

impl GroceryConfig {
    /// Load configuration from the process environment, reading `.env` first
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(dir) = value(ENV_STORE_DIR) {
            config.store_data_dir = PathBuf::from(dir);
        }

        if let Some(stores) = value(ENV_STORES) {
            let stores: Vec<String> = stores
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
            if stores.is_empty() {
                warn!("{} has no store names, using defaults", ENV_STORES);
            } else {
                config.preferred_stores = stores;
            }
        }

        if let Some(raw) = value(ENV_DEFAULT_SERVINGS) {
            match raw.parse::<f64>() {
                Ok(servings) if servings.is_finite() && servings > 0.0 => {
                    config.default_servings = servings;
                }
                _ => warn!(
                    "Ignoring {}='{}': expected a positive number",
                    ENV_DEFAULT_SERVINGS, raw
                ),
            }
        }

        if let Some(raw) = value(ENV_LOG_FORMAT) {
            match raw.parse::<LogFormat>() {
                Ok(format) => config.logging.format = format,
                Err(e) => warn!("Ignoring {}: {}", ENV_LOG_FORMAT, e),
            }
        }

        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }

        config
    }
}
