//! # Unit Conversion
//!
//! Converts quantities between units of the same family. Two closed families
//! are supported, each expressed in a common base unit:
//!
//! - **Volume** in tablespoons: cup/cups = 16, tbsp/tablespoon = 1, tsp/teaspoon = 1/3
//! - **Weight** in ounces: lb/pound = 16, oz/ounce = 1
//!
//! Any other unit ("each", "head", "can", ...) is not convertible. A failed
//! conversion is not an error: [`convert_units`] hands back the original
//! quantity, while [`try_convert_units`] reports `None` so callers can tell the
//! two cases apart.

use log::trace;

/// A closed set of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    /// Volume, measured in tablespoons
    Volume,
    /// Weight, measured in ounces
    Weight,
}

impl UnitFamily {
    /// Family and base-unit factor of a lowercase unit name
    fn lookup(unit: &str) -> Option<(UnitFamily, f64)> {
        match unit {
            "cup" | "cups" => Some((UnitFamily::Volume, 16.0)),
            "tbsp" | "tablespoon" => Some((UnitFamily::Volume, 1.0)),
            "tsp" | "teaspoon" => Some((UnitFamily::Volume, 1.0 / 3.0)),
            "lb" | "pound" => Some((UnitFamily::Weight, 16.0)),
            "oz" | "ounce" => Some((UnitFamily::Weight, 1.0)),
            _ => None,
        }
    }

    /// Family of a unit name, matched case-insensitively
    pub fn of(unit: &str) -> Option<UnitFamily> {
        Self::lookup(&unit.trim().to_lowercase()).map(|(family, _)| family)
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Convert a quantity, or `None` when the units are not in the same family
///
/// Identical units (ignoring case) return the quantity untouched and unrounded.
/// Real conversions are rounded to two decimal places.
///
/// # Examples
///
/// ```rust
/// use grocery_list::unit_conversion::try_convert_units;
///
/// assert_eq!(try_convert_units(2.0, "cups", "tbsp"), Some(32.0));
/// assert_eq!(try_convert_units(16.0, "oz", "lb"), Some(1.0));
/// assert_eq!(try_convert_units(1.0, "cups", "lb"), None);
/// ```
pub fn try_convert_units(quantity: f64, from_unit: &str, to_unit: &str) -> Option<f64> {
    let from = from_unit.trim().to_lowercase();
    let to = to_unit.trim().to_lowercase();

    if from == to {
        return Some(quantity);
    }

    let (from_family, from_factor) = UnitFamily::lookup(&from)?;
    let (to_family, to_factor) = UnitFamily::lookup(&to)?;
    if from_family != to_family {
        return None;
    }

    let converted = round_to(quantity * from_factor / to_factor, 2);
    trace!("Converted {} {} -> {} {}", quantity, from, converted, to);
    Some(converted)
}

/// Convert a quantity, passing it through unchanged when no conversion exists
///
/// # Examples
///
/// ```rust
/// use grocery_list::unit_conversion::convert_units;
///
/// assert_eq!(convert_units(3.0, "tsp", "tbsp"), 1.0);
/// assert_eq!(convert_units(2.0, "head", "each"), 2.0);
/// ```
pub fn convert_units(quantity: f64, from_unit: &str, to_unit: &str) -> f64 {
    try_convert_units(quantity, from_unit, to_unit).unwrap_or(quantity)
}

/// Whether a quantity in `from_unit` can be expressed in `to_unit`
pub fn is_convertible(from_unit: &str, to_unit: &str) -> bool {
    try_convert_units(0.0, from_unit, to_unit).is_some()
}
