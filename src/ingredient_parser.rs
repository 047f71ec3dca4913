//! # Ingredient Parser
//!
//! This module turns free-text ingredient lines into structured
//! [`ParsedIngredient`] values. Recipes are messy text, so parsing never fails:
//! a line without a leading number becomes one unit of the whole line.
//!
//! ## Features
//!
//! - Leading quantities as decimals (`2`, `2.5`, `.5`), fractions (`1/2`) or mixed numbers (`1 1/2`)
//! - Token-count rules: `qty unit item...` or `qty item`
//! - Preparation keyword extraction (diced, chopped, minced, sliced)
//! - Bullet stripping and ingredient-section extraction from whole recipe texts
//!
//! ## Usage
//!
//! ```rust
//! use grocery_list::ingredient_parser::parse_ingredient_line;
//!
//! let parsed = parse_ingredient_line("2 cups flour");
//! assert_eq!(parsed.quantity, 2.0);
//! assert_eq!(parsed.unit, "cups");
//! assert_eq!(parsed.item, "flour");
//! ```

use crate::ingredient_model::{ParsedIngredient, DEFAULT_UNIT};
use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

/// Preparation keywords, checked in this order
pub const PREPARATION_KEYWORDS: [&str; 4] = ["diced", "chopped", "minced", "sliced"];

/// Non-negative decimal without sign or exponent
static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)$").expect("Decimal pattern should be valid"));

/// Plain integer, the only valid whole part of a mixed number
static WHOLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Whole number pattern should be valid"));

/// Simple fraction such as "1/2" or "3⁄4"
static FRACTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[⁄/](\d+)$").expect("Fraction pattern should be valid"));

/// One leading bullet marker
static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\-*•◦▪▫→]\s*").expect("Bullet pattern should be valid"));

/// Header that opens an ingredients section
static INGREDIENTS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ingredients?\s*:?$").expect("Ingredients header pattern should be valid")
});

/// Header that closes an ingredients section
static SECTION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:directions?|instructions?|steps?|method|preparation)\s*:?$")
        .expect("Section end pattern should be valid")
});

/// Column headings of tabular recipes that are not ingredients
const TABLE_HEADINGS: [&str; 6] = ["ingredient", "weight", "measure", "quantity", "unit", "amount"];

/// Parse a single ingredient line
///
/// An empty or whitespace-only line yields quantity 0, unit `each` and an
/// empty item. When the first token is not a quantity the whole line becomes
/// the item with quantity 1 and unit `each`.
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_parser::parse_ingredient_line;
///
/// let parsed = parse_ingredient_line("1 1/2 tsp vanilla extract");
/// assert_eq!(parsed.quantity, 1.5);
/// assert_eq!(parsed.unit, "tsp");
/// assert_eq!(parsed.item, "vanilla extract");
///
/// let parsed = parse_ingredient_line("3 eggs");
/// assert_eq!(parsed.unit, "each");
/// assert_eq!(parsed.item, "eggs");
/// ```
pub fn parse_ingredient_line(line: &str) -> ParsedIngredient {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        trace!("Empty ingredient line");
        return ParsedIngredient::empty();
    }

    let (quantity, unit, item) = match parse_leading_quantity(&tokens) {
        Some((quantity, consumed)) => {
            let rest = &tokens[consumed..];
            match rest.len() {
                0 => (quantity, DEFAULT_UNIT.to_string(), tokens.join(" ")),
                1 => (quantity, DEFAULT_UNIT.to_string(), rest[0].to_string()),
                _ => (quantity, rest[0].to_lowercase(), rest[1..].join(" ")),
            }
        }
        None => {
            debug!("No leading quantity in '{}', treating whole line as item", line.trim());
            (1.0, DEFAULT_UNIT.to_string(), tokens.join(" "))
        }
    };

    let (item, preparation) = extract_preparation(&item.to_lowercase());

    let mut parsed = ParsedIngredient::new(&item).with_quantity(quantity, &unit);
    if let Some(preparation) = preparation {
        parsed = parsed.with_preparation(preparation);
    }

    trace!("Parsed '{}' -> {:?}", line.trim(), parsed);
    parsed
}

/// Parse every non-empty line of a block of ingredient text
pub fn parse_ingredient_list(text: &str) -> Vec<ParsedIngredient> {
    text.lines()
        .map(clean_ingredient_text)
        .filter(|line| !line.is_empty())
        .map(|line| parse_ingredient_line(&line))
        .collect()
}

/// Read a quantity from the leading tokens, returning it with the number of
/// tokens consumed
fn parse_leading_quantity(tokens: &[&str]) -> Option<(f64, usize)> {
    let first = *tokens.first()?;

    if DECIMAL_REGEX.is_match(first) {
        // Overlong digit strings parse to infinity
        let whole = first.parse::<f64>().ok().filter(|v| v.is_finite())?;

        // Mixed number: "1 1/2"
        if WHOLE_REGEX.is_match(first) {
            if let Some(fraction) = tokens.get(1).and_then(|t| parse_fraction(t)) {
                return Some((whole + fraction, 2));
            }
        }
        return Some((whole, 1));
    }

    parse_fraction(first).map(|value| (value, 1))
}

/// Parse "n/d"; a zero denominator is not a number
fn parse_fraction(token: &str) -> Option<f64> {
    let captures = FRACTION_REGEX.captures(token)?;
    let numerator: f64 = captures[1].parse().ok()?;
    let denominator: f64 = captures[2].parse().ok()?;

    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|v| v.is_finite())
}

/// Strip the first preparation keyword found in the item text
fn extract_preparation(item: &str) -> (String, Option<&'static str>) {
    for keyword in PREPARATION_KEYWORDS {
        if item.contains(keyword) {
            let stripped = item.replace(keyword, "");
            return (tidy_item(&stripped), Some(keyword));
        }
    }
    (tidy_item(item), None)
}

/// Collapse whitespace and drop commas left dangling at either end
fn tidy_item(item: &str) -> String {
    item.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

/// Remove one leading bullet marker and collapse whitespace
///
/// # Examples
///
/// ```rust
/// use grocery_list::ingredient_parser::clean_ingredient_text;
///
/// assert_eq!(clean_ingredient_text("  * 2 cups   flour  "), "2 cups flour");
/// assert_eq!(clean_ingredient_text(""), "");
/// ```
pub fn clean_ingredient_text(text: &str) -> String {
    let trimmed = text.trim();
    let without_bullet = BULLET_REGEX.replace(trimmed, "");
    without_bullet.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract ingredient lines from a whole recipe text
///
/// Lines between an `Ingredients` header and a `Directions`/`Instructions`/
/// `Steps`/`Method` header are returned cleaned. When the text has no
/// ingredients header, every line starting with a digit is taken instead.
pub fn extract_ingredient_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_section = false;
    let mut saw_header = false;

    for raw in text.lines() {
        let line = raw.trim();

        if INGREDIENTS_HEADER.is_match(line) {
            in_section = true;
            saw_header = true;
            continue;
        }
        if SECTION_END.is_match(line) {
            in_section = false;
            continue;
        }
        if !in_section {
            continue;
        }

        let cleaned = clean_ingredient_text(line);
        if cleaned.is_empty() || TABLE_HEADINGS.contains(&cleaned.to_lowercase().as_str()) {
            continue;
        }
        lines.push(cleaned);
    }

    if !saw_header {
        debug!("No ingredients header found, falling back to numbered lines");
        lines = text
            .lines()
            .map(clean_ingredient_text)
            .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
            .collect();
    }

    debug!("Extracted {} ingredient lines", lines.len());
    lines
}
