//! Unit conversion constants and the fallback conversion table
//!
//! Food-independent unit-to-grams factors, consulted when no custom
//! measure matches a logged unit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.35;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

// ============================================================================
// Volume Approximations (to grams, water-density convention)
// ============================================================================

/// Grams per teaspoon (approximate)
pub const G_PER_TSP: f64 = 4.2;
/// Grams per tablespoon (approximate)
pub const G_PER_TBSP: f64 = 14.3;
/// Grams per cup (approximate, US)
pub const G_PER_CUP: f64 = 240.0;

/// Fallback table mapping unit names to grams per one unit
///
/// An immutable value owned by the resolver it is injected into. The
/// default table carries the factors above under their short names plus
/// the long-form spellings; deployments with different source data build
/// their own table or load one from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionTable {
    entries: HashMap<String, f64>,
}

impl ConversionTable {
    /// Build an empty table (every lookup misses)
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a table from explicit (unit, grams-per-unit) pairs
    ///
    /// Unit names are lowercased so lookups stay case-insensitive.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(unit, grams)| (unit.into().to_lowercase(), grams))
                .collect(),
        }
    }

    /// Load a table from a JSON object of unit -> grams-per-unit
    ///
    /// Used for per-deployment override files.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Grams per one unit, or None when the unit is not in the table
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn grams_per_unit(&self, unit: &str) -> Option<f64> {
        let lower = unit.to_lowercase();
        self.entries.get(lower.trim()).copied()
    }
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::from_entries([
            ("g", 1.0),
            ("gram", 1.0),
            ("grams", 1.0),
            ("kg", G_PER_KG),
            ("kilogram", G_PER_KG),
            ("kilograms", G_PER_KG),
            ("oz", G_PER_OZ),
            ("ounce", G_PER_OZ),
            ("ounces", G_PER_OZ),
            ("lb", G_PER_LB),
            ("lbs", G_PER_LB),
            ("pound", G_PER_LB),
            ("pounds", G_PER_LB),
            ("tsp", G_PER_TSP),
            ("teaspoon", G_PER_TSP),
            ("teaspoons", G_PER_TSP),
            ("tbsp", G_PER_TBSP),
            ("tablespoon", G_PER_TBSP),
            ("tablespoons", G_PER_TBSP),
            ("cup", G_PER_CUP),
            ("cups", G_PER_CUP),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_short_names() {
        let table = ConversionTable::default();
        assert_eq!(table.grams_per_unit("g"), Some(1.0));
        assert_eq!(table.grams_per_unit("kg"), Some(1000.0));
        assert_eq!(table.grams_per_unit("oz"), Some(G_PER_OZ));
        assert_eq!(table.grams_per_unit("lb"), Some(G_PER_LB));
        assert_eq!(table.grams_per_unit("tsp"), Some(G_PER_TSP));
        assert_eq!(table.grams_per_unit("tbsp"), Some(G_PER_TBSP));
        assert_eq!(table.grams_per_unit("cup"), Some(240.0));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = ConversionTable::default();
        assert_eq!(table.grams_per_unit("Cup"), Some(240.0));
        assert_eq!(table.grams_per_unit(" KG "), Some(1000.0));
    }

    #[test]
    fn test_unknown_unit_misses() {
        let table = ConversionTable::default();
        assert_eq!(table.grams_per_unit("scoop"), None);
        assert_eq!(table.grams_per_unit(""), None);
    }

    #[test]
    fn test_custom_table_overrides_defaults() {
        let table = ConversionTable::from_entries([("cup", 236.588)]);
        assert_eq!(table.grams_per_unit("cup"), Some(236.588));
        assert_eq!(table.grams_per_unit("kg"), None);
    }

    #[test]
    fn test_from_json_str() {
        let table = ConversionTable::from_json_str(r#"{"Stick": 113.0, "cup": 227.0}"#).unwrap();
        assert_eq!(table.grams_per_unit("stick"), Some(113.0));
        assert_eq!(table.grams_per_unit("cup"), Some(227.0));
    }

    #[test]
    fn test_from_json_str_rejects_bad_input() {
        assert!(ConversionTable::from_json_str(r#"{"cup": "lots"}"#).is_err());
    }
}
