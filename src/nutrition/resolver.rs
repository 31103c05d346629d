//! Unit resolution
//!
//! Turns a logged (quantity, unit) pair into grams: per-food custom
//! measures first, then the fallback conversion table, then a permissive
//! grams passthrough. Resolution is total; no unit is an error.

use std::collections::HashMap;

use tracing::warn;

use crate::models::FoodMeasure;

use super::units::ConversionTable;

/// Lookup capability for per-food custom measures
///
/// The resolver lowercases the logged unit before asking; implementations
/// match the stored measure name exactly against that lowercased string.
pub trait MeasureSource {
    /// Grams per one measure for (food_id, measure_name), if such a
    /// measure exists
    fn grams_for(&self, food_id: i64, measure_name: &str) -> Option<f64>;
}

/// In-memory measure collection
///
/// The production path materializes a food's measures from the store into
/// one of these before resolving; tests build them directly.
#[derive(Debug, Clone, Default)]
pub struct MeasureSet {
    entries: HashMap<(i64, String), f64>,
}

impl MeasureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from stored measure rows
    pub fn from_measures(measures: &[FoodMeasure]) -> Self {
        let mut set = Self::new();
        for m in measures {
            set.insert(m.food_id, &m.measure_name, m.grams);
        }
        set
    }

    /// Add a measure; a later insert for the same key wins
    pub fn insert(&mut self, food_id: i64, measure_name: &str, grams: f64) {
        self.entries.insert((food_id, measure_name.to_string()), grams);
    }
}

impl MeasureSource for MeasureSet {
    fn grams_for(&self, food_id: i64, measure_name: &str) -> Option<f64> {
        self.entries.get(&(food_id, measure_name.to_string())).copied()
    }
}

/// Converts logged quantities to grams
///
/// Holds the injected conversion table and measure source; carries no
/// other state, so one resolver can serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct UnitResolver<M: MeasureSource> {
    table: ConversionTable,
    measures: M,
}

impl<M: MeasureSource> UnitResolver<M> {
    pub fn new(table: ConversionTable, measures: M) -> Self {
        Self { table, measures }
    }

    /// Resolve a quantity in an arbitrary unit to grams
    ///
    /// Priority: grams passthrough ("g" or empty), custom measure for this
    /// food, fallback table, then passthrough for anything unrecognized.
    /// Quantity is passed through arithmetically; callers own the
    /// quantity >= 0 invariant.
    pub fn resolve_to_grams(&self, food_id: i64, quantity: f64, unit: &str) -> f64 {
        let unit = unit.trim().to_lowercase();

        if unit.is_empty() || unit == "g" {
            return quantity;
        }

        if let Some(grams) = self.measures.grams_for(food_id, &unit) {
            return quantity * grams;
        }

        if let Some(grams) = self.table.grams_per_unit(&unit) {
            return quantity * grams;
        }

        warn!(food_id, %unit, "unrecognized unit, treating quantity as grams");
        quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(measures: MeasureSet) -> UnitResolver<MeasureSet> {
        UnitResolver::new(ConversionTable::default(), measures)
    }

    #[test]
    fn test_grams_pass_through() {
        let resolver = resolver_with(MeasureSet::new());
        assert_eq!(resolver.resolve_to_grams(1, 150.0, "g"), 150.0);
        assert_eq!(resolver.resolve_to_grams(1, 150.0, "G"), 150.0);
        assert_eq!(resolver.resolve_to_grams(1, 150.0, ""), 150.0);
    }

    #[test]
    fn test_fallback_table_conversion() {
        let resolver = resolver_with(MeasureSet::new());
        assert_eq!(resolver.resolve_to_grams(1, 2.0, "kg"), 2000.0);
        assert_eq!(resolver.resolve_to_grams(1, 1.0, "cup"), 240.0);
        assert_eq!(resolver.resolve_to_grams(1, 2.0, "oz"), 56.7);
    }

    #[test]
    fn test_custom_measure_beats_fallback_table() {
        let mut measures = MeasureSet::new();
        measures.insert(7, "cup", 150.0);
        let resolver = resolver_with(measures);

        // Measure (150 g/cup) wins over the table's 240 g/cup
        assert_eq!(resolver.resolve_to_grams(7, 2.0, "cup"), 300.0);
        // Other foods still get the table value
        assert_eq!(resolver.resolve_to_grams(8, 2.0, "cup"), 480.0);
    }

    #[test]
    fn test_measure_matches_lowercased_unit() {
        let mut measures = MeasureSet::new();
        measures.insert(7, "slice", 28.0);
        let resolver = resolver_with(measures);

        assert_eq!(resolver.resolve_to_grams(7, 3.0, "Slice"), 84.0);
        assert_eq!(resolver.resolve_to_grams(7, 3.0, " slice "), 84.0);
    }

    #[test]
    fn test_unknown_unit_passes_quantity_through() {
        let resolver = resolver_with(MeasureSet::new());
        assert_eq!(resolver.resolve_to_grams(1, 3.0, "handful"), 3.0);
    }

    #[test]
    fn test_zero_and_negative_quantity_pass_through() {
        let resolver = resolver_with(MeasureSet::new());
        assert_eq!(resolver.resolve_to_grams(1, 0.0, "kg"), 0.0);
        assert_eq!(resolver.resolve_to_grams(1, -2.0, "kg"), -2000.0);
    }
}
