//! Macro normalization and scaling
//!
//! Derives a corrected nutrition basis from a food's declared fields and
//! scales it to an arbitrary gram quantity. Upstream data is frequently
//! inconsistent (macros on an implicit 100 g basis behind a declared
//! serving of 1, calories stored in kilojoules), so the basis is
//! cross-checked and silently corrected before any scaling happens.
//! Every degenerate input degrades to a defined default; nothing here
//! returns an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Food, LoggedQuantity, ScaledNutrients};

use super::resolver::{MeasureSource, UnitResolver};

// ============================================================================
// Atwater Factors (kcal per gram)
// ============================================================================

/// Energy density of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy density of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Energy density of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Tunable thresholds for the normalization corrections
///
/// Defaults reproduce the conventions of the upstream dataset the
/// corrections were calibrated against; deployments ingesting other
/// sources adjust them via a JSON override file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerConfig {
    /// Gram basis assumed when the declared serving size is missing, zero,
    /// or overridden as implausible
    pub serving_fallback_g: f64,
    /// A declared serving is overridden when the macro gram sum exceeds
    /// serving_size * this multiplier
    pub serving_mismatch_ratio: f64,
    /// Declared calories are replaced by the macro-derived estimate when
    /// declared / estimate leaves (calorie_ratio_min, calorie_ratio_max)
    pub calorie_ratio_max: f64,
    pub calorie_ratio_min: f64,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            serving_fallback_g: 100.0,
            serving_mismatch_ratio: 1.5,
            calorie_ratio_max: 2.0,
            calorie_ratio_min: 0.5,
        }
    }
}

impl ScalerConfig {
    /// Load a config from JSON; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A food's corrected per-serving basis
///
/// Macro and calorie fields read missing as 0; `serving_g` is never 0
/// after derivation unless the fallback itself is configured to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroBasis {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    /// Effective calories: declared when plausible, macro-derived otherwise
    pub calories: f64,
    /// Effective serving basis in grams
    pub serving_g: f64,
}

impl MacroBasis {
    /// Derive the corrected basis for a food
    pub fn derive(food: &Food, config: &ScalerConfig) -> Self {
        let protein_g = food.protein_g.unwrap_or(0.0);
        let carbs_g = food.carbs_g.unwrap_or(0.0);
        let fats_g = food.fats_g.unwrap_or(0.0);
        let declared_calories = food.calories.unwrap_or(0.0);

        let mut serving_g = food.serving_size.unwrap_or(0.0);
        if serving_g == 0.0 {
            serving_g = config.serving_fallback_g;
        }

        // Macros summing past the declared serving mass cannot be per that
        // serving; such rows carry macros on the 100 g convention behind a
        // bogus declared size (commonly 1).
        let macro_sum = protein_g + carbs_g + fats_g;
        if serving_g != 0.0 && macro_sum != 0.0 && macro_sum > serving_g * config.serving_mismatch_ratio
        {
            debug!(
                food_id = food.id,
                declared_serving_g = serving_g,
                macro_sum,
                "macro sum exceeds declared serving, using fallback basis"
            );
            serving_g = config.serving_fallback_g;
        }

        let macro_calories =
            protein_g * KCAL_PER_G_PROTEIN + carbs_g * KCAL_PER_G_CARBS + fats_g * KCAL_PER_G_FAT;

        let calories = if macro_calories == 0.0 {
            // Nothing to cross-check against
            declared_calories
        } else if declared_calories == 0.0 {
            macro_calories
        } else {
            let ratio = declared_calories / macro_calories;
            if ratio > config.calorie_ratio_max || ratio < config.calorie_ratio_min {
                // Declared energy off by more than 2x from the macro
                // estimate; in practice a kilojoule value in the kcal column
                debug!(
                    food_id = food.id,
                    declared_calories, macro_calories, ratio,
                    "declared calories implausible, using macro-derived value"
                );
                macro_calories
            } else {
                declared_calories
            }
        };

        Self {
            protein_g,
            carbs_g,
            fats_g,
            calories,
            serving_g,
        }
    }
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scale a food's corrected nutrition to a target mass in grams
pub fn scale(food: &Food, target_grams: f64, config: &ScalerConfig) -> ScaledNutrients {
    let basis = MacroBasis::derive(food, config);

    let factor = if basis.serving_g != 0.0 {
        target_grams / basis.serving_g
    } else {
        0.0
    };

    ScaledNutrients {
        calories: round1(basis.calories * factor),
        protein_g: round1(basis.protein_g * factor),
        carbs_g: round1(basis.carbs_g * factor),
        fats_g: round1(basis.fats_g * factor),
    }
}

/// Resolve a logged quantity to grams and scale the food to it
pub fn scale_logged_quantity<M: MeasureSource>(
    food: &Food,
    resolver: &UnitResolver<M>,
    logged: &LoggedQuantity,
    config: &ScalerConfig,
) -> ScaledNutrients {
    let grams = resolver.resolve_to_grams(food.id, logged.quantity, &logged.unit);
    scale(food, grams, config)
}
