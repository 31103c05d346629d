//! Scaled nutrient values
//!
//! Output of the scaling engine; shared by food logs and daily totals.

use serde::{Deserialize, Serialize};

/// Scaled macro/calorie values for a logged quantity
///
/// All fields are rounded to one decimal place by the scaler.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScaledNutrients {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl ScaledNutrients {
    /// All-zero nutrients
    pub fn zero() -> Self {
        Self::default()
    }

    /// Add another set of nutrients to this one
    pub fn add(&self, other: &ScaledNutrients) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fats_g: self.fats_g + other.fats_g,
        }
    }
}

impl std::ops::Add for ScaledNutrients {
    type Output = ScaledNutrients;

    fn add(self, other: ScaledNutrients) -> ScaledNutrients {
        ScaledNutrients::add(&self, &other)
    }
}

impl std::iter::Sum for ScaledNutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ScaledNutrients::zero(), |acc, n| acc + n)
    }
}
