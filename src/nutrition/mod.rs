//! Nutrient normalization and scaling engine
//!
//! Pure functions over immutable inputs: resolve a logged quantity to
//! grams, derive a corrected nutrition basis, scale. Safe to call
//! concurrently; nothing here touches storage.

pub mod resolver;
pub mod scaler;
pub mod units;

pub use resolver::{MeasureSet, MeasureSource, UnitResolver};
pub use scaler::{
    scale, scale_logged_quantity, MacroBasis, ScalerConfig, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN,
};
pub use units::ConversionTable;
