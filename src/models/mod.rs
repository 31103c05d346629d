//! Data models
//!
//! Rust structs representing database entities.

mod food;
mod food_log;
mod measure;
mod nutrition;

pub use food::{Food, FoodCreate};
pub use food_log::{FoodLog, FoodLogCreate, LoggedQuantity};
pub use measure::{FoodMeasure, FoodMeasureCreate};
pub use nutrition::ScaledNutrients;
