//! Macroscale Library
//!
//! Nutrient normalization and scaling for food logging: unit resolution,
//! upstream-data correction, and the SQLite-backed food catalog behind it.

pub mod db;
pub mod models;
pub mod nutrition;
