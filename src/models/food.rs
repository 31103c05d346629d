//! Food model
//!
//! A nutrition record as declared by its upstream source. Macro and calorie
//! fields are per serving and may be incomplete or inconsistent; the
//! scaling engine corrects for that at read time.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{scale_logged_quantity, ConversionTable, MeasureSet, ScalerConfig, UnitResolver};

use super::{FoodMeasure, LoggedQuantity, ScaledNutrients};

/// A food with declared per-serving nutrition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    /// Declared energy; kcal on good rows, mis-scaled kJ on bad ones
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    /// Identifier in the upstream dataset this row came from
    pub source_id: Option<String>,
    /// Declared serving mass in grams; sometimes missing or a bogus `1`
    pub serving_size: Option<f64>,
    /// Display-only unit label, never used for conversion
    pub serving_unit: Option<String>,
}

/// Data for creating a new food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCreate {
    pub name: String,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    pub source_id: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_unit: Option<String>,
}

impl Food {
    /// Create a Food from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            calories: row.get("calories")?,
            protein_g: row.get("protein_g")?,
            carbs_g: row.get("carbs_g")?,
            fats_g: row.get("fats_g")?,
            source_id: row.get("source_id")?,
            serving_size: row.get("serving_size")?,
            serving_unit: row.get("serving_unit")?,
        })
    }

    /// Insert a new food into the database
    pub fn create(conn: &Connection, data: &FoodCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO foods (
                name, calories, protein_g, carbs_g, fats_g,
                source_id, serving_size, serving_unit
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                data.name,
                data.calories,
                data.protein_g,
                data.carbs_g,
                data.fats_g,
                data.source_id,
                data.serving_size,
                data.serving_unit,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a food by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(food) => Ok(Some(food)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Search foods by name
    pub fn search(conn: &Connection, query: &str, limit: i64) -> DbResult<Vec<Self>> {
        let pattern = format!("%{}%", query);
        let mut stmt = conn.prepare(
            "SELECT * FROM foods WHERE name LIKE ?1 ORDER BY name ASC LIMIT ?2",
        )?;

        let foods = stmt
            .query_map(params![pattern, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(foods)
    }

    /// Count all foods
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a food
    ///
    /// Fails while food logs reference it (foreign key RESTRICT); its
    /// custom measures are removed by cascade. Returns Ok(false) when the
    /// food does not exist.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM foods WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Scale this food's nutrition to an arbitrary quantity and unit
    ///
    /// Materializes the food's custom measures, resolves the quantity to
    /// grams, and runs the scaler with the default conversion table and
    /// thresholds. Callers needing a custom table or thresholds use the
    /// engine in `nutrition` directly.
    pub fn scale_for(&self, conn: &Connection, quantity: f64, unit: &str) -> DbResult<ScaledNutrients> {
        let measures = FoodMeasure::get_for_food(conn, self.id)?;
        let resolver = UnitResolver::new(
            ConversionTable::default(),
            MeasureSet::from_measures(&measures),
        );

        let logged = LoggedQuantity::new(quantity, unit);
        Ok(scale_logged_quantity(
            self,
            &resolver,
            &logged,
            &ScalerConfig::default(),
        ))
    }
}
