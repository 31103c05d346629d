//! Food measure model
//!
//! Per-food named measures ("cup", "slice") mapped to grams. A measure
//! overrides the generic conversion table during unit resolution.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};

/// A custom measure belonging to one food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodMeasure {
    pub id: i64,
    pub food_id: i64,
    /// Measure name as stored; matched exactly against the lowercased
    /// logged unit
    pub measure_name: String,
    /// Grams per one measure
    pub grams: f64,
}

/// Data for creating a measure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodMeasureCreate {
    pub food_id: i64,
    pub measure_name: String,
    pub grams: f64,
}

impl FoodMeasure {
    /// Create a FoodMeasure from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            food_id: row.get("food_id")?,
            measure_name: row.get("measure_name")?,
            grams: row.get("grams")?,
        })
    }

    /// Insert a new measure; (food_id, measure_name) is unique
    pub fn create(conn: &Connection, data: &FoodMeasureCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO food_measures (food_id, measure_name, grams)
            VALUES (?1, ?2, ?3)
            "#,
            params![data.food_id, data.measure_name, data.grams],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a measure by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_measures WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(measure) => Ok(Some(measure)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all measures for a food
    pub fn get_for_food(conn: &Connection, food_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_measures WHERE food_id = ?1 ORDER BY measure_name",
        )?;

        let measures = stmt
            .query_map([food_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(measures)
    }

    /// Delete a measure
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM food_measures WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Count all measures
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM food_measures", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count placeholder measures named "undetermined"
    pub fn count_undetermined(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM food_measures WHERE lower(coalesce(measure_name, '')) = 'undetermined'",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Delete placeholder "undetermined" measures left over from upstream
    /// imports, returning the number of rows removed
    pub fn prune_undetermined(conn: &Connection) -> DbResult<usize> {
        let deleted = conn.execute(
            "DELETE FROM food_measures WHERE lower(coalesce(measure_name, '')) = 'undetermined'",
            [],
        )?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{schema, Database};
    use crate::models::{Food, FoodCreate};

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| schema::init_schema(conn)).unwrap();
        db
    }

    fn seed_food(conn: &Connection) -> Food {
        Food::create(
            conn,
            &FoodCreate {
                name: "Oats".to_string(),
                calories: Some(379.0),
                protein_g: Some(13.0),
                carbs_g: Some(68.0),
                fats_g: Some(6.5),
                source_id: None,
                serving_size: Some(100.0),
                serving_unit: Some("g".to_string()),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_measure_name_unique_per_food() {
        let db = test_db();
        db.with_conn(|conn| {
            let food = seed_food(conn);
            FoodMeasure::create(
                conn,
                &FoodMeasureCreate {
                    food_id: food.id,
                    measure_name: "cup".to_string(),
                    grams: 90.0,
                },
            )?;

            let duplicate = FoodMeasure::create(
                conn,
                &FoodMeasureCreate {
                    food_id: food.id,
                    measure_name: "cup".to_string(),
                    grams: 95.0,
                },
            );
            assert!(duplicate.is_err());
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_get_for_food_returns_only_own_measures() {
        let db = test_db();
        db.with_conn(|conn| {
            let oats = seed_food(conn);
            let other = Food::create(
                conn,
                &FoodCreate {
                    name: "Rice".to_string(),
                    calories: Some(130.0),
                    protein_g: Some(2.7),
                    carbs_g: Some(28.0),
                    fats_g: Some(0.3),
                    source_id: None,
                    serving_size: Some(100.0),
                    serving_unit: Some("g".to_string()),
                },
            )?;

            FoodMeasure::create(
                conn,
                &FoodMeasureCreate {
                    food_id: oats.id,
                    measure_name: "cup".to_string(),
                    grams: 90.0,
                },
            )?;
            FoodMeasure::create(
                conn,
                &FoodMeasureCreate {
                    food_id: other.id,
                    measure_name: "cup".to_string(),
                    grams: 180.0,
                },
            )?;

            let measures = FoodMeasure::get_for_food(conn, oats.id)?;
            assert_eq!(measures.len(), 1);
            assert_eq!(measures[0].grams, 90.0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_prune_undetermined_is_case_insensitive() {
        let db = test_db();
        db.with_conn(|conn| {
            let food = seed_food(conn);
            for (name, grams) in [("undetermined", 1.0), ("Undetermined", 2.0), ("cup", 90.0)] {
                FoodMeasure::create(
                    conn,
                    &FoodMeasureCreate {
                        food_id: food.id,
                        measure_name: name.to_string(),
                        grams,
                    },
                )?;
            }

            assert_eq!(FoodMeasure::count_undetermined(conn)?, 2);
            assert_eq!(FoodMeasure::prune_undetermined(conn)?, 2);
            assert_eq!(FoodMeasure::count_undetermined(conn)?, 0);
            assert_eq!(FoodMeasure::count(conn)?, 1);
            Ok(())
        })
        .unwrap();
    }
}
