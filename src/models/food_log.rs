//! Food log model
//!
//! A logged consumption event: user, food, quantity, unit, date. Users
//! live upstream; `user_id` is an external identifier here. Scaling a log
//! loads the food and its measures and runs the engine in `nutrition`.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{scale_logged_quantity, ConversionTable, MeasureSet, ScalerConfig, UnitResolver};

use super::{Food, FoodMeasure, ScaledNutrients};

/// A quantity/unit pair as entered by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedQuantity {
    pub quantity: f64,
    /// Unit name; matched case-insensitively, empty means grams
    pub unit: String,
}

impl LoggedQuantity {
    pub fn new(quantity: f64, unit: &str) -> Self {
        Self {
            quantity,
            unit: unit.to_string(),
        }
    }
}

/// A logged food consumption event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLog {
    pub id: i64,
    pub user_id: i64,
    pub food_id: i64,
    pub quantity: f64,
    pub unit: String,
    /// ISO date: "2026-08-23"
    pub log_date: String,
    pub created_at: String,
}

/// Data for creating a food log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogCreate {
    pub user_id: i64,
    pub food_id: i64,
    pub quantity: f64,
    /// Defaults to grams
    pub unit: Option<String>,
    /// Defaults to today (UTC)
    pub log_date: Option<NaiveDate>,
}

impl FoodLog {
    /// Create a FoodLog from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            food_id: row.get("food_id")?,
            quantity: row.get("quantity")?,
            unit: row.get("unit")?,
            log_date: row.get("log_date")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new log entry
    ///
    /// Rejects negative quantities; the scaling engine itself passes them
    /// through, so the invariant is enforced here at the storage boundary.
    pub fn create(conn: &Connection, data: &FoodLogCreate) -> DbResult<Self> {
        if data.quantity < 0.0 {
            return Err(DbError::Invalid(format!(
                "quantity must be >= 0, got {}",
                data.quantity
            )));
        }

        let unit = data.unit.clone().unwrap_or_else(|| "g".to_string());
        let log_date = data
            .log_date
            .unwrap_or_else(|| Utc::now().date_naive())
            .to_string();

        conn.execute(
            r#"
            INSERT INTO food_logs (user_id, food_id, quantity, unit, log_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![data.user_id, data.food_id, data.quantity, unit, log_date],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a log entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_logs WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List one user's log entries for a date, oldest first
    pub fn list_for_day(conn: &Connection, user_id: i64, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_logs WHERE user_id = ?1 AND log_date = ?2 ORDER BY id",
        )?;

        let logs = stmt
            .query_map(params![user_id, date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    /// Delete a log entry
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM food_logs WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Scale this entry's food to the logged quantity
    ///
    /// The food row is expected to exist (foreign key); a missing row
    /// surfaces as a store error, not a scaling fallback.
    pub fn scaled(&self, conn: &Connection) -> DbResult<ScaledNutrients> {
        let food = Food::get_by_id(conn, self.food_id)?
            .ok_or_else(|| DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
        let measures = FoodMeasure::get_for_food(conn, self.food_id)?;

        let resolver = UnitResolver::new(
            ConversionTable::default(),
            MeasureSet::from_measures(&measures),
        );
        let logged = LoggedQuantity::new(self.quantity, &self.unit);

        Ok(scale_logged_quantity(
            &food,
            &resolver,
            &logged,
            &ScalerConfig::default(),
        ))
    }

    /// Sum scaled nutrients across one user's entries for a date
    pub fn day_totals(conn: &Connection, user_id: i64, date: &str) -> DbResult<ScaledNutrients> {
        let logs = Self::list_for_day(conn, user_id, date)?;

        let mut totals = ScaledNutrients::zero();
        for log in &logs {
            totals = totals + log.scaled(conn)?;
        }

        Ok(totals)
    }
}
