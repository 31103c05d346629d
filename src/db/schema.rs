//! Schema setup
//!
//! Creates the food, measure, and log tables. Creation is idempotent and
//! runs on every startup; there is no migration framework.

use rusqlite::Connection;

use super::connection::DbResult;

/// Create all tables and indexes if they do not exist yet
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- FOODS
        -- Nutrition records as declared upstream; values
        -- are per serving and frequently inconsistent
        -- ============================================
        CREATE TABLE IF NOT EXISTS foods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            calories REAL,                       -- kcal, or mis-scaled kJ on bad rows
            protein_g REAL,
            carbs_g REAL,
            fats_g REAL,
            source_id TEXT,                      -- upstream dataset identifier
            serving_size REAL,                   -- declared gram basis, sometimes bogus
            serving_unit TEXT                    -- display only
        );

        CREATE INDEX IF NOT EXISTS idx_foods_name ON foods(name);

        -- ============================================
        -- FOOD MEASURES
        -- Per-food named unit -> grams conversions
        -- ============================================
        CREATE TABLE IF NOT EXISTS food_measures (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_id INTEGER NOT NULL REFERENCES foods(id) ON DELETE CASCADE,
            measure_name TEXT NOT NULL,          -- "cup", "slice", ...
            grams REAL NOT NULL,                 -- grams per one measure

            UNIQUE(food_id, measure_name)
        );

        CREATE INDEX IF NOT EXISTS idx_food_measures_food ON food_measures(food_id);

        -- ============================================
        -- FOOD LOGS
        -- Logged consumption; user accounts live upstream
        -- ============================================
        CREATE TABLE IF NOT EXISTS food_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            food_id INTEGER NOT NULL REFERENCES foods(id) ON DELETE RESTRICT,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL DEFAULT 'g',
            log_date TEXT NOT NULL,              -- ISO date: "2026-08-23"
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_food_logs_user_date ON food_logs(user_id, log_date);
        CREATE INDEX IF NOT EXISTS idx_food_logs_food ON food_logs(food_id);
        "#,
    )?;

    Ok(())
}
