//! Maintenance utility deleting placeholder "undetermined" measure rows
//! left behind by upstream imports.
//! Usage: cargo run --bin prune_measures

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

fn get_database_path() -> PathBuf {
    std::env::var("MACROSCALE_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("macroscale.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macroscale=info".parse()?))
        .init();

    let db_path = get_database_path();
    println!("Database: {}", db_path.display());

    let database = macroscale::db::Database::open(&db_path)?;

    database.with_conn(|conn| {
        macroscale::db::schema::init_schema(conn)?;

        let before = macroscale::models::FoodMeasure::count_undetermined(conn)?;
        println!("Undetermined measures: {}", before);

        let deleted = macroscale::models::FoodMeasure::prune_undetermined(conn)?;
        let remaining = macroscale::models::FoodMeasure::count(conn)?;

        println!("Deleted: {}", deleted);
        println!("Remaining measures: {}", remaining);
        Ok(())
    })?;

    Ok(())
}
