//! Database module
//!
//! SQLite connection pooling and schema setup for the food store.

pub mod connection;
pub mod schema;

pub use connection::{Database, DbError, DbResult};
