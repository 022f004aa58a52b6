//! SQLite store behind the local backend.
//!
//! Each [`Database`] owns one connection. Callers open a fresh one per
//! operation (see [`crate::api::local`]), so nothing here is shared across
//! threads. Row decoding helpers live in [`utils`]; every entity has its own
//! `*_queries` module with its SQL kept as `const` strings.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod booking_queries;
pub mod bus_queries;
pub mod migrations;
pub mod route_queries;
pub mod seed;
pub mod user_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens the database at `path` and brings the schema up to date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database, used by unit tests.
    #[cfg(test)]
    pub(crate) fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
