//! Database schema initialization and migrations.

use log::debug;

use crate::error::{DatabaseResultExt, Result};

/// Version stored in `PRAGMA user_version` once every migration has run.
const SCHEMA_VERSION: i64 = 2;

impl super::Database {
    /// Creates missing tables from the embedded schema, then migrates.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    fn user_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .db_context("Failed to inspect table columns")
    }

    /// Upgrades databases created by earlier releases.
    fn apply_migrations(&self) -> Result<()> {
        let version = self.user_version()?;
        if version >= SCHEMA_VERSION {
            return Ok(());
        }

        // v2: card reference on bookings
        if !self.has_column("bookings", "card_last_four")? {
            debug!("Adding bookings.card_last_four");
            self.connection
                .execute("ALTER TABLE bookings ADD COLUMN card_last_four TEXT", [])
                .db_context("Failed to add card_last_four column to bookings table")?;
        }

        self.connection
            .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .db_context("Failed to record schema version")?;
        Ok(())
    }
}
