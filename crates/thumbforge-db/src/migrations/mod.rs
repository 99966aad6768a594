//! Embedded schema migrations.
//!
//! Each migration runs once, inside its own transaction, and is recorded in
//! `schema_migrations`. Opening a database that is already current is a no-op.

use std::fmt;

use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Cannot read schema version: {0}")]
    Version(#[source] rusqlite::Error),

    #[error("Migration {version} ({name}) failed: {source}")]
    Apply {
        version: u32,
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

/// `(version, name, sql)`, ascending by version.
const MIGRATIONS: &[(u32, &str, &str)] = &[(1, "initial", include_str!("001_initial.sql"))];

const TRACKING_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Where a database stands relative to the migrations built into this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Highest version recorded in the database.
    pub applied: u32,
    /// Highest version this build knows about.
    pub embedded: u32,
}

impl SchemaStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.applied >= self.embedded
    }

    pub fn pending(&self) -> u32 {
        self.embedded.saturating_sub(self.applied)
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema version {}/{}", self.applied, self.embedded)
    }
}

fn embedded_version() -> u32 {
    MIGRATIONS.last().map_or(0, |&(version, ..)| version)
}

fn applied_version(conn: &Connection) -> Result<u32, MigrationError> {
    conn.execute_batch(TRACKING_TABLE)
        .map_err(MigrationError::Version)?;

    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .map_err(MigrationError::Version)?;

    Ok(version.unwrap_or(0))
}

/// Report the schema version without changing anything but the tracking table.
pub fn schema_status(conn: &Connection) -> Result<SchemaStatus, MigrationError> {
    Ok(SchemaStatus {
        applied: applied_version(conn)?,
        embedded: embedded_version(),
    })
}

/// Apply every migration newer than the recorded version.
///
/// Returns how many were applied; zero when the schema is already current.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    let from = applied_version(conn)?;
    let mut applied = 0;

    for &(version, name, sql) in MIGRATIONS.iter().filter(|(v, ..)| *v > from) {
        let failed = |source: rusqlite::Error| MigrationError::Apply {
            version,
            name,
            source,
        };

        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(sql).map_err(failed)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
            params![version, name],
        )
        .map_err(failed)?;
        tx.commit().map_err(failed)?;

        tracing::info!(version, migration = name, "Applied migration");
        applied += 1;
    }

    Ok(applied)
}
