// src/db/schema.rs

//! Database schema definitions and migrations for depyard
//!
//! The local database caches the package index snapshot so repeated
//! checks work offline. Schema changes go through numbered migrations.

use crate::error::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply all pending migrations to bring the database up to date
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        return Ok(());
    }

    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying migration to version {}", version);
        apply_migration(conn, version)?;
        set_schema_version(conn, version)?;
    }

    info!(
        "Schema migration complete. Now at version {}",
        SCHEMA_VERSION
    );
    Ok(())
}

/// Apply a specific migration version
fn apply_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => panic!("Unknown migration version: {}", version),
    }
}

/// Initial schema - Version 1
///
/// Two tables: `index_meta` holds provenance for the cached snapshot
/// (one row, the tool tracks a single fixed index), `index_packages`
/// holds the resolvable attribute paths.
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        -- Provenance of the cached index snapshot
        CREATE TABLE index_meta (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            name TEXT NOT NULL,
            version TEXT NOT NULL,
            checksum TEXT,
            source TEXT,
            package_count INTEGER NOT NULL DEFAULT 0,
            metadata_expire INTEGER NOT NULL DEFAULT 86400,
            last_sync TEXT
        );

        -- Resolvable packages from the snapshot
        CREATE TABLE index_packages (
            attr TEXT PRIMARY KEY,
            version TEXT NOT NULL,
            description TEXT,
            homepage TEXT,
            broken INTEGER NOT NULL DEFAULT 0,
            capability TEXT
        );

        CREATE INDEX idx_index_packages_capability ON index_packages(capability);
        ",
    )?;

    Ok(())
}
