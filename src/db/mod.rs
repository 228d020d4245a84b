// src/db/mod.rs

//! Local cache database
//!
//! SQLite-backed cache of the package index snapshot, so repeated
//! checks resolve offline. Lives under the user data directory by
//! default; every command takes `--db` to point elsewhere.

pub mod models;
pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Database filename under the data directory
const DB_FILENAME: &str = "index.db";

/// Default path for the cache database
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depyard")
        .join(DB_FILENAME)
}

/// Open the cache database, creating and migrating it if necessary
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    debug!("Opening cache database at {}", path.display());
    let conn = Connection::open(path)?;
    schema::migrate(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (tests, one-shot checks)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    schema::migrate(&conn)?;
    Ok(conn)
}
