// src/db/models.rs

//! Data models for the depyard cache database
//!
//! Rust structs corresponding to the cache tables, with methods for
//! creating, reading, and deleting records.

use crate::error::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Provenance of the cached index snapshot (single row)
#[derive(Debug, Clone)]
pub struct IndexMeta {
    pub name: String,
    pub version: String,
    pub checksum: Option<String>,
    pub source: Option<String>,
    pub package_count: i64,
    pub metadata_expire: i64,
    pub last_sync: Option<String>,
}

impl IndexMeta {
    /// Create metadata for a snapshot that has not been cached yet
    pub fn new(name: String, version: String) -> Self {
        Self {
            name,
            version,
            checksum: None,
            source: None,
            package_count: 0,
            metadata_expire: 86400, // Default: 24 hours
            last_sync: None,
        }
    }

    /// Load the cached snapshot metadata, if any
    pub fn load(conn: &Connection) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT name, version, checksum, source, package_count, metadata_expire, last_sync
             FROM index_meta WHERE id = 1",
        )?;

        let meta = stmt.query_row([], Self::from_row).optional()?;

        Ok(meta)
    }

    /// Save the snapshot metadata, replacing any previous row
    pub fn save(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT OR REPLACE INTO index_meta
             (id, name, version, checksum, source, package_count, metadata_expire, last_sync)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &self.name,
                &self.version,
                &self.checksum,
                &self.source,
                self.package_count,
                self.metadata_expire,
                &self.last_sync,
            ],
        )?;

        Ok(())
    }

    /// Convert a database row to an IndexMeta
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            version: row.get(1)?,
            checksum: row.get(2)?,
            source: row.get(3)?,
            package_count: row.get(4)?,
            metadata_expire: row.get(5)?,
            last_sync: row.get(6)?,
        })
    }
}

/// A resolvable package from the cached index snapshot
#[derive(Debug, Clone)]
pub struct IndexPackage {
    pub attr: String,
    pub version: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub broken: bool,
    pub capability: Option<String>,
}

impl IndexPackage {
    /// Insert this package into the cache
    pub fn insert(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO index_packages (attr, version, description, homepage, broken, capability)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &self.attr,
                &self.version,
                &self.description,
                &self.homepage,
                self.broken as i32,
                &self.capability,
            ],
        )?;

        Ok(())
    }

    /// Find a package by its attribute path
    pub fn find_by_attr(conn: &Connection, attr: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT attr, version, description, homepage, broken, capability
             FROM index_packages WHERE attr = ?1",
        )?;

        let package = stmt.query_row([attr], Self::from_row).optional()?;

        Ok(package)
    }

    /// List all cached packages, ordered by attribute path
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT attr, version, description, homepage, broken, capability
             FROM index_packages ORDER BY attr",
        )?;

        let packages = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(packages)
    }

    /// Search cached packages by pattern (attr or description)
    pub fn search(conn: &Connection, pattern: &str) -> Result<Vec<Self>> {
        let search_pattern = format!("%{pattern}%");
        let mut stmt = conn.prepare(
            "SELECT attr, version, description, homepage, broken, capability
             FROM index_packages
             WHERE attr LIKE ?1 OR description LIKE ?1
             ORDER BY attr",
        )?;

        let packages = stmt
            .query_map([&search_pattern], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(packages)
    }

    /// Number of cached packages
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM index_packages", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete all cached packages (used when syncing)
    pub fn delete_all(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM index_packages", [])?;
        Ok(())
    }

    /// Require that the cache has been synced at least once
    pub fn require_synced(conn: &Connection) -> Result<()> {
        if IndexMeta::load(conn)?.is_none() {
            return Err(Error::InitError(
                "No index snapshot cached. Run 'depyard index sync' first.".to_string(),
            ));
        }
        Ok(())
    }

    /// Convert a database row to an IndexPackage
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            attr: row.get(0)?,
            version: row.get(1)?,
            description: row.get(2)?,
            homepage: row.get(3)?,
            broken: row.get::<_, i32>(4)? != 0,
            capability: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::migrate;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn
    }

    fn sample_package(attr: &str) -> IndexPackage {
        IndexPackage {
            attr: attr.to_string(),
            version: "1.0".to_string(),
            description: None,
            homepage: None,
            broken: false,
            capability: None,
        }
    }

    #[test]
    fn test_meta_load_empty() {
        let conn = test_conn();
        assert!(IndexMeta::load(&conn).unwrap().is_none());
    }

    #[test]
    fn test_meta_save_and_load() {
        let conn = test_conn();
        let mut meta = IndexMeta::new("nixpkgs".to_string(), "23.11".to_string());
        meta.package_count = 21;
        meta.save(&conn).unwrap();

        let loaded = IndexMeta::load(&conn).unwrap().unwrap();
        assert_eq!(loaded.name, "nixpkgs");
        assert_eq!(loaded.version, "23.11");
        assert_eq!(loaded.package_count, 21);
        assert_eq!(loaded.metadata_expire, 86400);
    }

    #[test]
    fn test_meta_save_replaces() {
        let conn = test_conn();
        IndexMeta::new("nixpkgs".to_string(), "23.05".to_string())
            .save(&conn)
            .unwrap();
        IndexMeta::new("nixpkgs".to_string(), "23.11".to_string())
            .save(&conn)
            .unwrap();

        let loaded = IndexMeta::load(&conn).unwrap().unwrap();
        assert_eq!(loaded.version, "23.11");

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM index_meta", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_package_insert_and_find() {
        let conn = test_conn();
        let mut pkg = sample_package("cairo");
        pkg.description = Some("2D vector graphics library".to_string());
        pkg.insert(&conn).unwrap();

        let found = IndexPackage::find_by_attr(&conn, "cairo").unwrap().unwrap();
        assert_eq!(found.attr, "cairo");
        assert!(!found.broken);

        assert!(IndexPackage::find_by_attr(&conn, "missing")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_package_duplicate_attr_rejected() {
        let conn = test_conn();
        sample_package("cairo").insert(&conn).unwrap();
        assert!(sample_package("cairo").insert(&conn).is_err());
    }

    #[test]
    fn test_package_search() {
        let conn = test_conn();
        let mut pkg = sample_package("xorg.libX11");
        pkg.description = Some("Xlib client library".to_string());
        pkg.insert(&conn).unwrap();
        sample_package("freetype").insert(&conn).unwrap();

        let hits = IndexPackage::search(&conn, "xorg").unwrap();
        assert_eq!(hits.len(), 1);

        let hits = IndexPackage::search(&conn, "client library").unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_package_delete_all() {
        let conn = test_conn();
        sample_package("tcl").insert(&conn).unwrap();
        sample_package("tk").insert(&conn).unwrap();
        assert_eq!(IndexPackage::count(&conn).unwrap(), 2);

        IndexPackage::delete_all(&conn).unwrap();
        assert_eq!(IndexPackage::count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_require_synced() {
        let conn = test_conn();
        assert!(IndexPackage::require_synced(&conn).is_err());

        IndexMeta::new("nixpkgs".to_string(), "23.11".to_string())
            .save(&conn)
            .unwrap();
        assert!(IndexPackage::require_synced(&conn).is_ok());
    }
}
