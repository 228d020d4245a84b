// tests/sync_lifecycle.rs

//! Cache lifecycle: sync a snapshot into an on-disk database, read it
//! back, and replace it wholesale with the next sync.

mod common;

use depyard::db;
use depyard::db::models::{IndexMeta, IndexPackage};
use depyard::index::{needs_sync, sync_index, IndexSource, PackageIndex};

use common::{snapshot_with, write_snapshot};

#[test]
fn sync_populates_on_disk_cache() {
    let (_snap_dir, snap_path) = write_snapshot(&snapshot_with(&["cairo", "tk", "freetype"]));
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("cache").join("index.db");

    let mut conn = db::open_database(&db_path).unwrap();
    let count = sync_index(&mut conn, &IndexSource::File(snap_path.clone()), None).unwrap();
    assert_eq!(count, 3);
    drop(conn);

    // Reopen and read back through the index view
    let conn = db::open_database(&db_path).unwrap();
    let index = PackageIndex::from_cache(&conn).unwrap();
    assert_eq!(index.name, "nixpkgs");
    assert_eq!(index.len(), 3);
    assert!(index.lookup("cairo").is_some());

    let meta = IndexMeta::load(&conn).unwrap().unwrap();
    assert_eq!(meta.package_count, 3);
    assert_eq!(meta.source.as_deref(), snap_path.to_str());
    assert!(meta.checksum.is_some());
    assert!(!needs_sync(&meta));
}

#[test]
fn resync_replaces_cache_wholesale() {
    let mut conn = db::open_in_memory().unwrap();

    let (_d1, p1) = write_snapshot(&snapshot_with(&["cairo", "tk"]));
    sync_index(&mut conn, &IndexSource::File(p1), None).unwrap();

    let (_d2, p2) = write_snapshot(&snapshot_with(&["ghostscript"]));
    sync_index(&mut conn, &IndexSource::File(p2), None).unwrap();

    assert_eq!(IndexPackage::count(&conn).unwrap(), 1);
    assert!(IndexPackage::find_by_attr(&conn, "cairo").unwrap().is_none());
    assert!(IndexPackage::find_by_attr(&conn, "ghostscript")
        .unwrap()
        .is_some());
}

#[test]
fn corrupt_snapshot_leaves_cache_untouched() {
    let mut conn = db::open_in_memory().unwrap();

    let (_d1, p1) = write_snapshot(&snapshot_with(&["cairo"]));
    sync_index(&mut conn, &IndexSource::File(p1), None).unwrap();

    // Tampered snapshot: checksum no longer matches the package list
    let tampered_dir = tempfile::tempdir().unwrap();
    let tampered_path = tampered_dir.path().join("index.json");
    let mut doc = snapshot_with(&["qhull", "tk"]);
    doc.checksum = Some("0".repeat(64));
    std::fs::write(&tampered_path, serde_json::to_string(&doc).unwrap()).unwrap();

    let result = sync_index(&mut conn, &IndexSource::File(tampered_path), None);
    assert!(result.is_err());

    // The earlier sync is still intact
    let index = PackageIndex::from_cache(&conn).unwrap();
    assert_eq!(index.len(), 1);
    assert!(index.lookup("cairo").is_some());
}

#[test]
fn missing_snapshot_file_is_an_error() {
    let mut conn = db::open_in_memory().unwrap();
    let source = IndexSource::File("/nonexistent/index.json".into());
    assert!(sync_index(&mut conn, &source, None).is_err());
}

#[test]
fn requested_expiry_applies_on_first_sync() {
    // A fresh database has no meta row yet; the expiry must still land
    let (_dir, path) = write_snapshot(&snapshot_with(&["cairo"]));
    let mut conn = db::open_in_memory().unwrap();

    sync_index(&mut conn, &IndexSource::File(path), Some(600)).unwrap();

    let meta = IndexMeta::load(&conn).unwrap().unwrap();
    assert_eq!(meta.metadata_expire, 600);
    assert!(!needs_sync(&meta));
}

#[test]
fn expiry_persists_across_later_syncs() {
    let mut conn = db::open_in_memory().unwrap();

    let (_d1, p1) = write_snapshot(&snapshot_with(&["cairo"]));
    sync_index(&mut conn, &IndexSource::File(p1), Some(600)).unwrap();

    let (_d2, p2) = write_snapshot(&snapshot_with(&["tk"]));
    sync_index(&mut conn, &IndexSource::File(p2), None).unwrap();

    let meta = IndexMeta::load(&conn).unwrap().unwrap();
    assert_eq!(meta.metadata_expire, 600);
}
