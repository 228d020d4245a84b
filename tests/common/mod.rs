// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

use std::path::PathBuf;

use depyard::index::{IndexMetadata, PackageRecord};
use depyard::manifest::BASELINE_ATTRS;
use tempfile::TempDir;

/// Build a snapshot containing the given attribute paths.
pub fn snapshot_with(attrs: &[&str]) -> IndexMetadata {
    IndexMetadata {
        name: "nixpkgs".to_string(),
        version: "23.11".to_string(),
        checksum: None,
        packages: attrs
            .iter()
            .map(|attr| PackageRecord {
                attr: attr.to_string(),
                version: "1.0".to_string(),
                description: None,
                homepage: None,
                broken: false,
                capability: None,
            })
            .collect(),
    }
}

/// Build a snapshot that resolves the full baseline declaration,
/// plus a few packages the declaration does not name.
pub fn baseline_snapshot() -> IndexMetadata {
    let mut attrs: Vec<&str> = BASELINE_ATTRS.to_vec();
    attrs.extend(["zlib", "libpng", "expat"]);
    snapshot_with(&attrs)
}

/// Write a snapshot as JSON (with its checksum filled in) into a
/// temp directory.
///
/// Returns (TempDir, path) - keep the TempDir alive to prevent cleanup.
pub fn write_snapshot(snapshot: &IndexMetadata) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");

    let mut doc = snapshot.clone();
    doc.checksum = Some(doc.compute_checksum());
    std::fs::write(&path, serde_json::to_string(&doc).unwrap()).unwrap();

    (dir, path)
}
