// src/index/mod.rs

//! Package index snapshots
//!
//! Declarations resolve against a snapshot of one fixed package index.
//! The snapshot is fetched over HTTP and cached in the local database,
//! or read straight from a JSON file for one-shot checks in CI.

pub mod client;
pub mod metadata;
pub mod sync;

pub use client::IndexClient;
pub use metadata::{IndexMetadata, PackageRecord};
pub use sync::{current_timestamp, needs_sync, parse_timestamp, sync_index};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use url::Url;

use crate::db::models::{IndexMeta, IndexPackage};
use crate::error::{Error, Result};

/// Where a snapshot comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// Fetch over HTTP(S)
    Url(String),
    /// Read a local JSON file
    File(PathBuf),
}

impl IndexSource {
    /// Interpret a command-line source spec
    ///
    /// `http://` and `https://` specs fetch over the network; anything
    /// else is treated as a local path.
    pub fn parse(spec: &str) -> Self {
        if let Ok(url) = Url::parse(spec) {
            if matches!(url.scheme(), "http" | "https") {
                return Self::Url(spec.to_string());
            }
        }
        Self::File(PathBuf::from(spec))
    }

    /// Load the snapshot this source points at
    pub fn load(&self) -> Result<IndexMetadata> {
        match self {
            Self::Url(url) => IndexClient::new()?.fetch_snapshot(url),
            Self::File(path) => load_snapshot_file(path),
        }
    }

    /// Display string for logs and provenance
    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Read a snapshot from a local JSON file
pub fn load_snapshot_file(path: &Path) -> Result<IndexMetadata> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {e}", path.display())))?;

    let snapshot: IndexMetadata = serde_json::from_str(&content).map_err(|e| {
        Error::ParseError(format!("Invalid snapshot JSON in {}: {e}", path.display()))
    })?;

    Ok(snapshot)
}

/// One resolvable package in a [`PackageIndex`]
#[derive(Debug, Clone)]
pub struct PackageEntry {
    pub version: String,
    pub broken: bool,
    pub capability: Option<String>,
}

/// Uniform lookup view over a snapshot or the local cache
#[derive(Debug, Clone)]
pub struct PackageIndex {
    pub name: String,
    pub version: String,
    packages: BTreeMap<String, PackageEntry>,
}

impl PackageIndex {
    /// Build the view from a parsed snapshot
    pub fn from_snapshot(snapshot: &IndexMetadata) -> Self {
        let packages = snapshot
            .packages
            .iter()
            .map(|p| {
                (
                    p.attr.clone(),
                    PackageEntry {
                        version: p.version.clone(),
                        broken: p.broken,
                        capability: p.capability.clone(),
                    },
                )
            })
            .collect();

        Self {
            name: snapshot.name.clone(),
            version: snapshot.version.clone(),
            packages,
        }
    }

    /// Build the view from the local cache
    pub fn from_cache(conn: &Connection) -> Result<Self> {
        let meta = IndexMeta::load(conn)?.ok_or_else(|| {
            Error::InitError(
                "No index snapshot cached. Run 'depyard index sync' first.".to_string(),
            )
        })?;

        let packages = IndexPackage::list_all(conn)?
            .into_iter()
            .map(|p| {
                (
                    p.attr,
                    PackageEntry {
                        version: p.version,
                        broken: p.broken,
                        capability: p.capability,
                    },
                )
            })
            .collect();

        Ok(Self {
            name: meta.name,
            version: meta.version,
            packages,
        })
    }

    /// Look up a package by attribute path
    pub fn lookup(&self, attr: &str) -> Option<&PackageEntry> {
        self.packages.get(attr)
    }

    /// Number of resolvable packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// True when the index has no packages
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
