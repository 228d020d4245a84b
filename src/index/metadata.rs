// src/index/metadata.rs

//! Index snapshot data structures
//!
//! Types for the JSON snapshots of the package index that declarations
//! resolve against. A snapshot is the published list of resolvable
//! attribute paths, each with a version and optional capability hint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Package index snapshot (JSON document)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub name: String,
    pub version: String,
    /// Hex SHA-256 over the canonical package list, when published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    pub packages: Vec<PackageRecord>,
}

/// One resolvable package in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub attr: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default)]
    pub broken: bool,
    /// Capability class name; overrides the builtin classifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
}

impl IndexMetadata {
    /// Find a package record by attribute path
    pub fn find(&self, attr: &str) -> Option<&PackageRecord> {
        self.packages.iter().find(|p| p.attr == attr)
    }

    /// Hex SHA-256 over the canonical (JSON) package list
    pub fn compute_checksum(&self) -> String {
        let canonical =
            serde_json::to_vec(&self.packages).expect("package list serialization should not fail");
        hex::encode(Sha256::digest(&canonical))
    }

    /// Verify the published checksum, when present
    pub fn verify_checksum(&self) -> Result<()> {
        if let Some(expected) = &self.checksum {
            let actual = self.compute_checksum();
            if &actual != expected {
                return Err(Error::ChecksumMismatch {
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        Ok(())
    }
}
