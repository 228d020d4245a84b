// src/lib.rs

//! depyard
//!
//! Toolkit for declarative environment dependency manifests: the
//! `{ pkgs }: { deps = [ ... ]; }` files an external provisioning tool
//! evaluates to materialize native system libraries. depyard parses,
//! validates, formats, and diffs these declarations and dry-run-resolves
//! them against a snapshot of the target package index. It never
//! provisions anything itself.
//!
//! # Architecture
//!
//! - Declarations are inert data: parsed once, resolved as a set
//! - Single fixed index: one snapshot, cached wholesale in SQLite
//! - Dry-run only: resolution reports, it does not install
//! - Capability classes: what the provisioned environment would expose

pub mod capability;
pub mod db;
pub mod depref;
mod error;
pub mod index;
pub mod manifest;
pub mod resolve;

pub use capability::{classify, classify_with_hint, CapabilityClass};
pub use depref::{DepRef, DepRefParseError};
pub use error::{Error, Result};
pub use manifest::{
    baseline_manifest, compute_diff, load_manifest, manifest_exists, parse_manifest_file,
    parse_manifest_str, Manifest, ManifestDiff, ManifestError, BASELINE_ATTRS,
    DEFAULT_MANIFEST_PATH, DEFAULT_SCOPE,
};
pub use resolve::{resolve, ResolutionOptions, ResolutionReport, ResolvedRef};
