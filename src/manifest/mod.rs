// src/manifest/mod.rs

//! Dependency declarations - declarative environment manifests
//!
//! A declaration file describes the native packages an environment needs
//! as a single-argument function from a package scope to a record with a
//! `deps` list. Nothing in the file is executable; an external
//! provisioning tool evaluates it against a package index and realizes
//! the environment. depyard parses, validates, formats, and diffs these
//! files, and dry-run-resolves them against an index snapshot.
//!
//! # Example deps.nix
//!
//! ```nix
//! { pkgs }: {
//!   deps = [
//!     # Windowing
//!     pkgs.xorg.libX11
//!     pkgs.xorg.libXext
//!     # Fonts and 2D rendering
//!     pkgs.freetype
//!     pkgs.cairo
//!   ];
//! }
//! ```

pub mod parser;
mod baseline;
mod diff;
mod emit;

pub use baseline::{baseline_manifest, BASELINE_ATTRS};
pub use diff::{compute_diff, ManifestDiff};
pub use parser::{parse_manifest_file, parse_manifest_str};

use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

use crate::depref::{DepRef, DepRefParseError};

/// Default path for the declaration file
pub const DEFAULT_MANIFEST_PATH: &str = "deps.nix";

/// Scope name conventionally bound by the declaration pattern
pub const DEFAULT_SCOPE: &str = "pkgs";

/// Errors that can occur when working with declaration files
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read declaration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Unrecognized key '{key}' at line {line}: only 'deps' is recognized")]
    UnrecognizedKey { key: String, line: usize },

    #[error("Key '{key}' given more than once (line {line})")]
    DuplicateKey { key: String, line: usize },

    #[error("Declaration record is missing the 'deps' list")]
    MissingDeps,

    #[error("Reference '{reference}' at line {line} is not rooted at scope '{scope}'")]
    UnscopedReference {
        reference: String,
        scope: String,
        line: usize,
    },

    #[error("Invalid package reference at line {line}: {source}")]
    InvalidReference {
        line: usize,
        #[source]
        source: DepRefParseError,
    },
}

/// Result type for declaration operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// A parsed dependency declaration
///
/// Entries keep file order and retain duplicates so callers can report
/// them; set-level views dedup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Scope name bound by the function pattern
    pub scope: String,

    /// Declared references, in file order
    pub deps: Vec<DepRef>,
}

impl Manifest {
    /// Create an empty declaration with the conventional scope
    pub fn new() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            deps: Vec::new(),
        }
    }

    /// Create a declaration from a list of references
    pub fn from_refs(refs: Vec<DepRef>) -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            deps: refs,
        }
    }

    /// Number of declared entries, duplicates included
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    /// True when no references are declared
    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// The deduplicated, ordered set of declared attribute paths
    pub fn reference_set(&self) -> BTreeSet<String> {
        self.deps.iter().map(|d| d.attr()).collect()
    }

    /// Check whether an attribute path is declared
    pub fn contains_attr(&self, attr: &str) -> bool {
        self.deps.iter().any(|d| d.attr() == attr)
    }

    /// Add a reference unless an equal one is already declared
    ///
    /// Returns true if the reference was added.
    pub fn add(&mut self, dep: DepRef) -> bool {
        if self.deps.contains(&dep) {
            return false;
        }
        self.deps.push(dep);
        true
    }

    /// Merge another declaration's references into this one
    ///
    /// Already-declared references are skipped, so merging is idempotent:
    /// the reference set after `a.union(&a)` equals `a`'s. Returns the
    /// number of references actually added.
    pub fn union(&mut self, other: &Manifest) -> usize {
        let mut added = 0;
        for dep in &other.deps {
            if self.add(dep.clone()) {
                added += 1;
            }
        }
        added
    }

    /// Attribute paths declared more than once, in first-occurrence order
    pub fn duplicates(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        let mut dups = Vec::new();
        for dep in &self.deps {
            let attr = dep.attr();
            if !seen.insert(attr.clone()) && reported.insert(attr.clone()) {
                dups.push(attr);
            }
        }
        dups
    }

    /// Drop duplicate entries, keeping the first occurrence of each
    ///
    /// Returns the number of entries removed.
    pub fn dedup(&mut self) -> usize {
        let before = self.deps.len();
        let mut seen = BTreeSet::new();
        self.deps.retain(|d| seen.insert(d.attr()));
        before - self.deps.len()
    }

    /// Render the declaration in canonical form
    ///
    /// Canonical form keeps declared order, drops duplicate entries, and
    /// uses fixed indentation. Parsing the output yields the same
    /// reference set.
    pub fn to_nix(&self) -> String {
        emit::emit_manifest(self)
    }

    /// Write the declaration to a file in canonical form
    pub fn save(&self, path: &Path) -> ManifestResult<()> {
        std::fs::write(path, self.to_nix())?;
        Ok(())
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a declaration from the default or specified path
pub fn load_manifest(path: Option<&Path>) -> ManifestResult<Manifest> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_MANIFEST_PATH));
    parse_manifest_file(path)
}

/// Check if a declaration file exists
pub fn manifest_exists(path: Option<&Path>) -> bool {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_MANIFEST_PATH));
    path.exists()
}
