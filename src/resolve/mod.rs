// src/resolve/mod.rs

//! Dry-run resolution of declarations against a package index
//!
//! Resolution never installs anything. It checks that every declared
//! reference maps to a resolvable package in the index snapshot and
//! reports what the provisioned environment would provide. A
//! declaration is clean when nothing is missing and every required
//! capability class is covered; duplicates and broken packages are
//! warnings unless the caller promotes them.

use std::collections::{BTreeMap, BTreeSet};

use glob::Pattern;
use tracing::{debug, warn};

use crate::capability::{classify_with_hint, CapabilityClass};
use crate::depref::DepRef;
use crate::index::PackageIndex;
use crate::manifest::Manifest;

/// Options controlling a dry-run resolution
#[derive(Debug, Clone, Default)]
pub struct ResolutionOptions {
    /// Capability classes the resolved set must provide
    pub require: Vec<CapabilityClass>,
    /// Attribute-path globs to skip entirely
    pub ignore: Vec<Pattern>,
}

/// A declared reference that resolved in the index
#[derive(Debug, Clone)]
pub struct ResolvedRef {
    pub dep: DepRef,
    pub version: String,
    pub capability: CapabilityClass,
}

/// Report of a dry-run resolution
#[derive(Debug, Clone)]
pub struct ResolutionReport {
    /// Index the declaration resolved against, e.g. "nixpkgs 23.11"
    pub index: String,
    /// References that resolved
    pub resolved: Vec<ResolvedRef>,
    /// References with no package in the index
    pub missing: Vec<DepRef>,
    /// References that resolved to packages marked broken
    pub broken: Vec<DepRef>,
    /// Attribute paths declared more than once
    pub duplicates: Vec<String>,
    /// References skipped by ignore globs
    pub ignored: Vec<DepRef>,
    /// Required capability classes with no resolved package
    pub missing_capabilities: Vec<CapabilityClass>,
}

impl ResolutionReport {
    /// Every reference resolved and every required capability is covered
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.missing_capabilities.is_empty()
    }

    /// Duplicates and broken packages warn without failing the check
    pub fn has_warnings(&self) -> bool {
        !self.duplicates.is_empty() || !self.broken.is_empty()
    }

    /// Overall pass/fail, with `strict` promoting warnings to failures
    pub fn passes(&self, strict: bool) -> bool {
        self.is_clean() && !(strict && self.has_warnings())
    }

    /// Resolved attribute paths grouped by capability class
    pub fn capability_coverage(&self) -> BTreeMap<CapabilityClass, Vec<String>> {
        let mut coverage: BTreeMap<CapabilityClass, Vec<String>> = BTreeMap::new();
        for r in &self.resolved {
            coverage.entry(r.capability).or_default().push(r.dep.attr());
        }
        coverage
    }
}

/// Resolve a declaration against an index snapshot, without installing
pub fn resolve(
    manifest: &Manifest,
    index: &PackageIndex,
    options: &ResolutionOptions,
) -> ResolutionReport {
    let mut report = ResolutionReport {
        index: format!("{} {}", index.name, index.version),
        resolved: Vec::new(),
        missing: Vec::new(),
        broken: Vec::new(),
        duplicates: manifest.duplicates(),
        ignored: Vec::new(),
        missing_capabilities: Vec::new(),
    };

    // Duplicate entries resolve once; the capability set is unchanged
    let mut seen = BTreeSet::new();
    for dep in &manifest.deps {
        let attr = dep.attr();
        if !seen.insert(attr.clone()) {
            continue;
        }

        if options.ignore.iter().any(|p| p.matches(&attr)) {
            debug!("Skipping {} (ignored)", attr);
            report.ignored.push(dep.clone());
            continue;
        }

        match index.lookup(&attr) {
            Some(entry) => {
                if entry.broken {
                    warn!("{} resolves but is marked broken in the index", attr);
                    report.broken.push(dep.clone());
                }
                report.resolved.push(ResolvedRef {
                    dep: dep.clone(),
                    version: entry.version.clone(),
                    capability: classify_with_hint(dep, entry.capability.as_deref()),
                });
            }
            None => {
                debug!("{} not found in index", attr);
                report.missing.push(dep.clone());
            }
        }
    }

    let coverage = report.capability_coverage();
    for class in &options.require {
        if !coverage.contains_key(class) {
            report.missing_capabilities.push(*class);
        }
    }

    report
}
