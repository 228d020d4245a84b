// src/commands/check.rs

//! Declaration validation: the dry-run resolve

use std::path::Path;

use anyhow::{anyhow, Result};
use glob::Pattern;
use tracing::{info, warn};

use depyard::capability::CapabilityClass;
use depyard::db::models::IndexMeta;
use depyard::index::{needs_sync, IndexSource, PackageIndex};
use depyard::manifest::parse_manifest_file;
use depyard::resolve::{resolve, ResolutionOptions, ResolutionReport};

/// Validate a declaration against the package index
pub fn cmd_check(
    manifest_path: &Path,
    index_source: Option<&str>,
    db_path: Option<&Path>,
    require: &[String],
    ignore: &[String],
    strict: bool,
) -> Result<()> {
    let manifest = parse_manifest_file(manifest_path)?;
    info!(
        "Checking {} ({} declared references)",
        manifest_path.display(),
        manifest.len()
    );

    let options = ResolutionOptions {
        require: parse_require(require)?,
        ignore: parse_ignore(ignore)?,
    };

    let index = match index_source {
        Some(spec) => {
            let snapshot = IndexSource::parse(spec).load()?;
            snapshot.verify_checksum()?;
            PackageIndex::from_snapshot(&snapshot)
        }
        None => {
            let conn = super::open_cache(db_path)?;
            if let Some(meta) = IndexMeta::load(&conn)? {
                if needs_sync(&meta) {
                    warn!("Cached snapshot is stale; consider 'depyard index sync'");
                }
            }
            PackageIndex::from_cache(&conn)?
        }
    };

    let report = resolve(&manifest, &index, &options);
    print_report(&report);

    if !report.passes(strict) {
        std::process::exit(1);
    }
    Ok(())
}

/// Parse --require class names
fn parse_require(names: &[String]) -> Result<Vec<CapabilityClass>> {
    names
        .iter()
        .map(|name| {
            CapabilityClass::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = CapabilityClass::all().iter().map(|c| c.name()).collect();
                anyhow!(
                    "Unknown capability class '{}' (known: {})",
                    name,
                    known.join(", ")
                )
            })
        })
        .collect()
}

/// Parse --ignore globs
fn parse_ignore(globs: &[String]) -> Result<Vec<Pattern>> {
    globs
        .iter()
        .map(|g| Pattern::new(g).map_err(|e| anyhow!("Invalid ignore glob '{}': {}", g, e)))
        .collect()
}

fn print_report(report: &ResolutionReport) {
    println!("Index: {}", report.index);
    println!(
        "Resolved {} of {} references",
        report.resolved.len(),
        report.resolved.len() + report.missing.len()
    );

    if !report.ignored.is_empty() {
        println!("Ignored {} reference(s)", report.ignored.len());
    }

    if !report.duplicates.is_empty() {
        println!();
        println!("Duplicate entries (wasteful, not invalid):");
        for attr in &report.duplicates {
            println!("  {}", attr);
        }
    }

    if !report.broken.is_empty() {
        println!();
        println!("Resolved but marked broken in the index:");
        for dep in &report.broken {
            println!("  {}", dep);
        }
    }

    if !report.missing.is_empty() {
        println!();
        println!("Missing from the index:");
        for dep in &report.missing {
            println!("  {}", dep);
        }
    }

    let coverage = report.capability_coverage();
    if !coverage.is_empty() {
        println!();
        println!("Capability coverage:");
        for class in CapabilityClass::all() {
            if let Some(attrs) = coverage.get(class) {
                println!("  {:<22} {}", class.name(), attrs.join(", "));
            }
        }
    }

    if !report.missing_capabilities.is_empty() {
        println!();
        println!("Required capabilities not covered:");
        for class in &report.missing_capabilities {
            println!("  {} ({})", class.name(), class.description());
        }
    }

    println!();
    if report.is_clean() {
        println!("OK: 0 missing references");
    } else {
        println!(
            "FAIL: {} missing reference(s), {} uncovered capability class(es)",
            report.missing.len(),
            report.missing_capabilities.len()
        );
    }
}
