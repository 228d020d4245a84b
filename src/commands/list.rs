// src/commands/list.rs

//! Listing declared references

use std::path::Path;

use anyhow::{anyhow, Result};
use glob::Pattern;

use depyard::capability::{classify, CapabilityClass};
use depyard::manifest::parse_manifest_file;

/// List declared references, optionally grouped by capability class
pub fn cmd_list(manifest_path: &Path, filter: Option<&str>, capabilities: bool) -> Result<()> {
    let mut manifest = parse_manifest_file(manifest_path)?;
    manifest.dedup();

    let pattern = filter
        .map(|g| Pattern::new(g).map_err(|e| anyhow!("Invalid filter glob '{}': {}", g, e)))
        .transpose()?;

    let deps: Vec<_> = manifest
        .deps
        .iter()
        .filter(|d| pattern.as_ref().is_none_or(|p| p.matches(&d.attr())))
        .collect();

    if deps.is_empty() {
        println!("No references match");
        return Ok(());
    }

    if capabilities {
        for class in CapabilityClass::all() {
            let members: Vec<String> = deps
                .iter()
                .filter(|d| classify(d) == *class)
                .map(|d| d.attr())
                .collect();
            if members.is_empty() {
                continue;
            }
            println!("{} ({})", class.name(), class.description());
            for attr in members {
                println!("  {}", attr);
            }
        }
    } else {
        for dep in &deps {
            println!("{}", dep);
        }
    }

    println!();
    println!("{} reference(s)", deps.len());
    Ok(())
}
