// src/commands/diff.rs

//! Comparing declarations as reference sets

use std::path::Path;

use anyhow::Result;

use depyard::manifest::{compute_diff, parse_manifest_file};

/// Compare two declaration files as reference sets
pub fn cmd_diff(old_path: &Path, new_path: &Path) -> Result<()> {
    let old = parse_manifest_file(old_path)?;
    let new = parse_manifest_file(new_path)?;

    let diff = compute_diff(&old, &new);
    if diff.is_empty() {
        println!("No differences ({} reference(s))", diff.unchanged);
        return Ok(());
    }

    for dep in &diff.added {
        println!("+ {}", dep);
    }
    for dep in &diff.removed {
        println!("- {}", dep);
    }
    println!();
    println!("{}", diff.summary());
    Ok(())
}
