// src/commands/fmt.rs

//! Canonical formatting of declaration files

use std::path::Path;

use anyhow::Result;
use tracing::info;

use depyard::manifest::parse_manifest_file;

/// Rewrite a declaration in canonical form
///
/// With `check`, nothing is written: a unified diff is shown and the
/// process exits nonzero when the file is not already canonical.
pub fn cmd_fmt(manifest_path: &Path, check: bool) -> Result<()> {
    let original = std::fs::read_to_string(manifest_path)?;
    let manifest = parse_manifest_file(manifest_path)?;
    let canonical = manifest.to_nix();

    if original == canonical {
        println!("{} is already canonical", manifest_path.display());
        return Ok(());
    }

    if check {
        let patch = diffy::create_patch(&original, &canonical);
        print!("{}", patch);
        std::process::exit(1);
    }

    std::fs::write(manifest_path, &canonical)?;
    info!("Rewrote {} in canonical form", manifest_path.display());
    println!("Formatted {}", manifest_path.display());
    Ok(())
}
