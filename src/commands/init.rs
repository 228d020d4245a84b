// src/commands/init.rs

//! Starter declaration files

use std::path::Path;

use anyhow::{anyhow, Result};

use depyard::manifest::{baseline_manifest, Manifest};

/// Write a starter declaration file
///
/// The default scaffold is the baseline set for a desktop plotting
/// environment; `--empty` writes a declaration with no references.
pub fn cmd_init(output: &Path, force: bool, empty: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(anyhow!(
            "{} already exists (use --force to overwrite)",
            output.display()
        ));
    }

    let manifest = if empty {
        Manifest::new()
    } else {
        baseline_manifest()
    };

    manifest.save(output)?;
    println!(
        "Wrote {} with {} reference(s)",
        output.display(),
        manifest.len()
    );
    Ok(())
}
