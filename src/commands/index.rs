// src/commands/index.rs

//! Index snapshot cache commands

use std::path::Path;

use anyhow::{anyhow, Result};

use depyard::capability::classify_with_hint;
use depyard::db::models::{IndexMeta, IndexPackage};
use depyard::depref::DepRef;
use depyard::index::{needs_sync, sync_index, IndexSource};

/// Fetch a snapshot and replace the cache wholesale
pub fn cmd_index_sync(
    source: &str,
    db_path: Option<&Path>,
    max_age: Option<i64>,
    force: bool,
) -> Result<()> {
    let source = IndexSource::parse(source);
    let mut conn = super::open_cache(db_path)?;

    if let Some(mut meta) = IndexMeta::load(&conn)? {
        // Freshness is judged against the requested expiry
        if let Some(secs) = max_age {
            meta.metadata_expire = secs;
        }
        if !force && !needs_sync(&meta) {
            if max_age.is_some() {
                meta.save(&conn)?;
            }
            println!(
                "Cache is fresh ({} {}, synced {}). Use --force to sync anyway.",
                meta.name,
                meta.version,
                meta.last_sync.as_deref().unwrap_or("never")
            );
            return Ok(());
        }
    }

    let count = sync_index(&mut conn, &source, max_age)?;

    let meta = IndexMeta::load(&conn)?
        .ok_or_else(|| anyhow!("Cache metadata missing after sync"))?;
    println!(
        "Synchronized {} {}: {} package(s) cached",
        meta.name, meta.version, count
    );
    Ok(())
}

/// Show cache provenance and freshness
pub fn cmd_index_status(db_path: Option<&Path>) -> Result<()> {
    let conn = super::open_cache(db_path)?;

    let Some(meta) = IndexMeta::load(&conn)? else {
        println!("No index snapshot cached. Run 'depyard index sync' first.");
        return Ok(());
    };

    println!("Index:     {} {}", meta.name, meta.version);
    if let Some(source) = &meta.source {
        println!("Source:    {}", source);
    }
    if let Some(checksum) = &meta.checksum {
        println!("Checksum:  {}", checksum);
    }
    println!("Packages:  {}", meta.package_count);
    println!(
        "Last sync: {}",
        meta.last_sync.as_deref().unwrap_or("never")
    );
    println!(
        "Freshness: {} (expiry {}s)",
        if needs_sync(&meta) { "stale" } else { "fresh" },
        meta.metadata_expire
    );
    Ok(())
}

/// Search cached packages by attribute path or description
pub fn cmd_index_search(pattern: &str, db_path: Option<&Path>) -> Result<()> {
    let conn = super::open_cache(db_path)?;
    IndexPackage::require_synced(&conn)?;

    let hits = IndexPackage::search(&conn, pattern)?;
    if hits.is_empty() {
        println!("No packages match '{}'", pattern);
        return Ok(());
    }

    for pkg in &hits {
        let broken = if pkg.broken { " [broken]" } else { "" };
        match &pkg.description {
            Some(desc) => println!("{} {}{} - {}", pkg.attr, pkg.version, broken, desc),
            None => println!("{} {}{}", pkg.attr, pkg.version, broken),
        }
    }
    println!();
    println!("{} package(s)", hits.len());
    Ok(())
}

/// Show one cached package
pub fn cmd_index_show(attr: &str, db_path: Option<&Path>) -> Result<()> {
    let conn = super::open_cache(db_path)?;
    IndexPackage::require_synced(&conn)?;

    let pkg = IndexPackage::find_by_attr(&conn, attr)?
        .ok_or_else(|| anyhow!("Package '{}' not found in the cached snapshot", attr))?;

    println!("Attribute:   {}", pkg.attr);
    println!("Version:     {}", pkg.version);
    if let Some(desc) = &pkg.description {
        println!("Description: {}", desc);
    }
    if let Some(homepage) = &pkg.homepage {
        println!("Homepage:    {}", homepage);
    }
    println!("Broken:      {}", if pkg.broken { "yes" } else { "no" });

    // Capability as check would classify it, hint included
    if let Ok(dep) = DepRef::parse(&pkg.attr) {
        let class = classify_with_hint(&dep, pkg.capability.as_deref());
        println!("Capability:  {} ({})", class.name(), class.description());
    }
    Ok(())
}
