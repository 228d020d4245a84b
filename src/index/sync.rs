// src/index/sync.rs

//! Index snapshot synchronization
//!
//! Fetches a snapshot and replaces the local cache wholesale. The tool
//! tracks a single fixed index, so there is nothing to merge: the new
//! snapshot wins entirely, inside one transaction.

use rusqlite::Connection;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::db::models::{IndexMeta, IndexPackage};
use crate::error::{Error, Result};

use super::metadata::IndexMetadata;
use super::IndexSource;

/// Get current timestamp as ISO 8601 string
pub fn current_timestamp() -> String {
    use chrono::Utc;
    Utc::now().to_rfc3339()
}

/// Parse ISO 8601 timestamp to Unix seconds
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    use chrono::DateTime;

    let dt = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|e| Error::ParseError(format!("Invalid timestamp: {e}")))?;

    Ok(dt.timestamp() as u64)
}

/// Check if the cached snapshot is stale
pub fn needs_sync(meta: &IndexMeta) -> bool {
    match &meta.last_sync {
        None => true, // Never synced
        Some(last_sync) => match parse_timestamp(last_sync) {
            Ok(last_sync_time) => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();

                let age_seconds = now.saturating_sub(last_sync_time);
                // A negative expiry never marks the cache fresh
                age_seconds > u64::try_from(meta.metadata_expire).unwrap_or(0)
            }
            Err(_) => true, // If we can't parse the timestamp, force sync
        },
    }
}

/// Synchronize the cache from an index source
///
/// Verifies the published checksum (when present) before touching the
/// cache. An `expire` value replaces the cache expiry, including on the
/// first sync; `None` keeps whatever was configured. Returns the number
/// of packages cached.
pub fn sync_index(
    conn: &mut Connection,
    source: &IndexSource,
    expire: Option<i64>,
) -> Result<usize> {
    info!("Synchronizing index from {}", source.describe());

    let snapshot = source.load()?;
    snapshot.verify_checksum()?;

    let count = replace_cache(conn, &snapshot, Some(source.describe()), expire)?;

    info!(
        "Synchronized {} packages from index {} {}",
        count, snapshot.name, snapshot.version
    );
    Ok(count)
}

/// Load a snapshot into the cache, replacing whatever was there
pub fn replace_cache(
    conn: &mut Connection,
    snapshot: &IndexMetadata,
    source: Option<String>,
    expire: Option<i64>,
) -> Result<usize> {
    let tx = conn.transaction()?;

    // An explicit expiry wins; otherwise a previously configured one
    // survives the replace
    let metadata_expire = match expire {
        Some(secs) => Some(secs),
        None => IndexMeta::load(&tx)?.map(|m| m.metadata_expire),
    };

    IndexPackage::delete_all(&tx)?;

    let mut count = 0;
    for record in &snapshot.packages {
        let pkg = IndexPackage {
            attr: record.attr.clone(),
            version: record.version.clone(),
            description: record.description.clone(),
            homepage: record.homepage.clone(),
            broken: record.broken,
            capability: record.capability.clone(),
        };
        pkg.insert(&tx)?;
        count += 1;
    }

    let mut meta = IndexMeta::new(snapshot.name.clone(), snapshot.version.clone());
    meta.checksum = Some(snapshot.compute_checksum());
    meta.source = source;
    meta.package_count = count as i64;
    meta.last_sync = Some(current_timestamp());
    if let Some(expire) = metadata_expire {
        meta.metadata_expire = expire;
    }
    meta.save(&tx)?;

    tx.commit()?;
    Ok(count)
}
