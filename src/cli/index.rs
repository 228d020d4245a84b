// src/cli/index.rs
//! Index snapshot cache commands

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum IndexCommands {
    /// Fetch a snapshot and replace the cache
    ///
    /// The source is a URL or a local JSON file. The tool tracks a
    /// single fixed index, so the new snapshot replaces the cache
    /// wholesale. A published checksum, when present, is verified
    /// before the cache is touched.
    Sync {
        /// Snapshot source (URL or JSON file)
        source: String,

        /// Path to the cache database
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,

        /// Set the cache expiry to this many seconds
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(i64).range(0..))]
        max_age: Option<i64>,

        /// Sync even if the cached snapshot hasn't expired
        #[arg(short, long)]
        force: bool,
    },

    /// Show cache provenance and freshness
    Status {
        /// Path to the cache database
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },

    /// Search cached packages by attribute path or description
    Search {
        /// Search pattern
        pattern: String,

        /// Path to the cache database
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },

    /// Show one cached package
    Show {
        /// Attribute path, e.g. xorg.libX11
        attr: String,

        /// Path to the cache database
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
    },
}
