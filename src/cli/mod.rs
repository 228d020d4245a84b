// src/cli/mod.rs
//! CLI definitions for depyard
//!
//! All command-line surface is defined here with clap derive. The
//! actual command implementations are in the `commands` module.
//!
//! Declaration commands are hoisted to root level:
//! - `check` - dry-run resolve against the index
//! - `fmt` - rewrite in canonical form
//! - `init` - write a starter declaration
//! - `list` - list declared references
//! - `diff` - compare two declarations as sets
//!
//! Management context:
//! - `index` - local snapshot cache (sync, status, search, show)

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

mod index;

pub use index::IndexCommands;

#[derive(Parser)]
#[command(name = "depyard")]
#[command(author = "Depyard Contributors")]
#[command(version)]
#[command(about = "Validate, resolve, format, and diff native-package declarations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a declaration against the package index
    ///
    /// Parses the declaration file and dry-run-resolves every reference
    /// against the cached index snapshot (or one named with --index).
    /// Reports missing packages, duplicate entries, broken packages, and
    /// capability coverage. Nothing is installed. Exits nonzero when any
    /// reference is missing or a required capability class is uncovered.
    Check {
        /// Path to the declaration file
        #[arg(short, long, default_value = "deps.nix")]
        manifest: PathBuf,

        /// Resolve against this snapshot (URL or JSON file) instead of the cache
        #[arg(short, long, value_name = "SOURCE")]
        index: Option<String>,

        /// Path to the cache database
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,

        /// Capability class the resolved set must provide (repeatable)
        #[arg(long, value_name = "CLASS")]
        require: Vec<String>,

        /// Attribute-path glob to skip (repeatable)
        #[arg(long, value_name = "GLOB")]
        ignore: Vec<String>,

        /// Treat duplicates and broken packages as failures
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite a declaration in canonical form
    ///
    /// Canonical form keeps declared order, drops duplicate entries, and
    /// uses fixed indentation. The reference set never changes.
    Fmt {
        /// Path to the declaration file
        #[arg(short, long, default_value = "deps.nix")]
        manifest: PathBuf,

        /// Don't write; show a diff and exit nonzero if not canonical
        #[arg(long)]
        check: bool,
    },

    /// Write a starter declaration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "deps.nix")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Write an empty declaration instead of the baseline set
        #[arg(long)]
        empty: bool,
    },

    /// List declared references
    List {
        /// Path to the declaration file
        #[arg(short, long, default_value = "deps.nix")]
        manifest: PathBuf,

        /// Only show references matching this glob
        #[arg(short, long, value_name = "GLOB")]
        filter: Option<String>,

        /// Group output by capability class
        #[arg(long)]
        capabilities: bool,
    },

    /// Compare two declaration files as reference sets
    ///
    /// Entry order and duplicate entries never show up as changes.
    Diff {
        /// Old declaration file
        old: PathBuf,

        /// New declaration file
        new: PathBuf,
    },

    /// Manage the local index snapshot cache
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_max_age_rejects_negative() {
        let result =
            Cli::try_parse_from(["depyard", "index", "sync", "index.json", "--max-age=-5"]);
        assert!(result.is_err());

        let result =
            Cli::try_parse_from(["depyard", "index", "sync", "index.json", "--max-age=600"]);
        assert!(result.is_ok());
    }
}
