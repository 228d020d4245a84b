// src/commands/mod.rs
//! Command handlers for the depyard CLI

mod check;
mod diff;
mod fmt;
mod index;
mod init;
mod list;

pub use check::cmd_check;
pub use diff::cmd_diff;
pub use fmt::cmd_fmt;
pub use index::{cmd_index_search, cmd_index_show, cmd_index_status, cmd_index_sync};
pub use init::cmd_init;
pub use list::cmd_list;

use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

use depyard::db;

/// Open the cache database at the given path, or the default location
fn open_cache(db_path: Option<&Path>) -> Result<Connection> {
    let path = match db_path {
        Some(path) => path.to_path_buf(),
        None => db::default_db_path(),
    };
    Ok(db::open_database(&path)?)
}
