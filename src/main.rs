// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;

mod cli;
mod commands;

use cli::{Cli, Commands, IndexCommands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            manifest,
            index,
            db,
            require,
            ignore,
            strict,
        } => commands::cmd_check(
            &manifest,
            index.as_deref(),
            db.as_deref(),
            &require,
            &ignore,
            strict,
        ),
        Commands::Fmt { manifest, check } => commands::cmd_fmt(&manifest, check),
        Commands::Init {
            output,
            force,
            empty,
        } => commands::cmd_init(&output, force, empty),
        Commands::List {
            manifest,
            filter,
            capabilities,
        } => commands::cmd_list(&manifest, filter.as_deref(), capabilities),
        Commands::Diff { old, new } => commands::cmd_diff(&old, &new),
        Commands::Index { command } => match command {
            IndexCommands::Sync {
                source,
                db,
                max_age,
                force,
            } => commands::cmd_index_sync(&source, db.as_deref(), max_age, force),
            IndexCommands::Status { db } => commands::cmd_index_status(db.as_deref()),
            IndexCommands::Search { pattern, db } => {
                commands::cmd_index_search(&pattern, db.as_deref())
            }
            IndexCommands::Show { attr, db } => commands::cmd_index_show(&attr, db.as_deref()),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "depyard", &mut io::stdout());
            Ok(())
        }
    }
}
