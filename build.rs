// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: declaration file path
fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .short('m')
        .long("manifest")
        .value_name("PATH")
        .default_value("deps.nix")
        .help("Path to the declaration file")
}

/// Common argument: cache database path
fn db_arg() -> Arg {
    Arg::new("db")
        .long("db")
        .value_name("PATH")
        .help("Path to the cache database")
}

fn build_cli() -> Command {
    Command::new("depyard")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Depyard Contributors")
        .about("Validate, resolve, format, and diff native-package declarations")
        .subcommand_required(true)
        .subcommand(
            Command::new("check")
                .about("Validate a declaration against the package index")
                .arg(manifest_arg())
                .arg(
                    Arg::new("index")
                        .short('i')
                        .long("index")
                        .value_name("SOURCE")
                        .help("Resolve against this snapshot (URL or JSON file) instead of the cache"),
                )
                .arg(db_arg())
                .arg(
                    Arg::new("require")
                        .long("require")
                        .value_name("CLASS")
                        .action(clap::ArgAction::Append)
                        .help("Capability class the resolved set must provide"),
                )
                .arg(
                    Arg::new("ignore")
                        .long("ignore")
                        .value_name("GLOB")
                        .action(clap::ArgAction::Append)
                        .help("Attribute-path glob to skip"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(clap::ArgAction::SetTrue)
                        .help("Treat duplicates and broken packages as failures"),
                ),
        )
        .subcommand(
            Command::new("fmt")
                .about("Rewrite a declaration in canonical form")
                .arg(manifest_arg())
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(clap::ArgAction::SetTrue)
                        .help("Don't write; show a diff and exit nonzero if not canonical"),
                ),
        )
        .subcommand(
            Command::new("init")
                .about("Write a starter declaration file")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("deps.nix")
                        .help("Output path"),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(clap::ArgAction::SetTrue)
                        .help("Overwrite an existing file"),
                )
                .arg(
                    Arg::new("empty")
                        .long("empty")
                        .action(clap::ArgAction::SetTrue)
                        .help("Write an empty declaration instead of the baseline set"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List declared references")
                .arg(manifest_arg())
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .value_name("GLOB")
                        .help("Only show references matching this glob"),
                )
                .arg(
                    Arg::new("capabilities")
                        .long("capabilities")
                        .action(clap::ArgAction::SetTrue)
                        .help("Group output by capability class"),
                ),
        )
        .subcommand(
            Command::new("diff")
                .about("Compare two declaration files as reference sets")
                .arg(Arg::new("old").required(true).help("Old declaration file"))
                .arg(Arg::new("new").required(true).help("New declaration file")),
        )
        .subcommand(
            Command::new("index")
                .about("Manage the local index snapshot cache")
                .subcommand(
                    Command::new("sync")
                        .about("Fetch a snapshot and replace the cache")
                        .arg(
                            Arg::new("source")
                                .required(true)
                                .help("Snapshot source (URL or JSON file)"),
                        )
                        .arg(db_arg())
                        .arg(
                            Arg::new("max_age")
                                .long("max-age")
                                .value_name("SECS")
                                .help("Set the cache expiry to this many seconds"),
                        )
                        .arg(
                            Arg::new("force")
                                .short('f')
                                .long("force")
                                .action(clap::ArgAction::SetTrue)
                                .help("Sync even if the cached snapshot hasn't expired"),
                        ),
                )
                .subcommand(
                    Command::new("status")
                        .about("Show cache provenance and freshness")
                        .arg(db_arg()),
                )
                .subcommand(
                    Command::new("search")
                        .about("Search cached packages by attribute path or description")
                        .arg(Arg::new("pattern").required(true).help("Search pattern"))
                        .arg(db_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show one cached package")
                        .arg(Arg::new("attr").required(true).help("Attribute path"))
                        .arg(db_arg()),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("depyard.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
