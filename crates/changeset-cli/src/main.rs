//! Changeset CLI
//!
//! Command-line interface for recording changesets and applying them to the
//! changelog

use changeset_core::errors::ExErrorKind;
use changeset_core::logging_facility::{init, Profile};
use changeset_store::ChangesetConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "changeset")]
#[command(about = "Changeset - pending changes to versioned changelog entries", long_about = None)]
struct Cli {
    /// Project root holding `.changeset/` and the changelog
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a new changeset
    #[command(visible_alias = "add")]
    Create(commands::create::CreateArgs),
    /// Fold pending changesets into the changelog
    Apply(commands::apply::ApplyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = ChangesetConfig::load(&cli.root).and_then(|config| match cli.command {
        Commands::Create(args) => commands::create::execute(args, &config),
        Commands::Apply(args) => commands::apply::execute(args, &config),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind().is_benign() => {
            println!("{}", e.message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(e.kind())
        }
    }
}

fn exit_code(kind: ExErrorKind) -> ExitCode {
    match kind {
        ExErrorKind::NoPendingChanges => ExitCode::SUCCESS,
        ExErrorKind::InvalidUsage => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    }
}
