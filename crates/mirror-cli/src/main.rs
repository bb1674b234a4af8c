//! Mirror CLI
//!
//! Compares two directory trees and synchronizes selected differences.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::SyncArgs;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Directory tree synchronizer", "mirror".green().bold());
            println!();
            println!("Run {} for available commands.", "mirror --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Compare {
            dir_a,
            dir_b,
            filters,
            json,
        } => commands::run_compare(&dir_a, &dir_b, &filters, json),
        Commands::Sync {
            dir_a,
            dir_b,
            filters,
            select,
            paths,
            all,
            interactive,
            dry_run,
            json,
        } => commands::run_sync(&SyncArgs {
            dir_a,
            dir_b,
            filters,
            select,
            paths,
            all,
            interactive,
            dry_run,
            json,
        }),
        Commands::InitConfig { file, force } => commands::run_init_config(&file, force),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "mirror", &mut std::io::stdout());
            Ok(())
        }
    }
}
