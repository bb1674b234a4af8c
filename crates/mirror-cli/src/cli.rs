//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Mirror - Compare two directory trees and synchronize their differences
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Scan filters shared by `compare` and `sync`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Only compare files with this extension (repeatable, `*` for all)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Skip relative paths starting with this prefix (repeatable)
    #[arg(short = 's', long = "skip", value_name = "PREFIX")]
    pub skip: Vec<String>,

    /// Load compare options from a .toml, .json or .yaml file
    #[arg(short, long, value_name = "FILE", env = "MIRROR_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the differences between two trees
    ///
    /// Examples:
    ///   mirror compare ./site ./backup
    ///   mirror compare ./site ./backup -e php -e js -s vendor
    Compare {
        /// First tree (side A)
        dir_a: String,

        /// Second tree (side B)
        dir_b: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Copy selected differences between two trees
    ///
    /// Missing files are copied to the side that lacks them; conflicts are
    /// resolved by copying the newer file over the older one. Candidates are
    /// processed in selection order and the batch stops at the first failure.
    ///
    /// Examples:
    ///   mirror sync ./site ./backup --all
    ///   mirror sync ./site ./backup --path index.php --dry-run
    ///   mirror sync ./site ./backup --interactive
    Sync {
        /// First tree (side A)
        dir_a: String,

        /// Second tree (side B)
        dir_b: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Select a candidate by path hash (repeatable)
        #[arg(long = "select", value_name = "HASH")]
        select: Vec<String>,

        /// Select a candidate by relative path (repeatable)
        #[arg(long = "path", value_name = "REL")]
        paths: Vec<String>,

        /// Select every candidate, in listing order
        #[arg(long, conflicts_with_all = ["select", "paths", "interactive"])]
        all: bool,

        /// Pick candidates from a list
        #[arg(short, long, conflicts_with_all = ["select", "paths"])]
        interactive: bool,

        /// Show the copies without performing them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write default compare options to a config file
    ///
    /// The format follows the file extension (.toml, .json, .yaml or .yml).
    InitConfig {
        /// Destination file
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   mirror completions bash > ~/.local/share/bash-completion/completions/mirror
    ///   mirror completions zsh > ~/.zfunc/_mirror
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
