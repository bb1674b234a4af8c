//! Sync command implementation
//!
//! Recomputes the comparison, builds the selection and copies it, or prints
//! the copy plan on `--dry-run`.

use colored::Colorize;
use serde_json::json;

use mirror_core::{Comparison, Mirror};
use mirror_fs::{NormalizedPath, compute_path_hash};
use tracing::debug;

use super::compare::{CandidateView, print_comparison};
use super::load_options;
use crate::cli::FilterArgs;
use crate::error::Result;
use crate::interactive;

/// Arguments of the sync command
#[derive(Debug, Clone, Default)]
pub struct SyncArgs {
    pub dir_a: String,
    pub dir_b: String,
    pub filters: FilterArgs,
    pub select: Vec<String>,
    pub paths: Vec<String>,
    pub all: bool,
    pub interactive: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the sync command
pub fn run_sync(args: &SyncArgs) -> Result<()> {
    let options = load_options(&args.filters)?;
    let mirror = Mirror::default();
    let mut comparison = mirror.compare(&args.dir_a, &args.dir_b, &options)?;

    if comparison.candidates.is_empty() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&json!({ "copied": 0, "plan": [] }))?);
        } else {
            println!("{} Trees are in sync. Nothing to do.", "OK".green().bold());
        }
        return Ok(());
    }

    let selection = if args.interactive {
        if !args.json {
            print_comparison(&comparison);
            println!();
        }
        interactive::select_candidates(&comparison.candidates)?
    } else {
        build_selection(&comparison, args)
    };
    debug!("Selection: {} candidate(s)", selection.len());

    if args.dry_run {
        let plans = mirror.plan(&comparison, &selection)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&json!({ "copied": 0, "plan": plans }))?);
        } else {
            println!("{} Would copy {} file(s):", "=>".blue().bold(), plans.len());
            for plan in &plans {
                println!(
                    "   {} {} {} {}",
                    "+".green(),
                    plan.source.display().to_string().cyan(),
                    "->".dimmed(),
                    plan.destination.display()
                );
            }
        }
        return Ok(());
    }

    let copied = mirror.synchronize(&mut comparison, &selection)?;
    if args.json {
        let synchronized: Vec<CandidateView> = selection
            .iter()
            .filter_map(|hash| comparison.candidates.get(hash))
            .map(CandidateView::from)
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "copied": copied, "synchronized": synchronized }))?
        );
    } else {
        println!("{} Synchronized {} file(s).", "OK".green().bold(), copied);
    }
    Ok(())
}

/// Selection in command-line order: hashes first, then paths, or every
/// candidate in listing order with `--all`.
pub fn build_selection(comparison: &Comparison, args: &SyncArgs) -> Vec<String> {
    if args.all {
        return comparison.candidates.hashes();
    }
    args.select
        .iter()
        .cloned()
        .chain(args.paths.iter().map(|path| path_to_hash(path)))
        .collect()
}

/// Hash a relative path typed by the user, normalizing its separators.
fn path_to_hash(path: &str) -> String {
    let normalized = NormalizedPath::new(path);
    compute_path_hash(normalized.as_str().trim_start_matches('/'))
}
