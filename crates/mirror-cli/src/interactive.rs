//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based interactive selection.

use colored::Colorize;
use dialoguer::{Confirm, MultiSelect};

use mirror_core::{CandidateSet, SyncCandidate};

use crate::commands::compare::short_hash;
use crate::error::{CliError, Result};

/// Let the user pick candidates; returns their hashes in listing order.
pub fn select_candidates(candidates: &CandidateSet) -> Result<Vec<String>> {
    let labels: Vec<String> = candidates.iter().map(label).collect();

    let indices = MultiSelect::new()
        .with_prompt("Select files to synchronize (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;

    if indices.is_empty() {
        return Err(CliError::user("No files selected."));
    }

    let proceed = Confirm::new()
        .with_prompt(format!("Synchronize {} file(s)?", indices.len()))
        .default(true)
        .interact()?;
    if !proceed {
        return Err(CliError::user("Sync cancelled by user."));
    }

    let hashes = candidates.hashes();
    Ok(indices.into_iter().map(|i| hashes[i].clone()).collect())
}

fn label(candidate: &SyncCandidate) -> String {
    let plan = candidate.plan();
    let kind = if candidate.is_missing() {
        "missing".green()
    } else {
        "conflict".yellow()
    };
    format!(
        "{:<9} {} {} ({} -> {})",
        kind,
        short_hash(candidate.path_hash()),
        candidate.relative_path(),
        plan.from,
        plan.to
    )
}
