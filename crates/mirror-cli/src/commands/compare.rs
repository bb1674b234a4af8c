//! Compare command implementation
//!
//! Lists missing and conflicting files between two trees without changing
//! either of them.

use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use mirror_core::{Comparison, Mirror, Side, SyncCandidate};

use super::load_options;
use crate::cli::FilterArgs;
use crate::error::Result;

/// Display form of one candidate
#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub kind: &'static str,
    pub hash: String,
    pub path: String,
    pub from: Side,
    pub to: Side,
    pub modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl From<&SyncCandidate> for CandidateView {
    fn from(candidate: &SyncCandidate) -> Self {
        let plan = candidate.plan();
        Self {
            kind: if candidate.is_missing() { "missing" } else { "conflicting" },
            hash: candidate.path_hash().to_string(),
            path: candidate.relative_path().to_string(),
            from: plan.from,
            to: plan.to,
            modified: candidate.sort_key().to_rfc3339(),
            last_error: candidate.last_error().map(str::to_string),
        }
    }
}

/// Run the compare command
pub fn run_compare(dir_a: &str, dir_b: &str, filters: &FilterArgs, json: bool) -> Result<()> {
    let options = load_options(filters)?;
    let comparison = Mirror::default().compare(dir_a, dir_b, &options)?;

    if json {
        let summary = comparison.summary();
        let output = json!({
            "roots": { "a": comparison.root(Side::A), "b": comparison.root(Side::B) },
            "missing": summary.missing,
            "conflicting": summary.conflicting,
            "candidates": comparison.candidates.iter().map(CandidateView::from).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_comparison(&comparison);
    }

    Ok(())
}

/// Print a human-readable candidate listing
pub fn print_comparison(comparison: &Comparison) {
    println!(
        "{} {} {} {}",
        "=>".blue().bold(),
        comparison.root(Side::A).as_str().yellow(),
        "<->".dimmed(),
        comparison.root(Side::B).as_str().yellow()
    );

    if comparison.candidates.is_empty() {
        println!("{} Trees are in sync.", "OK".green().bold());
        return;
    }

    let summary = comparison.summary();
    if summary.missing > 0 {
        println!();
        println!("{} ({}):", "Missing".bold(), summary.missing);
        for candidate in comparison.candidates.missing() {
            print_candidate(candidate, "+".green().to_string());
        }
    }
    if summary.conflicting > 0 {
        println!();
        println!("{} ({}):", "Conflicting".bold(), summary.conflicting);
        for candidate in comparison.candidates.conflicting() {
            print_candidate(candidate, "!".yellow().to_string());
        }
    }
}

fn print_candidate(candidate: &SyncCandidate, marker: String) {
    let plan = candidate.plan();
    println!(
        "   {} {} {} {} {}",
        marker,
        short_hash(candidate.path_hash()).dimmed(),
        candidate.relative_path().cyan(),
        format!("{} -> {}", plan.from, plan.to).dimmed(),
        candidate
            .sort_key()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .dimmed()
    );
    if let Some(error) = candidate.last_error() {
        println!("       {} {}", "last error:".red(), error);
    }
}

/// Leading characters of a path hash, enough to tell candidates apart
pub fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(12)]
}
