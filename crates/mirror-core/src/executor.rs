//! Fail-fast, verified execution of selected candidates
//!
//! Every selected candidate is copied in the caller's order. The first
//! failure stops the batch; files copied by earlier candidates stay in
//! place. There is no rollback and no locking of source or destination
//! files, so concurrent external changes to either tree race with a batch.

use std::path::Path;

use mirror_fs::{compute_file_checksum, io};
use tracing::{debug, info, warn};

use crate::candidate::{CandidateSet, CopyPlan, SyncCandidate};
use crate::{Error, Result};

/// Byte-level copy primitive used by [`SyncExecutor`]
pub trait FileCopier {
    /// Copy `source` over `destination`, whose parent directory exists.
    fn copy(&self, source: &Path, destination: &Path) -> Result<u64>;
}

/// Copies with the standard library
#[derive(Debug, Default, Clone, Copy)]
pub struct FsCopier;

impl FileCopier for FsCopier {
    fn copy(&self, source: &Path, destination: &Path) -> Result<u64> {
        Ok(io::copy_file(source, destination)?)
    }
}

/// Executes selections of a [`CandidateSet`]
pub struct SyncExecutor {
    copier: Box<dyn FileCopier>,
}

impl Default for SyncExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SyncExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncExecutor").finish_non_exhaustive()
    }
}

impl SyncExecutor {
    pub fn new() -> Self {
        Self::with_copier(FsCopier)
    }

    pub fn with_copier(copier: impl FileCopier + 'static) -> Self {
        Self {
            copier: Box::new(copier),
        }
    }

    /// Resolve the copy plans of a selection without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Same validation as [`synchronize`](Self::synchronize):
    /// [`Error::NothingSelected`] or [`Error::UnknownCandidate`].
    pub fn plan(&self, candidates: &CandidateSet, selected: &[String]) -> Result<Vec<CopyPlan>> {
        resolve_selection(candidates, selected)?;
        Ok(selected
            .iter()
            .filter_map(|hash| candidates.get(hash))
            .map(SyncCandidate::plan)
            .collect())
    }

    /// Copy every selected candidate, in order, and return how many were copied.
    ///
    /// The whole selection is resolved before the first copy; an empty or
    /// partly unknown selection copies nothing. On the first failing
    /// candidate its `last_error` is set and the batch stops with
    /// [`Error::BatchAborted`], which carries the number of files already
    /// copied. Those copies are not undone.
    pub fn synchronize(&self, candidates: &mut CandidateSet, selected: &[String]) -> Result<usize> {
        let positions = resolve_selection(candidates, selected)?;
        info!("Synchronizing {} selected candidate(s)", positions.len());

        let mut copied = 0usize;
        for (hash, position) in selected.iter().zip(positions) {
            let candidate = candidates.at_mut(position);
            let plan = candidate.plan();

            match self.copy_verified(&plan) {
                Ok(()) => {
                    candidate.clear_error();
                    copied += 1;
                    debug!(
                        "Copied {} -> {}",
                        plan.source.display(),
                        plan.destination.display()
                    );
                }
                Err(e) => {
                    warn!("Aborting batch at {}: {}", candidate.relative_path(), e);
                    candidate.set_error(e.to_string());
                    return Err(Error::BatchAborted {
                        hash: hash.clone(),
                        copied,
                        source: Box::new(e),
                    });
                }
            }
        }

        info!("Synchronized {} file(s)", copied);
        Ok(copied)
    }

    fn copy_verified(&self, plan: &CopyPlan) -> Result<()> {
        let parent = plan.destination.parent().ok_or_else(|| {
            mirror_fs::Error::io(
                &plan.destination,
                std::io::Error::other("destination has no parent directory"),
            )
        })?;
        io::ensure_dir_chain(parent)?;

        self.copier.copy(&plan.source, &plan.destination)?;

        let expected = checksum(&plan.source)?;
        let actual = checksum(&plan.destination)?;
        if expected != actual {
            return Err(Error::VerificationFailed {
                from: plan.source.display().to_string(),
                to: plan.destination.display().to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

fn checksum(path: &Path) -> Result<String> {
    compute_file_checksum(path).map_err(|e| mirror_fs::Error::io(path, e).into())
}

/// Map every selected hash to its position before any work starts.
fn resolve_selection(candidates: &CandidateSet, selected: &[String]) -> Result<Vec<usize>> {
    if selected.is_empty() {
        return Err(Error::NothingSelected);
    }
    selected
        .iter()
        .map(|hash| {
            candidates
                .position(hash)
                .ok_or_else(|| Error::UnknownCandidate { hash: hash.clone() })
        })
        .collect()
}
