//! Content-aware comparison of two scanned trees

use std::cmp::Ordering;

use mirror_fs::NormalizedPath;
use tracing::{debug, info};

use crate::Result;
use crate::candidate::{CandidateSet, SyncCandidate};
use crate::scanner::ScanMap;

/// Joins two scans by path hash and classifies every difference.
#[derive(Debug, Clone)]
pub struct DiffEngine {
    roots: [NormalizedPath; 2],
}

impl DiffEngine {
    /// Create an engine for the resolved roots of side A and side B.
    pub fn new(root_a: NormalizedPath, root_b: NormalizedPath) -> Self {
        Self {
            roots: [root_a, root_b],
        }
    }

    pub fn roots(&self) -> &[NormalizedPath; 2] {
        &self.roots
    }

    /// Diff two scans, taking ownership of their records.
    ///
    /// - A path on both sides with equal content hashes yields nothing.
    /// - A path on both sides with different content yields one
    ///   conflicting candidate.
    /// - A path on one side yields one missing candidate whose copy-to
    ///   directory is the other root.
    ///
    /// Missing candidates come first, then conflicting ones; each group is
    /// ordered most recently modified first, ties broken by relative path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a file present on both sides cannot be hashed.
    pub fn diff(&self, scan_a: ScanMap, mut scan_b: ScanMap) -> Result<CandidateSet> {
        let [root_a, root_b] = &self.roots;
        let mut missing = Vec::new();
        let mut conflicting = Vec::new();
        let mut in_sync = 0usize;

        for (hash, record_a) in scan_a {
            match scan_b.remove(&hash) {
                Some(record_b) => {
                    if record_a.content_hash()? == record_b.content_hash()? {
                        debug!("In sync: {}", record_a.relative());
                        in_sync += 1;
                    } else {
                        debug!("Conflict: {}", record_a.relative());
                        conflicting.push(SyncCandidate::conflicting(record_a, record_b));
                    }
                }
                None => missing.push(SyncCandidate::missing(record_a, root_b.clone())),
            }
        }

        // Whatever is left in B was never matched from A
        for (_, record_b) in scan_b {
            missing.push(SyncCandidate::missing(record_b, root_a.clone()));
        }

        missing.sort_by(newest_first);
        conflicting.sort_by(newest_first);

        info!(
            "Diff complete: {} missing, {} conflicting, {} in sync",
            missing.len(),
            conflicting.len(),
            in_sync
        );

        let mut candidates = CandidateSet::new();
        for candidate in missing.into_iter().chain(conflicting) {
            candidates.push(candidate);
        }
        Ok(candidates)
    }
}

fn newest_first(x: &SyncCandidate, y: &SyncCandidate) -> Ordering {
    y.sort_key()
        .cmp(&x.sort_key())
        .then_with(|| x.relative_path().cmp(y.relative_path()))
        .then_with(|| x.origin().cmp(&y.origin()))
}
