//! Entry points for comparing and synchronizing two trees

use mirror_fs::{NormalizedPath, resolve_real_path};
use serde::Serialize;

use crate::candidate::{CandidateSet, CopyPlan};
use crate::diff::DiffEngine;
use crate::executor::SyncExecutor;
use crate::options::CompareOptions;
use crate::record::Side;
use crate::report::{Reporter, Severity, TracingReporter};
use crate::scanner::TreeScanner;
use crate::{Error, Result};

const COMPARE_TITLE: &str = "Compare";
const SYNC_TITLE: &str = "Synchronize";

/// Result of one comparison, kept for later synchronization
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Resolved real roots of side A and side B
    pub roots: [NormalizedPath; 2],
    pub candidates: CandidateSet,
}

impl Comparison {
    pub fn root(&self, side: Side) -> &NormalizedPath {
        &self.roots[side.index()]
    }

    /// Summary counts for display
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            missing: self.candidates.missing().count(),
            conflicting: self.candidates.conflicting().count(),
        }
    }
}

/// Candidate counts of a [`Comparison`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub missing: usize,
    pub conflicting: usize,
}

impl ComparisonSummary {
    pub fn total(&self) -> usize {
        self.missing + self.conflicting
    }
}

/// Compare and synchronize two directory trees.
///
/// Every outcome is handed to the reporter: failures at
/// [`Severity::Error`] (and also returned), successes at
/// [`Severity::Info`].
///
/// # Example
///
/// ```no_run
/// use mirror_core::{CompareOptions, Mirror};
///
/// let mirror = Mirror::default();
/// let mut comparison = mirror.compare("/srv/a", "/srv/b", &CompareOptions::default())?;
/// let selected = comparison.candidates.hashes();
/// mirror.synchronize(&mut comparison, &selected)?;
/// # Ok::<(), mirror_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Mirror<R: Reporter = TracingReporter> {
    reporter: R,
    executor: SyncExecutor,
}

impl Default for Mirror<TracingReporter> {
    fn default() -> Self {
        Self::new(TracingReporter)
    }
}

impl<R: Reporter> Mirror<R> {
    pub fn new(reporter: R) -> Self {
        Self::with_executor(reporter, SyncExecutor::new())
    }

    pub fn with_executor(reporter: R, executor: SyncExecutor) -> Self {
        Self { reporter, executor }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Resolve both directories, scan them and diff the results.
    ///
    /// Both inputs are validated before any scanning: each must name an
    /// existing directory, and they must not resolve to the same real
    /// path.
    pub fn compare(
        &self,
        dir_a: &str,
        dir_b: &str,
        options: &CompareOptions,
    ) -> Result<Comparison> {
        let outcome = self.compare_inner(dir_a, dir_b, options);
        match &outcome {
            Ok(comparison) => {
                let summary = comparison.summary();
                self.reporter.report(
                    &format!(
                        "{} missing, {} conflicting",
                        summary.missing, summary.conflicting
                    ),
                    Severity::Info,
                    COMPARE_TITLE,
                );
            }
            Err(e) => self.reporter.report(&e.to_string(), Severity::Error, COMPARE_TITLE),
        }
        outcome
    }

    fn compare_inner(
        &self,
        dir_a: &str,
        dir_b: &str,
        options: &CompareOptions,
    ) -> Result<Comparison> {
        let root_a = resolve_real_path(dir_a)?;
        let root_b = resolve_real_path(dir_b)?;
        if root_a == root_b {
            return Err(Error::SameDirectory {
                path: root_a.to_string(),
            });
        }

        let scan_a = TreeScanner::new(Side::A, options).scan(&root_a)?;
        let scan_b = TreeScanner::new(Side::B, options).scan(&root_b)?;

        let engine = DiffEngine::new(root_a, root_b);
        let candidates = engine.diff(scan_a, scan_b)?;
        Ok(Comparison {
            roots: engine.roots().clone(),
            candidates,
        })
    }

    /// Copy plans for a selection, without touching the filesystem.
    pub fn plan(&self, comparison: &Comparison, selected: &[String]) -> Result<Vec<CopyPlan>> {
        self.executor
            .plan(&comparison.candidates, selected)
            .inspect_err(|e| self.reporter.report(&e.to_string(), Severity::Error, SYNC_TITLE))
    }

    /// Synchronize the selected candidates of `comparison`, in order.
    ///
    /// Stops at the first failure. Files copied before it are kept, and
    /// the returned [`Error::BatchAborted`] carries their count.
    pub fn synchronize(&self, comparison: &mut Comparison, selected: &[String]) -> Result<usize> {
        match self.executor.synchronize(&mut comparison.candidates, selected) {
            Ok(copied) => {
                self.reporter.report(
                    &format!("{} file(s) synchronized", copied),
                    Severity::Info,
                    SYNC_TITLE,
                );
                Ok(copied)
            }
            Err(e) => {
                self.reporter.report(&e.to_string(), Severity::Error, SYNC_TITLE);
                Err(e)
            }
        }
    }
}
