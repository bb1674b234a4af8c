//! Synchronization candidates and their ordered collection

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use mirror_fs::{NormalizedPath, compute_path_hash};
use serde::{Deserialize, Serialize};

use crate::record::{FileRecord, Side};

/// What makes a path a candidate for synchronization
#[derive(Debug, Clone)]
pub enum CandidateKind {
    /// Present on one side only; copied into `copy_to`
    Missing {
        record: FileRecord,
        copy_to: NormalizedPath,
    },
    /// Present on both sides with different content
    Conflicting { a: FileRecord, b: FileRecord },
}

/// One difference between the two trees
#[derive(Debug, Clone)]
pub struct SyncCandidate {
    kind: CandidateKind,
    sort_key: DateTime<Utc>,
    last_error: Option<String>,
}

/// Source and destination of one copy, as native paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Side the content is copied from
    pub from: Side,
    /// Side the content is copied to
    pub to: Side,
}

impl SyncCandidate {
    /// A file present on one side only. `copy_to` is the other side's root.
    pub fn missing(record: FileRecord, copy_to: NormalizedPath) -> Self {
        let sort_key = record.modified();
        Self {
            kind: CandidateKind::Missing { record, copy_to },
            sort_key,
            last_error: None,
        }
    }

    /// A file present on both sides with differing content.
    ///
    /// The records may be passed in either order; they are stored by side.
    pub fn conflicting(first: FileRecord, second: FileRecord) -> Self {
        let (a, b) = if first.side() == Side::A {
            (first, second)
        } else {
            (second, first)
        };
        let sort_key = a.modified().max(b.modified());
        Self {
            kind: CandidateKind::Conflicting { a, b },
            sort_key,
            last_error: None,
        }
    }

    pub fn kind(&self) -> &CandidateKind {
        &self.kind
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.kind, CandidateKind::Missing { .. })
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self.kind, CandidateKind::Conflicting { .. })
    }

    /// Path hash shared by every record of this candidate
    pub fn path_hash(&self) -> &str {
        self.primary().path_hash()
    }

    pub fn relative_path(&self) -> &str {
        self.primary().relative()
    }

    /// Most recent modification time among the records
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.sort_key
    }

    /// Error of the last failed attempt to synchronize this candidate
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records of this candidate, side A first
    pub fn records(&self) -> Vec<&FileRecord> {
        match &self.kind {
            CandidateKind::Missing { record, .. } => vec![record],
            CandidateKind::Conflicting { a, b } => vec![a, b],
        }
    }

    /// Resolve the copy direction.
    ///
    /// A missing file is copied into the other root at the same relative
    /// path. For a conflict the newer record is the source; when both
    /// timestamps are equal side A wins.
    pub fn plan(&self) -> CopyPlan {
        match &self.kind {
            CandidateKind::Missing { record, copy_to } => CopyPlan {
                source: record.absolute().to_path_buf(),
                destination: copy_to.to_native().join(record.subpath()),
                from: record.side(),
                to: record.side().other(),
            },
            CandidateKind::Conflicting { a, b } => {
                let (newer, older) = if b.modified() > a.modified() {
                    (b, a)
                } else {
                    (a, b)
                };
                CopyPlan {
                    source: newer.absolute().to_path_buf(),
                    destination: older.absolute().to_path_buf(),
                    from: newer.side(),
                    to: older.side(),
                }
            }
        }
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub(crate) fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Side used to order candidates that share a sort key and path
    pub(crate) fn origin(&self) -> Side {
        self.primary().side()
    }

    fn primary(&self) -> &FileRecord {
        match &self.kind {
            CandidateKind::Missing { record, .. } => record,
            CandidateKind::Conflicting { a, .. } => a,
        }
    }
}

/// Candidates keyed by path hash, in diff order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    entries: Vec<SyncCandidate>,
    index: HashMap<String, usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate.
    ///
    /// Path hashes are unique within a set: the diff emits at most one
    /// candidate per hash. Should a hash repeat anyway, the later candidate
    /// replaces the earlier entry in place.
    pub fn push(&mut self, candidate: SyncCandidate) {
        debug_assert!(
            !self.contains(candidate.path_hash()),
            "duplicate candidate for {}",
            candidate.relative_path()
        );
        match self.index.get(candidate.path_hash()).copied() {
            Some(position) => self.entries[position] = candidate,
            None => {
                self.index
                    .insert(candidate.path_hash().to_string(), self.entries.len());
                self.entries.push(candidate);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.index.contains_key(hash)
    }

    pub fn get(&self, hash: &str) -> Option<&SyncCandidate> {
        self.index.get(hash).map(|&i| &self.entries[i])
    }

    pub fn get_mut(&mut self, hash: &str) -> Option<&mut SyncCandidate> {
        self.index.get(hash).map(|&i| &mut self.entries[i])
    }

    /// Look up a candidate by its relative subpath
    pub fn find_by_path(&self, relative: &str) -> Option<&SyncCandidate> {
        self.get(&compute_path_hash(relative))
    }

    /// Candidates in diff order
    pub fn iter(&self) -> std::slice::Iter<'_, SyncCandidate> {
        self.entries.iter()
    }

    /// Path hashes in diff order
    pub fn hashes(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|c| c.path_hash().to_string())
            .collect()
    }

    pub fn missing(&self) -> impl Iterator<Item = &SyncCandidate> {
        self.entries.iter().filter(|c| c.is_missing())
    }

    pub fn conflicting(&self) -> impl Iterator<Item = &SyncCandidate> {
        self.entries.iter().filter(|c| c.is_conflicting())
    }

    pub(crate) fn position(&self, hash: &str) -> Option<usize> {
        self.index.get(hash).copied()
    }

    pub(crate) fn at_mut(&mut self, position: usize) -> &mut SyncCandidate {
        &mut self.entries[position]
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a SyncCandidate;
    type IntoIter = std::slice::Iter<'a, SyncCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::Path;

    fn record(root: &str, relative: &str, side: Side, secs: i64) -> FileRecord {
        FileRecord::new(
            Path::new(root).join(relative),
            relative,
            side,
            Utc.timestamp_opt(secs, 0).unwrap(),
            1,
        )
    }

    #[test]
    fn missing_plan_targets_other_root() {
        let candidate = SyncCandidate::missing(
            record("/a", "docs/readme.txt", Side::A, 100),
            NormalizedPath::new("/b"),
        );

        let plan = candidate.plan();
        assert_eq!(plan.source, Path::new("/a/docs/readme.txt"));
        assert_eq!(plan.destination, Path::new("/b/docs/readme.txt"));
        assert_eq!((plan.from, plan.to), (Side::A, Side::B));
        assert_eq!(candidate.sort_key(), Utc.timestamp_opt(100, 0).unwrap());
    }

    #[test]
    fn conflict_plan_copies_newer_over_older() {
        let candidate = SyncCandidate::conflicting(
            record("/b", "x.txt", Side::B, 200),
            record("/a", "x.txt", Side::A, 100),
        );

        let plan = candidate.plan();
        assert_eq!(plan.source, Path::new("/b/x.txt"));
        assert_eq!(plan.destination, Path::new("/a/x.txt"));
        assert_eq!(plan.from, Side::B);
        assert_eq!(candidate.sort_key(), Utc.timestamp_opt(200, 0).unwrap());
        assert_eq!(candidate.records()[0].side(), Side::A);
    }

    #[test]
    fn conflict_tie_prefers_side_a() {
        let candidate = SyncCandidate::conflicting(
            record("/a", "x.txt", Side::A, 100),
            record("/b", "x.txt", Side::B, 100),
        );
        assert_eq!(candidate.plan().from, Side::A);
    }

    #[test]
    fn set_preserves_insertion_order_and_indexes_by_hash() {
        let mut set = CandidateSet::new();
        set.push(SyncCandidate::missing(
            record("/a", "z.txt", Side::A, 1),
            NormalizedPath::new("/b"),
        ));
        set.push(SyncCandidate::missing(
            record("/b", "a.txt", Side::B, 2),
            NormalizedPath::new("/a"),
        ));

        let paths: Vec<_> = set.iter().map(|c| c.relative_path()).collect();
        assert_eq!(paths, vec!["z.txt", "a.txt"]);
        assert!(set.contains(&compute_path_hash("a.txt")));
        assert_eq!(set.find_by_path("z.txt").unwrap().origin(), Side::A);
        assert!(set.get("nope").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn missing_plan_keeps_native_subpath() {
        let candidate = SyncCandidate::missing(
            record("/a", "a\\b.txt", Side::A, 1),
            NormalizedPath::new("/b"),
        );

        let plan = candidate.plan();
        assert_eq!(plan.destination, Path::new("/b/a\\b.txt"));
        assert_eq!(plan.destination.components().count(), 3);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "duplicate candidate")]
    fn pushing_a_duplicate_hash_is_a_bug() {
        let mut set = CandidateSet::new();
        for _ in 0..2 {
            set.push(SyncCandidate::missing(
                record("/a", "x.txt", Side::A, 1),
                NormalizedPath::new("/b"),
            ));
        }
    }

    #[test]
    fn errors_can_be_set_and_cleared() {
        let mut candidate = SyncCandidate::missing(
            record("/a", "x.txt", Side::A, 1),
            NormalizedPath::new("/b"),
        );
        candidate.set_error("boom".into());
        assert_eq!(candidate.last_error(), Some("boom"));
        candidate.clear_error();
        assert_eq!(candidate.last_error(), None);
    }
}
