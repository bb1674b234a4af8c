//! End-to-end scenarios for compare and synchronize
//!
//! Each test drives the public `Mirror` facade against real temporary trees.

use mirror_core::{
    CandidateKind, CompareOptions, Error, ErrorKind, MemoryReporter, Mirror, Severity, Side,
};
use mirror_fs::{compute_file_checksum, compute_path_hash};
use mirror_test_utils::tree::TestTree;
use pretty_assertions::assert_eq;

fn mirror() -> Mirror<MemoryReporter> {
    Mirror::new(MemoryReporter::new())
}

// =============================================================================
// Missing file is copied into the other tree
// =============================================================================

#[test]
fn missing_file_round_trip() {
    let a = TestTree::new();
    let b = TestTree::new();
    a.write("docs/readme.txt", "v1");

    let mirror = mirror();
    let mut comparison = mirror
        .compare(a.root_str(), b.root_str(), &CompareOptions::default())
        .unwrap();

    let hash = compute_path_hash("docs/readme.txt");
    assert_eq!(comparison.candidates.hashes(), vec![hash.clone()]);
    match comparison.candidates.get(&hash).unwrap().kind() {
        CandidateKind::Missing { copy_to, .. } => assert_eq!(copy_to, comparison.root(Side::B)),
        other => panic!("expected missing candidate, got {other:?}"),
    }

    let copied = mirror.synchronize(&mut comparison, &[hash]).unwrap();

    assert_eq!(copied, 1);
    b.assert_file_contains("docs/readme.txt", "v1");
    assert_eq!(
        compute_file_checksum(&a.path("docs/readme.txt")).unwrap(),
        compute_file_checksum(&b.path("docs/readme.txt")).unwrap()
    );
}

// =============================================================================
// Newer side of a conflict wins
// =============================================================================

#[test]
fn conflict_resolved_towards_newer_side() {
    let a = TestTree::new();
    let b = TestTree::new();
    a.write("a.txt", "from a");
    b.write("a.txt", "from b");
    b.age("a.txt", 3600);

    let mirror = mirror();
    let mut comparison = mirror
        .compare(a.root_str(), b.root_str(), &CompareOptions::default())
        .unwrap();

    let hash = compute_path_hash("a.txt");
    assert!(comparison.candidates.get(&hash).unwrap().is_conflicting());

    mirror.synchronize(&mut comparison, &[hash]).unwrap();
    assert_eq!(b.read("a.txt"), a.read("a.txt"));
    assert_eq!(b.read("a.txt"), "from a");
}

// =============================================================================
// Identical content is not a candidate, whatever the timestamps
// =============================================================================

#[test]
fn identical_content_is_in_sync() {
    let a = TestTree::new();
    let b = TestTree::new();
    a.write("a.txt", "same");
    b.write("a.txt", "same");
    b.age("a.txt", 86_400);

    let comparison = mirror()
        .compare(a.root_str(), b.root_str(), &CompareOptions::default())
        .unwrap();

    assert!(comparison.candidates.find_by_path("a.txt").is_none());
    assert!(comparison.candidates.is_empty());
}

// =============================================================================
// Extension filter
// =============================================================================

#[test]
fn extension_filter_keeps_listed_extensions_only() {
    let a = TestTree::new();
    let b = TestTree::new();
    a.write("x.php", "<?php");
    a.write("x.txt", "text");

    let options = CompareOptions::default().with_extensions(["php"]);
    let comparison = mirror().compare(a.root_str(), b.root_str(), &options).unwrap();

    let paths: Vec<_> = comparison.candidates.iter().map(|c| c.relative_path()).collect();
    assert_eq!(paths, vec!["x.php"]);
}

#[test]
fn wildcard_anywhere_in_the_list_disables_filtering() {
    let a = TestTree::new();
    let b = TestTree::new();
    a.write("x.php", "<?php");
    a.write("x.txt", "text");

    let options = CompareOptions::default().with_extensions(["php", "*"]);
    let comparison = mirror().compare(a.root_str(), b.root_str(), &options).unwrap();
    assert_eq!(comparison.candidates.len(), 2);
}

// =============================================================================
// Skip prefixes
// =============================================================================

#[test]
fn skipped_directories_are_excluded_regardless_of_extension() {
    let a = TestTree::new();
    let b = TestTree::new();
    a.write("vendor/pkg/x.php", "v");
    a.write("VENDOR/y.php", "v");
    a.write("src/z.php", "s");
    b.write("vendor/other.php", "v");

    let options = CompareOptions::default()
        .with_extensions(["php"])
        .with_skip_directories(["vendor"]);
    let comparison = mirror().compare(a.root_str(), b.root_str(), &options).unwrap();

    let paths: Vec<_> = comparison.candidates.iter().map(|c| c.relative_path()).collect();
    assert_eq!(paths, vec!["src/z.php"]);
}

// =============================================================================
// Self-comparison guard
// =============================================================================

#[test]
fn comparing_a_tree_with_itself_fails_validation() {
    let a = TestTree::new();
    a.write("a.txt", "a");

    let mirror = mirror();
    let err = mirror
        .compare(a.root_str(), a.root_str(), &CompareOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::SameDirectory { .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
    let messages = mirror.reporter().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Error);
}

#[cfg(unix)]
#[test]
fn self_comparison_through_a_symlink_is_caught_before_scanning() {
    let outside = TestTree::new();
    outside.write("secret.txt", "s");
    let a = TestTree::new();
    // Scanning `a` would abort on this escaping link, so reaching the
    // same-directory error proves no scan ran.
    std::os::unix::fs::symlink(outside.path("secret.txt"), a.path("escape.txt")).unwrap();
    let links = TestTree::new();
    std::os::unix::fs::symlink(a.root(), links.path("alias")).unwrap();

    let alias = links.path("alias").to_string_lossy().into_owned();
    let err = mirror()
        .compare(a.root_str(), &alias, &CompareOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::SameDirectory { .. }), "got {err:?}");
}

// =============================================================================
// Empty directories
// =============================================================================

#[test]
fn empty_trees_compare_clean() {
    let a = TestTree::new();
    let b = TestTree::new();

    let comparison = mirror()
        .compare(a.root_str(), b.root_str(), &CompareOptions::default())
        .unwrap();
    assert!(comparison.candidates.is_empty());
    assert!(a.root().read_dir().unwrap().next().is_none());
}
