//! Property tests for diff classification, ordering and convergence

use std::collections::BTreeMap;

use mirror_core::{CandidateKind, CompareOptions, Mirror, NullReporter, Side};
use mirror_test_utils::tree::TestTree;
use proptest::prelude::*;

/// Content variant per side; `None` means the file is absent on that side.
type Layout = BTreeMap<String, (Option<u8>, Option<u8>, u64)>;

fn layout() -> impl Strategy<Value = Layout> {
    let name = "[a-c]{1,2}(/[a-c]{1,2}){0,2}\\.txt";
    let side = prop::option::of(0u8..3);
    prop::collection::btree_map(name, (side.clone(), side, 0u64..5), 0..12)
        .prop_map(|map| map.into_iter().filter(|(_, (a, b, _))| a.is_some() || b.is_some()).collect())
}

fn build(layout: &Layout) -> (TestTree, TestTree) {
    let a = TestTree::new();
    let b = TestTree::new();
    for (path, (in_a, in_b, age)) in layout {
        if let Some(variant) = in_a {
            a.write(path, &format!("content {variant}"));
            a.age(path, age * 60);
        }
        if let Some(variant) = in_b {
            b.write(path, &format!("content {variant}"));
        }
    }
    (a, b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn diff_classifies_every_path(layout in layout()) {
        let (a, b) = build(&layout);
        let comparison = Mirror::new(NullReporter)
            .compare(a.root_str(), b.root_str(), &CompareOptions::default())
            .unwrap();

        let mut expected = 0usize;
        for (path, (in_a, in_b, _)) in &layout {
            let found = comparison.candidates.find_by_path(path);
            match (in_a, in_b) {
                (Some(x), Some(y)) if x == y => prop_assert!(found.is_none(), "{} in sync", path),
                (Some(_), Some(_)) => {
                    expected += 1;
                    let candidate = found.unwrap();
                    prop_assert!(candidate.is_conflicting());
                    prop_assert_eq!(candidate.records().len(), 2);
                }
                (Some(_), None) | (None, Some(_)) => {
                    expected += 1;
                    let owner = if in_a.is_some() { Side::A } else { Side::B };
                    match found.map(|c| c.kind()) {
                        Some(CandidateKind::Missing { record, copy_to }) => {
                            prop_assert_eq!(record.side(), owner);
                            prop_assert_eq!(copy_to, comparison.root(owner.other()));
                        }
                        other => prop_assert!(false, "{} expected missing, got {:?}", path, other),
                    }
                }
                (None, None) => unreachable!(),
            }
        }
        prop_assert_eq!(comparison.candidates.len(), expected);
    }

    #[test]
    fn diff_orders_missing_first_then_newest_first(layout in layout()) {
        let (a, b) = build(&layout);
        let comparison = Mirror::new(NullReporter)
            .compare(a.root_str(), b.root_str(), &CompareOptions::default())
            .unwrap();

        let candidates: Vec<_> = comparison.candidates.iter().collect();
        let first_conflict = candidates.iter().position(|c| c.is_conflicting()).unwrap_or(candidates.len());
        prop_assert!(candidates[first_conflict..].iter().all(|c| c.is_conflicting()));

        for group in [&candidates[..first_conflict], &candidates[first_conflict..]] {
            for pair in group.windows(2) {
                prop_assert!(pair[0].sort_key() >= pair[1].sort_key());
            }
        }
    }

    #[test]
    fn synchronizing_everything_converges(layout in layout()) {
        let (a, b) = build(&layout);
        let mirror = Mirror::new(NullReporter);
        let mut comparison = mirror
            .compare(a.root_str(), b.root_str(), &CompareOptions::default())
            .unwrap();

        let selection = comparison.candidates.hashes();
        if !selection.is_empty() {
            let copied = mirror.synchronize(&mut comparison, &selection).unwrap();
            prop_assert_eq!(copied, selection.len());
        }

        let after = mirror
            .compare(a.root_str(), b.root_str(), &CompareOptions::default())
            .unwrap();
        prop_assert!(after.candidates.is_empty());
    }
}
