//! Property tests for filter resolution

use mirror_core::{ExtensionFilter, SkipPrefixes, WILDCARD};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,8}"
}

fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|parts| parts.join("/"))
}

proptest! {
    #[test]
    fn wildcard_anywhere_accepts_everything(
        mut list in prop::collection::vec("[a-z]{1,4}", 0..5),
        at in 0usize..6,
        path in relative_path(),
    ) {
        let at = at.min(list.len());
        list.insert(at, WILDCARD.to_string());
        let filter = ExtensionFilter::from_list(&list);
        prop_assert_eq!(&filter, &ExtensionFilter::Any);
        prop_assert!(filter.matches(&path.to_lowercase()));
    }

    #[test]
    fn extension_match_ignores_case(
        stem in relative_path(),
        ext in "[a-zA-Z]{1,5}",
    ) {
        let filter = ExtensionFilter::from_list(&[ext.to_uppercase()]);
        let path = format!("{}.{}", stem, ext).to_lowercase();
        prop_assert!(filter.matches(&path));
    }

    #[test]
    fn files_without_extension_never_match_a_list(path in relative_path()) {
        let filter = ExtensionFilter::from_list(&["txt"]);
        prop_assert!(!filter.matches(&path.to_lowercase()));
    }

    #[test]
    fn covered_directory_excludes_every_file_below(
        dir in relative_path(),
        rest in relative_path(),
    ) {
        let skip = SkipPrefixes::from_list(&[dir.clone()]);
        let dir_lower = dir.to_lowercase();
        prop_assert!(skip.covers_dir(&dir_lower));
        let file = format!("{}/{}", dir_lower, rest.to_lowercase());
        prop_assert!(skip.matches_file(&file));
    }
}
