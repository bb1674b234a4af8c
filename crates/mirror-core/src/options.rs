//! Scan filters for a comparison
//!
//! [`CompareOptions`] is the serializable form loaded from config files and
//! CLI flags; [`ExtensionFilter`] and [`SkipPrefixes`] are the resolved
//! matchers the scanner applies to lower-case relative paths.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Extension list entry that disables extension filtering.
pub const WILDCARD: &str = "*";

/// Filters applied to both trees of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// File extensions to include; `*` anywhere in the list includes all files
    pub extensions: Vec<String>,
    /// Relative path prefixes whose files are excluded
    pub skip_directories: Vec<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            extensions: vec![WILDCARD.to_string()],
            skip_directories: Vec::new(),
        }
    }
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension list.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the skipped directory prefixes.
    pub fn with_skip_directories<I, S>(mut self, skip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_directories = skip.into_iter().map(Into::into).collect();
        self
    }

    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::from_list(&self.extensions)
    }

    pub fn skip_prefixes(&self) -> SkipPrefixes {
        SkipPrefixes::from_list(&self.skip_directories)
    }
}

/// Resolved extension filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionFilter {
    /// Every file passes
    Any,
    /// Only files whose lower-case extension is in the set pass
    Only(BTreeSet<String>),
}

impl ExtensionFilter {
    /// Build a filter from a literal list.
    ///
    /// An empty list, or a list containing [`WILDCARD`] anywhere, disables
    /// filtering. Entries are trimmed, lower-cased and stripped of leading
    /// dots, so `".PHP"` and `"php"` are the same entry.
    pub fn from_list<S: AsRef<str>>(items: &[S]) -> Self {
        if items.is_empty() || items.iter().any(|item| item.as_ref().trim() == WILDCARD) {
            return Self::Any;
        }
        let set = items
            .iter()
            .map(|item| item.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|item| !item.is_empty())
            .collect();
        Self::Only(set)
    }

    /// Whether a lower-case relative path passes this filter.
    pub fn matches(&self, relative_lower: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(set) => extension_of(relative_lower).is_some_and(|ext| set.contains(ext)),
        }
    }
}

fn extension_of(relative: &str) -> Option<&str> {
    let name = relative.rsplit('/').next()?;
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(&name[idx + 1..]),
        _ => None,
    }
}

/// Resolved, case-insensitive relative path prefixes to exclude
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipPrefixes {
    prefixes: Vec<String>,
}

impl SkipPrefixes {
    /// Normalize a list of skip entries.
    ///
    /// Backslashes become `/`, leading `./` and `/` are removed and the
    /// result is lower-cased; entries that end up empty are dropped. A
    /// trailing `/` is kept, so `vendor/` only matches that directory while
    /// `vendor` also matches `vendors/...`.
    pub fn from_list<S: AsRef<str>>(items: &[S]) -> Self {
        let prefixes = items
            .iter()
            .filter_map(|item| normalize_prefix(item.as_ref()))
            .collect();
        Self { prefixes }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Whether a lower-case relative file path is excluded.
    pub fn matches_file(&self, relative_lower: &str) -> bool {
        self.prefixes.iter().any(|p| relative_lower.starts_with(p.as_str()))
    }

    /// Whether every file below a lower-case relative directory is excluded,
    /// so the walk can skip the whole subtree.
    pub fn covers_dir(&self, relative_lower: &str) -> bool {
        let with_slash = format!("{}/", relative_lower);
        self.prefixes.iter().any(|p| with_slash.starts_with(p.as_str()))
    }
}

fn normalize_prefix(raw: &str) -> Option<String> {
    let mut prefix = raw.trim().replace('\\', "/");
    loop {
        if let Some(rest) = prefix.strip_prefix("./") {
            prefix = rest.to_string();
        } else if let Some(rest) = prefix.strip_prefix('/') {
            prefix = rest.to_string();
        } else {
            break;
        }
    }
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_lowercase())
    }
}
