//! Recursive tree scanning
//!
//! Walks one resolved root, following symlinks, and records every regular
//! file that passes the extension and skip filters. Directories are
//! traversed but never recorded. A dangling symlink is not a regular file
//! and is skipped. Symlink cycles are not supported: the walker reports a
//! loop as an error and the scan aborts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mirror_fs::NormalizedPath;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::options::{CompareOptions, ExtensionFilter, SkipPrefixes};
use crate::record::{FileRecord, Side, slash_subpath};
use crate::{Error, Result};

/// Scan output: path hash to record
pub type ScanMap = HashMap<String, FileRecord>;

/// Scanner for one side of a comparison
#[derive(Debug, Clone)]
pub struct TreeScanner {
    side: Side,
    extensions: ExtensionFilter,
    skip: SkipPrefixes,
}

impl TreeScanner {
    pub fn new(side: Side, options: &CompareOptions) -> Self {
        Self {
            side,
            extensions: options.extension_filter(),
            skip: options.skip_prefixes(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Scan the tree below `root`, which must be a resolved real path.
    ///
    /// # Errors
    ///
    /// - [`Error::OutsideRoot`] if any visited file's real path is not
    ///   below `root`. This aborts the whole scan.
    /// - [`Error::Fs`] for unreadable directories, metadata failures and
    ///   symlink loops. Dangling symlinks are skipped, not reported.
    pub fn scan(&self, root: &NormalizedPath) -> Result<ScanMap> {
        info!("Scanning side {} at {}", self.side, root);

        let root_native = root.to_native();
        let mut records = ScanMap::new();
        let mut filtered = 0usize;

        let walker = WalkDir::new(&root_native)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(&root_native, entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling_link(&err) => {
                    debug!("Skipping dangling symlink {:?}", err.path());
                    continue;
                }
                Err(err) => return Err(walk_error(&root_native, err)),
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(subpath) = native_subpath(&root_native, entry.path()) else {
                continue;
            };
            let relative = slash_subpath(&subpath);

            let real = dunce::canonicalize(entry.path())
                .map_err(|e| mirror_fs::Error::io(entry.path(), e))?;
            let real = NormalizedPath::new(real);
            if real.relative_to(root).is_none() {
                return Err(Error::OutsideRoot {
                    path: real.to_string(),
                    root: root.to_string(),
                });
            }

            let lower = relative.to_lowercase();
            if self.skip.matches_file(&lower) || !self.extensions.matches(&lower) {
                debug!("Filtered {}", relative);
                filtered += 1;
                continue;
            }

            let metadata = entry
                .metadata()
                .map_err(|e| walk_error(&root_native, e))?;
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .map_err(|e| mirror_fs::Error::io(entry.path(), e))?;

            let record = FileRecord::new(
                entry.path(),
                subpath,
                self.side,
                modified,
                metadata.len(),
            );
            records.insert(record.path_hash().to_string(), record);
        }

        info!(
            "Scanned side {}: {} file(s) recorded, {} filtered",
            self.side,
            records.len(),
            filtered
        );
        Ok(records)
    }

    /// Directories entirely covered by a skip prefix are not descended into.
    fn is_pruned(&self, root: &Path, entry: &DirEntry) -> bool {
        if self.skip.is_empty() || entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        match native_subpath(root, entry.path()) {
            Some(subpath) => {
                let relative = slash_subpath(&subpath);
                let pruned = self.skip.covers_dir(&relative.to_lowercase());
                if pruned {
                    debug!("Skipping subtree {}", relative);
                }
                pruned
            }
            None => false,
        }
    }
}

/// Native subpath of `path` below `root`, original case.
fn native_subpath(root: &Path, path: &Path) -> Option<PathBuf> {
    let subpath = path.strip_prefix(root).ok()?;
    if subpath.as_os_str().is_empty() {
        None
    } else {
        Some(subpath.to_path_buf())
    }
}

/// A followed symlink whose target does not exist.
fn is_dangling_link(err: &walkdir::Error) -> bool {
    if err.loop_ancestor().is_some() {
        return false;
    }
    let not_found = err
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound);
    not_found
        && err
            .path()
            .and_then(|p| fs::symlink_metadata(p).ok())
            .is_some_and(|meta| meta.file_type().is_symlink())
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    mirror_fs::Error::io(path, std::io::Error::from(err)).into()
}
