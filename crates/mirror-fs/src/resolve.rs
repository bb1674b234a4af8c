//! Real-path resolution for tree roots
//!
//! Some filesystems only expose the canonical form of a directory through
//! an entry it contains, so the root is resolved via a child: an existing
//! entry when there is one, a short-lived marker file otherwise.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Prefix of the marker file created inside empty directories.
const MARKER_PREFIX: &str = ".mirror-probe-";

/// Resolve the normalized, absolute real path of an existing directory.
///
/// # Errors
///
/// - [`Error::InvalidDirectory`] if `directory` is blank or is not an
///   existing directory.
/// - [`Error::Io`] if the directory cannot be listed, an entry cannot be
///   canonicalized, or the marker file cannot be created or removed.
pub fn resolve_real_path(directory: &str) -> Result<NormalizedPath> {
    if directory.trim().is_empty() {
        return Err(Error::invalid_directory(directory, "path is blank"));
    }

    let mut normalized = directory.replace('\\', "/");
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    let dir = Path::new(&normalized);
    if !dir.is_dir() {
        return Err(Error::invalid_directory(
            directory,
            "not an existing directory",
        ));
    }

    match first_plain_entry(dir)? {
        Some(entry) => {
            let real = dunce::canonicalize(&entry).map_err(|e| Error::io(&entry, e))?;
            parent_of(&real, directory)
        }
        None => resolve_through_marker(dir, directory),
    }
}

/// First entry of `dir` that is not a symlink; a symlinked entry would
/// resolve to a parent outside `dir`.
fn first_plain_entry(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_symlink() {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

fn resolve_through_marker(dir: &Path, input: &str) -> Result<NormalizedPath> {
    let marker = dir.join(format!("{}{}", MARKER_PREFIX, uuid::Uuid::new_v4()));
    debug!("Resolving {} through marker {}", input, marker.display());

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&marker)
        .map_err(|e| Error::io(&marker, e))?;

    let resolved = dunce::canonicalize(&marker).map_err(|e| Error::io(&marker, e));

    fs::remove_file(&marker).map_err(|e| Error::io(&marker, e))?;

    parent_of(&resolved?, input)
}

fn parent_of(real: &Path, input: &str) -> Result<NormalizedPath> {
    real.parent()
        .map(NormalizedPath::new)
        .ok_or_else(|| Error::invalid_directory(input, "resolved entry has no parent"))
}
