//! Directory-chain creation, file copies and atomic writes

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Ensure `dir` and every missing ancestor exist.
///
/// Walks upward from `dir` collecting missing levels until an existing
/// directory is found, then creates the missing levels top-down with one
/// `create_dir` per level. Returns the created directories in creation
/// order (empty if `dir` already existed).
///
/// Paths are handled natively, so directory names that contain a
/// backslash or are not valid UTF-8 are created as they are.
///
/// # Errors
///
/// Returns [`Error::Io`] for the first level that cannot be inspected or
/// created, or if an ancestor exists but is not a directory. Levels
/// created before the failure are left in place.
pub fn ensure_dir_chain(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut missing = Vec::new();
    let mut current = Some(dir.as_ref());

    while let Some(path) = current.filter(|p| !p.as_os_str().is_empty()) {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => break,
            Ok(_) => {
                return Err(Error::io(
                    path,
                    std::io::Error::other("exists and is not a directory"),
                ));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                missing.push(path.to_path_buf());
                current = path.parent();
            }
            Err(e) => return Err(Error::io(path, e)),
        }
    }

    missing.reverse();
    for level in &missing {
        fs::create_dir(level).map_err(|e| Error::io(level, e))?;
        debug!("Created directory {}", level.display());
    }

    Ok(missing)
}

/// Byte-copy `source` over `destination`, replacing any existing file.
///
/// The destination's parent must already exist. Returns the number of
/// bytes copied.
pub fn copy_file(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<u64> {
    let (src, dst) = (source.as_ref(), destination.as_ref());
    if !src.is_file() {
        return Err(Error::io(
            src,
            std::io::Error::new(ErrorKind::NotFound, "copy source is not a regular file"),
        ));
    }
    fs::copy(src, dst).map_err(|e| Error::io(dst, e))
}

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    // Ensure parent directory exists
    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file in the same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    drop(temp_file);

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
