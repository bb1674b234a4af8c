//! Scanned file records

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use mirror_fs::{compute_file_checksum, compute_path_hash};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Which of the two compared trees a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Position of this side in a `[A, B]` pair
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A regular file found by a tree scan.
///
/// All I/O goes through the native `absolute` path and `subpath`. The
/// forward-slash `relative` string is derived from them for hashing and
/// display only.
///
/// The content hash is computed on first request and cached for the
/// lifetime of the record.
#[derive(Debug, Clone)]
pub struct FileRecord {
    absolute: PathBuf,
    subpath: PathBuf,
    relative: String,
    side: Side,
    path_hash: String,
    modified: DateTime<Utc>,
    size: u64,
    content_hash: OnceCell<String>,
}

impl FileRecord {
    /// Create a record. `subpath` is the native path below the tree root,
    /// in its original case.
    pub fn new(
        absolute: impl Into<PathBuf>,
        subpath: impl Into<PathBuf>,
        side: Side,
        modified: DateTime<Utc>,
        size: u64,
    ) -> Self {
        let subpath = subpath.into();
        let relative = slash_subpath(&subpath);
        let path_hash = compute_path_hash(&relative);
        Self {
            absolute: absolute.into(),
            subpath,
            relative,
            side,
            path_hash,
            modified,
            size,
            content_hash: OnceCell::new(),
        }
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Native path below the tree root
    pub fn subpath(&self) -> &Path {
        &self.subpath
    }

    /// Forward-slash subpath, lossy for names that are not UTF-8
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Hash of the relative subpath; joins the same file across trees
    pub fn path_hash(&self) -> &str {
        &self.path_hash
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content hash of the file, read from disk on first call.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn content_hash(&self) -> Result<&str> {
        if let Some(hash) = self.content_hash.get() {
            return Ok(hash);
        }
        let hash = compute_file_checksum(&self.absolute)
            .map_err(|e| mirror_fs::Error::io(&self.absolute, e))?;
        Ok(self.content_hash.get_or_init(|| hash))
    }

    /// Whether the content hash has already been computed
    pub fn is_hashed(&self) -> bool {
        self.content_hash.get().is_some()
    }
}

/// Join the components of `subpath` with `/`.
pub(crate) fn slash_subpath(subpath: &Path) -> String {
    subpath
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
