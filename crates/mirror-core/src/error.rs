//! Error types for mirror-core

use serde::{Deserialize, Serialize};

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Both inputs of a comparison resolve to the same real directory
    #[error("Both directories resolve to the same path: {path}")]
    SameDirectory { path: String },

    /// A synchronization was requested with an empty selection
    #[error("Nothing selected to synchronize")]
    NothingSelected,

    /// A selected hash does not name any candidate of the comparison
    #[error("Unknown candidate selected: {hash}")]
    UnknownCandidate { hash: String },

    /// A scanned file resolved to a real path outside its tree root
    #[error("File {path} resolves outside scan root {root}")]
    OutsideRoot { path: String, root: String },

    /// The destination content differs from the source after a copy
    #[error("Copy verification failed: {from} -> {to} (expected {expected}, found {actual})")]
    VerificationFailed {
        from: String,
        to: String,
        expected: String,
        actual: String,
    },

    /// A batch stopped at its first failing candidate
    #[error("Synchronization aborted at {hash} after {copied} copied file(s): {source}")]
    BatchAborted {
        hash: String,
        copied: usize,
        #[source]
        source: Box<Error>,
    },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Bad arguments: missing directories, self-comparison, bad selection
    Validation,
    /// Filesystem failures while resolving, scanning, creating or copying
    Io,
    /// Invariant violations: escaped roots, failed copy verification
    Integrity,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SameDirectory { .. } | Self::NothingSelected | Self::UnknownCandidate { .. } => {
                ErrorKind::Validation
            }
            Self::OutsideRoot { .. } | Self::VerificationFailed { .. } => ErrorKind::Integrity,
            Self::BatchAborted { source, .. } => source.kind(),
            Self::Fs(mirror_fs::Error::InvalidDirectory { .. }) => ErrorKind::Validation,
            Self::Fs(_) | Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Number of files copied before a batch failed (zero for any other error).
    pub fn copied(&self) -> usize {
        match self {
            Self::BatchAborted { copied, .. } => *copied,
            _ => 0,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation error"),
            Self::Io => write!(f, "I/O error"),
            Self::Integrity => write!(f, "integrity error"),
        }
    }
}
