//! Filesystem primitives for the mirror tree synchronizer
//!
//! Provides normalized path handling, real-path resolution of directory
//! roots, content and path hashing, directory-chain creation, verified
//! copies and format-agnostic configuration I/O.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;
pub mod resolve;

pub use checksum::{compute_content_checksum, compute_file_checksum, compute_path_hash};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use resolve::resolve_real_path;
