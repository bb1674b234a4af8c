//! Comparison and synchronization of two directory trees
//!
//! This crate implements:
//!
//! - **TreeScanner**: recursive listing of one tree with extension and skip filters
//! - **DiffEngine**: content-aware join of two scans into missing and conflicting candidates
//! - **SyncExecutor**: fail-fast, verified copying of a caller-chosen selection
//! - **Mirror**: the facade that validates inputs and reports every outcome
//!
//! # Architecture
//!
//! ```text
//!                 CLI / embedders
//!                        |
//!                     Mirror ---- Reporter
//!                        |
//!      +-----------+-----+------+--------------+
//!      |           |            |              |
//!  resolve    TreeScanner   DiffEngine   SyncExecutor
//!      |           |            |              |
//!      +-----------+--- mirror-fs -------------+
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mirror_core::{CompareOptions, Mirror, Result};
//!
//! fn example() -> Result<()> {
//!     let mirror = Mirror::default();
//!     let options = CompareOptions::default().with_extensions(["php", "js"]);
//!     let mut comparison = mirror.compare("/srv/a", "/srv/b", &options)?;
//!     let missing: Vec<String> = comparison
//!         .candidates
//!         .missing()
//!         .map(|c| c.path_hash().to_string())
//!         .collect();
//!     mirror.synchronize(&mut comparison, &missing)?;
//!     Ok(())
//! }
//! ```

pub mod candidate;
pub mod diff;
pub mod error;
pub mod executor;
pub mod mirror;
pub mod options;
pub mod record;
pub mod report;
pub mod scanner;

pub use candidate::{CandidateKind, CandidateSet, CopyPlan, SyncCandidate};
pub use diff::DiffEngine;
pub use error::{Error, ErrorKind, Result};
pub use executor::{FileCopier, FsCopier, SyncExecutor};
pub use mirror::{Comparison, ComparisonSummary, Mirror};
pub use options::{CompareOptions, ExtensionFilter, SkipPrefixes, WILDCARD};
pub use record::{FileRecord, Side};
pub use report::{MemoryReporter, Message, NullReporter, Reporter, Severity, TracingReporter};
pub use scanner::{ScanMap, TreeScanner};
