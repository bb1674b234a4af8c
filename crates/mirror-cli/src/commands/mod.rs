//! Command implementations for mirror-cli

pub mod compare;
pub mod init_config;
pub mod sync;

pub use compare::run_compare;
pub use init_config::run_init_config;
pub use sync::{SyncArgs, run_sync};

use mirror_core::{CompareOptions, WILDCARD};
use mirror_fs::{ConfigStore, NormalizedPath};
use tracing::debug;

use crate::cli::FilterArgs;
use crate::error::Result;

/// Build compare options from an optional config file and command-line flags.
///
/// Flags extend the loaded options. Extension flags replace a wildcard-only
/// list instead of extending it, so `-e php` narrows the default.
pub fn load_options(filters: &FilterArgs) -> Result<CompareOptions> {
    let mut options = match &filters.config {
        Some(path) => {
            debug!("Loading compare options from {}", path.display());
            ConfigStore::new().load(&NormalizedPath::new(path))?
        }
        None => CompareOptions::default(),
    };

    if !filters.extensions.is_empty() {
        if options.extensions.iter().all(|e| e.trim() == WILDCARD) {
            options.extensions.clear();
        }
        options.extensions.extend(filters.extensions.iter().cloned());
    }
    options
        .skip_directories
        .extend(filters.skip.iter().cloned());

    Ok(options)
}
