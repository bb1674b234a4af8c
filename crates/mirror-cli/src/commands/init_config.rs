//! Init-config command implementation

use std::path::Path;

use colored::Colorize;

use mirror_core::CompareOptions;
use mirror_fs::{ConfigStore, NormalizedPath};

use crate::error::{CliError, Result};

/// Write the default compare options to `file`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn run_init_config(file: &Path, force: bool) -> Result<()> {
    if file.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            file.display()
        )));
    }

    let path = NormalizedPath::new(file);
    ConfigStore::new().save(&path, &CompareOptions::default())?;

    println!("{} Wrote {}", "OK".green().bold(), path.as_str().cyan());
    Ok(())
}
