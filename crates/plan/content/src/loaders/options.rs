//! Run options loader.

use std::path::Path;

use plan_core::RunOptions;

use crate::loaders::{LoadResult, read_file};

/// Loader for run options from TOML files.
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load run options from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing RunOptions
    ///
    /// # Returns
    ///
    /// Returns the parsed options. Range checks happen in
    /// [`RunOptions::validate`] once the job catalog is known.
    pub fn load(path: &Path) -> LoadResult<RunOptions> {
        let content = read_file(path)?;
        let options: RunOptions = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse options TOML: {}", e))?;

        Ok(options)
    }
}
