//! Loaders that read catalog files into planning-core values.
//!
//! Jobs and resources are written in RON through the spec types in
//! [`crate::specs`]; run options and the combat kit are plain TOML.

pub mod factory;
pub mod jobs;
pub mod kit;
pub mod options;
pub mod resources;
pub mod route;

pub use factory::{Catalog, CatalogFactory};
pub use jobs::{JobCatalog, JobLoader};
pub use kit::{KitFile, KitLoader};
pub use options::OptionsLoader;
pub use resources::{ResourceCatalog, ResourceLoader};
pub use route::{RouteFile, RouteLoader};

use std::path::Path;

use ron::extensions::Extensions;
use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses RON text with `implicit_some` enabled, so optional fields can be
/// written without `Some(..)`.
pub(crate) fn parse_ron<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}

/// Reads and parses any RON file.
///
/// # Arguments
///
/// * `path` - Path to the RON file
/// * `what` - Human-readable name of the content, used in error messages
pub fn load_ron<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
    let content = read_file(path)?;
    parse_ron(&content, what)
}
