//! Routing order loader.

use std::path::Path;

use plan_core::JobName;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};

/// Preferred job order for tie-breaking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteFile {
    pub order: Vec<JobName>,
}

/// Loader for the routing order from RON files.
pub struct RouteLoader;

impl RouteLoader {
    /// Load the listed job names. Unknown or repeated names are reported
    /// later by [`plan_core::RouteOrder::new`].
    pub fn load(path: &Path) -> LoadResult<Vec<JobName>> {
        let content = read_file(path)?;
        let route: RouteFile = parse_ron(&content, "route")?;

        Ok(route.order)
    }
}
