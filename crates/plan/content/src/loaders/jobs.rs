//! Job catalog loader.

use std::path::Path;

use plan_core::Job;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};
use crate::specs::JobSpec;

/// Job catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCatalog {
    pub jobs: Vec<JobSpec>,
}

/// Loader for the job catalog from RON files.
pub struct JobLoader;

impl JobLoader {
    /// Load the job catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a JobCatalog
    ///
    /// # Returns
    ///
    /// Returns the built jobs in declaration order. Graph validation is left
    /// to [`plan_core::TaskGraph::new`].
    pub fn load(path: &Path) -> LoadResult<Vec<Job>> {
        let content = read_file(path)?;
        let catalog: JobCatalog = parse_ron(&content, "job catalog")?;

        Ok(catalog.jobs.into_iter().map(JobSpec::build).collect())
    }
}
