//! Catalog factory for loading a whole planning catalog from a directory.

use std::path::{Path, PathBuf};

use plan_core::{CombatKit, EquipRequirement, Job, JobName, ResourceRegistry, RunOptions};
use tracing::debug;

use crate::loaders::{
    JobLoader, KitFile, KitLoader, LoadResult, OptionsLoader, ResourceLoader, RouteLoader,
};

/// Everything the engine needs, loaded but not yet validated.
#[derive(Debug)]
pub struct Catalog {
    pub jobs: Vec<Job>,
    pub resources: ResourceRegistry,
    /// Preferred order; unlisted jobs follow in declaration order.
    pub route: Vec<JobName>,
    pub options: RunOptions,
    pub kit: CombatKit,
    pub default_equipment: Vec<EquipRequirement>,
}

/// Catalog factory that loads planning content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── jobs.ron          (required)
/// ├── resources.ron     (optional, empty registry when absent)
/// ├── route.ron         (optional, declaration order when absent)
/// ├── options.toml      (optional, default options when absent)
/// └── kit.toml          (optional, default kit and no equipment when absent)
/// ```
pub struct CatalogFactory {
    data_dir: PathBuf,
}

impl CatalogFactory {
    /// Creates a new catalog factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing catalog files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load jobs from `jobs.ron`.
    pub fn load_jobs(&self) -> LoadResult<Vec<Job>> {
        JobLoader::load(&self.data_dir.join("jobs.ron"))
    }

    /// Load resources from `resources.ron`.
    pub fn load_resources(&self) -> LoadResult<ResourceRegistry> {
        let path = self.data_dir.join("resources.ron");
        if !path.exists() {
            debug!(path = %path.display(), "no resource catalog, using an empty registry");
            return Ok(ResourceRegistry::new());
        }
        ResourceLoader::load(&path)
    }

    /// Load the routing order from `route.ron`.
    pub fn load_route(&self) -> LoadResult<Vec<JobName>> {
        let path = self.data_dir.join("route.ron");
        if !path.exists() {
            return Ok(Vec::new());
        }
        RouteLoader::load(&path)
    }

    /// Load run options from `options.toml`.
    pub fn load_options(&self) -> LoadResult<RunOptions> {
        let path = self.data_dir.join("options.toml");
        if !path.exists() {
            return Ok(RunOptions::default());
        }
        OptionsLoader::load(&path)
    }

    /// Load the combat kit and default equipment from `kit.toml`.
    pub fn load_kit(&self) -> LoadResult<KitFile> {
        let path = self.data_dir.join("kit.toml");
        if !path.exists() {
            return Ok(KitFile::default());
        }
        KitLoader::load(&path)
    }

    /// Load every catalog file.
    pub fn load(&self) -> LoadResult<Catalog> {
        let jobs = self.load_jobs()?;
        let resources = self.load_resources()?;
        let route = self.load_route()?;
        let options = self.load_options()?;
        let KitFile { combat, equipment } = self.load_kit()?;

        debug!(
            dir = %self.data_dir.display(),
            jobs = jobs.len(),
            resources = resources.len(),
            routed = route.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            jobs,
            resources,
            route,
            options,
            kit: combat,
            default_equipment: equipment,
        })
    }
}
