//! Resource catalog loader.

use std::path::Path;

use plan_core::ResourceRegistry;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, parse_ron, read_file};
use crate::specs::ResourceSpec;

/// Resource catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCatalog {
    pub resources: Vec<ResourceSpec>,
}

/// Loader for the resource registry from RON files.
pub struct ResourceLoader;

impl ResourceLoader {
    /// Load resources from a RON file, keeping file order as preference order.
    pub fn load(path: &Path) -> LoadResult<ResourceRegistry> {
        let content = read_file(path)?;
        let catalog: ResourceCatalog = parse_ron(&content, "resource catalog")?;

        let mut registry = ResourceRegistry::new();
        for spec in catalog.resources {
            if registry.get(&spec.name).is_some() {
                anyhow::bail!("Duplicate resource `{}` in {}", spec.name, path.display());
            }
            registry.register(spec.build());
        }
        Ok(registry)
    }
}
