//! Combat kit and default equipment loader.

use std::path::Path;

use plan_core::{CombatKit, EquipRequirement};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Contents of `kit.toml`.
///
/// ```toml
/// [combat]
/// elemental_kill = "Saucegeyser"
///
/// [[equipment]]
/// item = "lucky hat"
/// slots = "HAT"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitFile {
    pub combat: CombatKit,
    /// Default equipment, in fill order.
    pub equipment: Vec<EquipRequirement>,
}

/// Loader for the combat kit from TOML files.
pub struct KitLoader;

impl KitLoader {
    pub fn load(path: &Path) -> LoadResult<KitFile> {
        let content = read_file(path)?;
        let kit: KitFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse kit TOML: {}", e))?;

        Ok(kit)
    }
}
