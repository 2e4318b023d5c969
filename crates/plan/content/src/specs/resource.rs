//! Resource definitions.

use serde::{Deserialize, Serialize};

use plan_core::{EquipRequirement, Opponent, Resource, ResourceCategory, Step};

use super::condition::ConditionSpec;
use super::procedure::ProcedureSpec;
use super::value::ValueSpec;

/// A resource as written in `resources.ron`.
///
/// File order is preference order within each category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceSpec {
    pub name: String,
    pub category: ResourceCategory,
    #[serde(default)]
    pub available: ConditionSpec,
    #[serde(default)]
    pub equip: Option<EquipRequirement>,
    #[serde(default)]
    pub prepare: Option<ProcedureSpec>,
    #[serde(default)]
    pub chance: Option<ValueSpec<f64>>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub opponents: Vec<Opponent>,
}

impl ResourceSpec {
    pub fn build(self) -> Resource {
        let available = self.available;
        let mut resource = Resource::new(self.name, self.category, self.steps)
            .with_available(move |ctx| available.evaluate(ctx))
            .with_opponents(self.opponents);
        resource.equip = self.equip;
        resource.prepare = self.prepare.map(ProcedureSpec::build);
        resource.chance = self.chance.map(ValueSpec::build);
        resource
    }
}
