//! Scarce combat resources and their per-step allocation.
//!
//! A resource is a reusable, often equipment-bound capability: a banish, a
//! guaranteed kill, an escape, or a trigger that brings a wandering
//! opponent into the next fight. Resources are never owned by a job across
//! steps; the allocator re-binds them from scratch every step.
//!
//! # Architecture
//!
//! - [`Resource`]: one catalog entry with its predicates and script
//! - [`ResourceRegistry`]: resources in declared priority order
//! - [`allocate`]: binds at most one resource per category to a job

pub mod allocate;
pub mod registry;

use std::fmt;

pub use allocate::{Bindings, allocate, needs, preview};
pub use registry::ResourceRegistry;

use crate::combat::Step;
use crate::context::PlanContext;
use crate::loadout::EquipRequirement;
use crate::names::Opponent;
use crate::value::Value;
use crate::{Predicate, Procedure};

/// Resource categories, also the allocator's scan order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ResourceCategory {
    Wanderer,
    Banish,
    GuaranteedKill,
    Escape,
}

impl ResourceCategory {
    /// Fixed order in which the allocator considers categories.
    pub const SCAN_ORDER: [ResourceCategory; 4] = [
        ResourceCategory::Wanderer,
        ResourceCategory::Banish,
        ResourceCategory::GuaranteedKill,
        ResourceCategory::Escape,
    ];
}

/// One combat resource.
pub struct Resource {
    /// Unique name; for banishers, also the ability name the game reports
    /// once it has been triggered.
    pub name: String,
    pub category: ResourceCategory,
    pub available: Predicate,
    pub equip: Option<EquipRequirement>,
    /// Side effect run before the encounter (e.g., refilling a charge).
    pub prepare: Option<Procedure>,
    /// Success probability in `[0, 1]`; absent means certain.
    pub chance: Option<Value<f64>>,
    /// Script contributed to the fight.
    pub steps: Vec<Step>,
    /// Opponents a wanderer brings.
    pub opponents: Vec<Opponent>,
}

impl Resource {
    /// Creates an always-available resource with no equipment.
    pub fn new(name: impl Into<String>, category: ResourceCategory, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            category,
            available: Box::new(|_| true),
            equip: None,
            prepare: None,
            chance: None,
            steps,
            opponents: Vec::new(),
        }
    }

    pub fn with_available(mut self, f: impl Fn(&PlanContext<'_>) -> bool + 'static) -> Self {
        self.available = Box::new(f);
        self
    }

    pub fn with_equip(mut self, requirement: EquipRequirement) -> Self {
        self.equip = Some(requirement);
        self
    }

    pub fn with_prepare(mut self, procedure: Procedure) -> Self {
        self.prepare = Some(procedure);
        self
    }

    pub fn with_chance(mut self, chance: Value<f64>) -> Self {
        self.chance = Some(chance);
        self
    }

    pub fn with_opponents(mut self, opponents: impl IntoIterator<Item = Opponent>) -> Self {
        self.opponents = opponents.into_iter().collect();
        self
    }

    pub fn is_available(&self, ctx: &PlanContext<'_>) -> bool {
        (self.available)(ctx)
    }

    /// Success probability, clamped to `[0, 1]`. A non-finite estimate
    /// counts as zero.
    pub fn chance(&self, ctx: &PlanContext<'_>) -> f64 {
        let chance = self.chance.as_ref().map_or(1.0, |chance| chance.evaluate(ctx));
        if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("equip", &self.equip)
            .field("steps", &self.steps)
            .field("opponents", &self.opponents)
            .finish_non_exhaustive()
    }
}
