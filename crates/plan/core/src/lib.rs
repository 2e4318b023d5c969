//! Planning core: what to do next, with which resources, and how to fight.
//!
//! This crate holds the deterministic decision logic of the planner. It
//! never talks to a game directly; every query and side effect goes through
//! the [`World`] trait.
//!
//! # Architecture
//!
//! Components, leaves first:
//!
//! - [`WorldCache`]: lazily computed, explicitly invalidated world facts
//! - [`ResourceRegistry`]: scarce combat resources in preference order
//! - [`Scorer`]: job → [`Priority`] made of named contributions
//! - [`resource::allocate`]: binds at most one resource per category
//! - [`combat::compile`]: policy + bindings → executable [`Macro`]
//! - [`TaskGraph`] / [`RouteOrder`]: validated jobs and the tie-break order
//!
//! The step loop that ties these together lives in the `runtime` crate.
//!
//! # Modules
//!
//! - [`job`]: jobs, the task graph, routing order, attempt limits
//! - [`combat`]: strategies, scripts, the compiler and script lowering
//! - [`resource`]: resources, the registry and the allocator
//! - [`priority`]: contributions, tiers and scoring rules
//! - [`world`]: the boundary trait and its value types

pub mod cache;
pub mod combat;
pub mod context;
pub mod error;
pub mod job;
pub mod loadout;
pub mod names;
pub mod options;
pub mod priority;
pub mod resource;
pub mod value;
pub mod world;

#[cfg(test)]
mod testing;

pub use cache::WorldCache;
pub use combat::{CombatKit, CombatPolicy, Macro, Step, Strategy};
pub use context::PlanContext;
pub use error::{ConfigError, ErrorCategory, LimitExceeded, LimitKind, PlanError, WorldError};
pub use job::{Acquisition, AttemptLimit, Job, JobEffect, JobStatus, RouteOrder, TaskGraph};
pub use loadout::{EquipRequirement, Loadout, Outfit, SlotSet};
pub use names::{Item, JobName, Location, Opponent, Skill};
pub use options::{MAX_PULLS, RunOptions};
pub use priority::{Contribution, Priority, PriorityHint, Scorer, Tier};
pub use resource::{Bindings, Resource, ResourceCategory, ResourceRegistry};
pub use value::Value;
pub use world::{
    ActorProfile, CombatRate, Encounter, EncounterKind, FightOutcome, OpponentStats,
    TriggeredAbility, WeaponCategory, World,
};

/// A world-state condition.
pub type Predicate = Box<dyn Fn(&PlanContext<'_>) -> bool>;

/// A side effect run against the world.
pub type Procedure = Box<dyn Fn(&mut dyn World) -> std::result::Result<(), WorldError>>;

/// Convenience alias for planning results.
pub type Result<T> = std::result::Result<T, PlanError>;
