//! Jobs: the nodes of the task graph.
//!
//! A job is a named unit of work with readiness and completion predicates,
//! a combat policy, preparation (items, choices, outfit) and an effect that
//! either visits a location or runs a procedure.
//!
//! Completion must be monotonic: once a job reads complete it stays complete
//! without further action. The engine treats a regression as a defect.

pub mod graph;
pub mod limit;
pub mod route;

use std::fmt;

pub use graph::{RESERVED_NAMES, TaskGraph};
pub use limit::{AttemptLimit, JobStatus};
pub use route::RouteOrder;

use crate::combat::CombatPolicy;
use crate::context::PlanContext;
use crate::loadout::Outfit;
use crate::names::{Item, JobName, Location};
use crate::priority::PriorityHint;
use crate::value::Value;
use crate::world::CombatRate;
use crate::{Predicate, Procedure};

/// An item the job needs before it runs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Acquisition {
    pub item: Item,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub quantity: u32,
    /// Highest price paid per unit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_price: Option<u32>,
    /// Optional acquisitions may fail silently.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl Acquisition {
    pub fn new(item: impl Into<Item>) -> Self {
        Self {
            item: item.into(),
            quantity: 1,
            max_price: None,
            optional: false,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_max_price(mut self, price: u32) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// What executing a job actually does.
pub enum JobEffect {
    /// Spend one turn at a location and let the encounter resolve.
    Visit(Location),
    /// Run an arbitrary procedure.
    Run(Procedure),
}

impl fmt::Debug for JobEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visit(location) => f.debug_tuple("Visit").field(location).finish(),
            Self::Run(_) => f.write_str("Run(..)"),
        }
    }
}

/// A node of the task graph.
pub struct Job {
    pub name: JobName,
    /// Prerequisites, by name, in declared order.
    pub after: Vec<JobName>,
    pub ready: Option<Predicate>,
    pub completed: Predicate,
    pub priority: Option<Value<PriorityHint>>,
    pub limit: AttemptLimit,
    pub combat: CombatPolicy,
    pub outfit: Outfit,
    pub acquire: Vec<Acquisition>,
    /// Choice-adventure answers, set before the effect runs.
    pub choices: Vec<(u32, Value<u32>)>,
    pub effect: JobEffect,
    pub post: Option<Procedure>,
    pub boss: bool,
    pub free_action: Value<bool>,
    pub accepts_wanderers: bool,
    /// Desired combat rate ("mood") while the job runs.
    pub combat_rate: Option<CombatRate>,
    /// Non-combat encounters that do not count as attempts.
    pub ignored_encounters: Vec<String>,
}

impl Job {
    /// Creates a job with the given completion predicate and effect.
    ///
    /// Every other field starts empty: no prerequisites, always ready, no
    /// limits, kill everything, not a free action.
    pub fn new(
        name: impl Into<JobName>,
        completed: impl Fn(&PlanContext<'_>) -> bool + 'static,
        effect: JobEffect,
    ) -> Self {
        Self {
            name: name.into(),
            after: Vec::new(),
            ready: None,
            completed: Box::new(completed),
            priority: None,
            limit: AttemptLimit::default(),
            combat: CombatPolicy::default(),
            outfit: Outfit::default(),
            acquire: Vec::new(),
            choices: Vec::new(),
            effect,
            post: None,
            boss: false,
            free_action: Value::Fixed(false),
            accepts_wanderers: false,
            combat_rate: None,
            ignored_encounters: Vec::new(),
        }
    }

    /// Creates a job that visits a location.
    pub fn visit(
        name: impl Into<JobName>,
        location: impl Into<Location>,
        completed: impl Fn(&PlanContext<'_>) -> bool + 'static,
    ) -> Self {
        Self::new(name, completed, JobEffect::Visit(location.into()))
    }

    pub fn with_after<I, N>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<JobName>,
    {
        self.after.extend(prerequisites.into_iter().map(Into::into));
        self
    }

    pub fn with_ready(mut self, ready: impl Fn(&PlanContext<'_>) -> bool + 'static) -> Self {
        self.ready = Some(Box::new(ready));
        self
    }

    pub fn with_priority(mut self, priority: Value<PriorityHint>) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_limit(mut self, limit: AttemptLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_combat(mut self, policy: CombatPolicy) -> Self {
        self.combat = policy;
        self
    }

    pub fn with_outfit(mut self, outfit: Outfit) -> Self {
        self.outfit = outfit;
        self
    }

    pub fn with_acquire(mut self, acquisition: Acquisition) -> Self {
        self.acquire.push(acquisition);
        self
    }

    pub fn with_choice(mut self, choice: u32, option: Value<u32>) -> Self {
        self.choices.push((choice, option));
        self
    }

    pub fn with_post(mut self, post: Procedure) -> Self {
        self.post = Some(post);
        self
    }

    pub fn boss(mut self) -> Self {
        self.boss = true;
        self
    }

    pub fn with_free_action(mut self, free: Value<bool>) -> Self {
        self.free_action = free;
        self
    }

    pub fn accepts_wanderers(mut self) -> Self {
        self.accepts_wanderers = true;
        self
    }

    pub fn with_combat_rate(mut self, rate: CombatRate) -> Self {
        self.combat_rate = Some(rate);
        self
    }

    pub fn with_ignored_encounter(mut self, name: impl Into<String>) -> Self {
        self.ignored_encounters.push(name.into());
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The location this job visits, if it visits one.
    pub fn location(&self) -> Option<&Location> {
        match &self.effect {
            JobEffect::Visit(location) => Some(location),
            JobEffect::Run(_) => None,
        }
    }

    pub fn is_complete(&self, ctx: &PlanContext<'_>) -> bool {
        (self.completed)(ctx)
    }

    /// Readiness predicate; a job without one is always ready.
    pub fn is_ready(&self, ctx: &PlanContext<'_>) -> bool {
        self.ready.as_ref().is_none_or(|ready| ready(ctx))
    }

    pub fn is_free_action(&self, ctx: &PlanContext<'_>) -> bool {
        self.free_action.evaluate(ctx)
    }

    pub fn ignores_encounter(&self, name: &str) -> bool {
        self.ignored_encounters.iter().any(|ignored| ignored == name)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("after", &self.after)
            .field("effect", &self.effect)
            .field("combat", &self.combat)
            .field("limit", &self.limit)
            .field("boss", &self.boss)
            .finish_non_exhaustive()
    }
}
