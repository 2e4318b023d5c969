//! Greedy, per-step resource allocation.
//!
//! For the selected job, the allocator walks the needed categories in
//! [`ResourceCategory::SCAN_ORDER`] and, within a category, the registry in
//! declared order. The first resource that survives every filter is bound and
//! its equipment committed to the step's loadout. There is no backtracking:
//! a resource that claims a slot first keeps it even if a later category then
//! finds nothing.
//!
//! A category with no survivor is not an error. The compiler degrades the
//! affected strategies to abort.

use tracing::debug;

use crate::combat::Strategy;
use crate::context::PlanContext;
use crate::job::Job;
use crate::loadout::Loadout;
use crate::resource::{Resource, ResourceCategory, ResourceRegistry};

/// Resources bound to one job for one step, at most one per category.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bindings<'r> {
    bound: [Option<&'r Resource>; 4],
}

fn slot(category: ResourceCategory) -> usize {
    match category {
        ResourceCategory::Wanderer => 0,
        ResourceCategory::Banish => 1,
        ResourceCategory::GuaranteedKill => 2,
        ResourceCategory::Escape => 3,
    }
}

impl<'r> Bindings<'r> {
    /// No resources bound.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, resource: &'r Resource) {
        self.bound[slot(resource.category)] = Some(resource);
    }

    pub fn get(&self, category: ResourceCategory) -> Option<&'r Resource> {
        self.bound[slot(category)]
    }

    pub fn wanderer(&self) -> Option<&'r Resource> {
        self.get(ResourceCategory::Wanderer)
    }

    pub fn banish(&self) -> Option<&'r Resource> {
        self.get(ResourceCategory::Banish)
    }

    pub fn guaranteed_kill(&self) -> Option<&'r Resource> {
        self.get(ResourceCategory::GuaranteedKill)
    }

    pub fn escape(&self) -> Option<&'r Resource> {
        self.get(ResourceCategory::Escape)
    }

    /// Bound resources in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &'r Resource> + '_ {
        self.bound.iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.iter().all(Option::is_none)
    }

    /// Names of bound resources, for logs.
    pub fn names(&self) -> Vec<&'r str> {
        self.iter().map(|resource| resource.name.as_str()).collect()
    }
}

/// Categories the job needs this step, in scan order.
///
/// # Arguments
///
/// * `job` - The selected job
/// * `remaining` - Every still-incomplete job (the selected job may be
///   included; it is skipped by name)
/// * `ctx` - Planning context
pub fn needs(job: &Job, remaining: &[&Job], ctx: &PlanContext<'_>) -> Vec<ResourceCategory> {
    ResourceCategory::SCAN_ORDER
        .into_iter()
        .filter(|category| needs_category(*category, job, remaining, ctx))
        .collect()
}

fn needs_category(
    category: ResourceCategory,
    job: &Job,
    remaining: &[&Job],
    ctx: &PlanContext<'_>,
) -> bool {
    let policy = &job.combat;
    match category {
        ResourceCategory::Wanderer => job.accepts_wanderers && ctx.options.wanderers,
        ResourceCategory::Banish => policy
            .banish_targets()
            .any(|opponent| !ctx.is_banished(opponent)),
        ResourceCategory::GuaranteedKill => {
            if policy.uses(&Strategy::KillGuaranteed) {
                return true;
            }
            // Last chance: spend it on a plain kill only if nobody else
            // still declares a guaranteed-kill need.
            policy.uses(&Strategy::Kill)
                && !job.boss
                && !remaining.iter().any(|other| {
                    other.name != job.name && other.combat.uses(&Strategy::KillGuaranteed)
                })
        }
        ResourceCategory::Escape => policy.uses_ignore(),
    }
}

/// Why a resource cannot be bound right now.
fn rejection(resource: &Resource, loadout: &Loadout, ctx: &PlanContext<'_>) -> Option<&'static str> {
    if !resource.is_available(ctx) {
        return Some("unavailable");
    }
    if resource.chance(ctx) == 0.0 {
        return Some("zero chance");
    }
    if resource.category == ResourceCategory::Banish && ctx.is_triggered(&resource.name) {
        return Some("already triggered");
    }
    if let Some(requirement) = &resource.equip
        && loadout.fit(requirement).is_none()
    {
        return Some("slot taken");
    }
    None
}

/// Returns the first resource of a category that could be bound to an
/// otherwise empty loadout, ignoring whether any job needs it.
pub fn first_ready<'r>(
    registry: &'r ResourceRegistry,
    category: ResourceCategory,
    ctx: &PlanContext<'_>,
) -> Option<&'r Resource> {
    let empty = Loadout::new();
    registry
        .in_category(category)
        .find(|resource| rejection(resource, &empty, ctx).is_none())
}

/// Binds resources to the selected job and commits their equipment.
///
/// # Arguments
///
/// * `registry` - Resource catalog in preference order
/// * `job` - The selected job
/// * `remaining` - Every still-incomplete job, for the last-chance rule
/// * `loadout` - The step's loadout, already holding the job's own equipment
/// * `ctx` - Planning context
///
/// # Returns
///
/// At most one bound resource per needed category.
pub fn allocate<'r>(
    registry: &'r ResourceRegistry,
    job: &Job,
    remaining: &[&Job],
    loadout: &mut Loadout,
    ctx: &PlanContext<'_>,
) -> Bindings<'r> {
    let mut bindings = Bindings::none();

    for category in needs(job, remaining, ctx) {
        for resource in registry.in_category(category) {
            if let Some(reason) = rejection(resource, loadout, ctx) {
                debug!(job = %job.name, resource = %resource.name, %category, reason, "resource skipped");
                continue;
            }
            if let Some(requirement) = &resource.equip
                && loadout.place(requirement).is_err()
            {
                continue;
            }
            debug!(job = %job.name, resource = %resource.name, %category, "resource bound");
            bindings.bind(resource);
            break;
        }
    }

    bindings
}

/// Runs the allocator against a scratch copy of the job's own loadout.
///
/// Used by scoring to ask "what would this job get if it ran now" without
/// committing anything.
pub fn preview<'r>(
    registry: &'r ResourceRegistry,
    job: &Job,
    remaining: &[&Job],
    ctx: &PlanContext<'_>,
) -> Bindings<'r> {
    let mut scratch = Loadout::new();
    for requirement in &job.outfit.equip {
        let _ = scratch.place(requirement);
    }
    allocate(registry, job, remaining, &mut scratch, ctx)
}
