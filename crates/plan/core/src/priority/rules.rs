//! The ordered rule set behind every priority score.
//!
//! Each rule looks at one job (plus a preview of the resources it would be
//! bound right now) and either contributes a signed, named value or stays
//! silent. Rules run in [`RULES`] order, which is also the order reasons
//! appear in explanations.

use crate::combat::Strategy;
use crate::context::PlanContext;
use crate::job::Job;
use crate::priority::{Contribution, PriorityHint};
use crate::resource::{Bindings, Resource};

pub const FREE_ACTION_BONUS: i32 = 20;
pub const WANDERER_READY_BONUS: i32 = 40;
pub const BANISH_READY_BONUS: i32 = 10;
pub const NO_BANISH_PENALTY: i32 = -10;
pub const GUARANTEED_KILL_READY_BONUS: i32 = 10;
pub const NO_GUARANTEED_KILL_PENALTY: i32 = -30;
pub const MOOD_MATCH_BONUS: i32 = 5;
pub const MOOD_CONFLICT_PENALTY: i32 = -5;
pub const SPECIAL_TARGET_BONUS: i32 = 15;
pub const UNWANTED_OPPONENT_PENALTY: i32 = -15;
pub const WASTED_WANDERER_PENALTY: i32 = -40;

/// Everything a rule may look at.
pub struct RuleInput<'a> {
    pub job: &'a Job,
    pub ctx: &'a PlanContext<'a>,
    /// Resources the job would be bound if it ran now.
    pub preview: Bindings<'a>,
    /// A certain wanderer that could fire this step, regardless of the job.
    pub idle_wanderer: Option<&'a Resource>,
}

/// A scoring rule.
pub type Rule = fn(&RuleInput<'_>) -> Option<Contribution>;

/// Rules in evaluation order.
pub const RULES: [(&str, Rule); 8] = [
    ("override", priority_override),
    ("free_action", free_action),
    ("wanderer", wanderer_ready),
    ("banish", banish_readiness),
    ("guaranteed_kill", guaranteed_kill_readiness),
    ("mood", mood),
    ("prediction", prediction),
    ("anti_waste", wasted_wanderer),
];

fn is_certain(resource: &Resource, ctx: &PlanContext<'_>) -> bool {
    resource.chance(ctx) >= 1.0
}

/// Explicit tier or point override.
pub fn priority_override(input: &RuleInput<'_>) -> Option<Contribution> {
    let hint = input.job.priority.as_ref()?.evaluate(input.ctx);
    let reason = match hint {
        PriorityHint::Tier(tier) => format!("{tier} override"),
        PriorityHint::Points(_) => "override".to_owned(),
    };
    Some(Contribution::new(reason, hint.points()))
}

pub fn free_action(input: &RuleInput<'_>) -> Option<Contribution> {
    input
        .job
        .is_free_action(input.ctx)
        .then(|| Contribution::new("free action", FREE_ACTION_BONUS))
}

/// Bonus when a certain wanderer would be bound to this job.
pub fn wanderer_ready(input: &RuleInput<'_>) -> Option<Contribution> {
    let wanderer = input.preview.wanderer()?;
    is_certain(wanderer, input.ctx)
        .then(|| Contribution::new(format!("wanderer ready ({})", wanderer.name), WANDERER_READY_BONUS))
}

pub fn banish_readiness(input: &RuleInput<'_>) -> Option<Contribution> {
    let wants_banish = input
        .job
        .combat
        .banish_targets()
        .any(|opponent| !input.ctx.is_banished(opponent));
    if !wants_banish {
        return None;
    }
    Some(match input.preview.banish() {
        Some(banish) => Contribution::new(format!("banish ready ({})", banish.name), BANISH_READY_BONUS),
        None => Contribution::new("no banish available", NO_BANISH_PENALTY),
    })
}

pub fn guaranteed_kill_readiness(input: &RuleInput<'_>) -> Option<Contribution> {
    if !input.job.combat.uses(&Strategy::KillGuaranteed) {
        return None;
    }
    Some(match input.preview.guaranteed_kill() {
        Some(kill) => Contribution::new(
            format!("guaranteed kill ready ({})", kill.name),
            GUARANTEED_KILL_READY_BONUS,
        ),
        None => Contribution::new("no guaranteed kill available", NO_GUARANTEED_KILL_PENALTY),
    })
}

/// Desired combat rate against the one currently active.
pub fn mood(input: &RuleInput<'_>) -> Option<Contribution> {
    let desired = input.job.combat_rate?;
    let active = input.ctx.world.combat_rate()?;
    Some(if desired == active {
        Contribution::new(format!("{active} combat rate matches"), MOOD_MATCH_BONUS)
    } else {
        Contribution::new(
            format!("{active} combat rate conflicts with {desired}"),
            MOOD_CONFLICT_PENALTY,
        )
    })
}

/// Looks at the predicted next opponent at the job's location.
pub fn prediction(input: &RuleInput<'_>) -> Option<Contribution> {
    let location = input.job.location()?;
    let predicted = input.ctx.predicted(location)?;

    if input.ctx.special_targets(location).contains(&predicted) {
        return Some(Contribution::new(
            format!("{predicted} predicted (special target)"),
            SPECIAL_TARGET_BONUS,
        ));
    }

    let unwanted = match input.job.combat.strategy_for(&predicted) {
        Strategy::Ignore | Strategy::IgnoreUnlessBanished | Strategy::Abort => true,
        Strategy::Banish => input.preview.banish().is_none(),
        Strategy::Kill | Strategy::KillGuaranteed | Strategy::KillHard | Strategy::Custom(_) => {
            false
        }
    };
    unwanted.then(|| {
        Contribution::new(
            format!("{predicted} predicted (unwanted)"),
            UNWANTED_OPPONENT_PENALTY,
        )
    })
}

/// Penalty for spending a turn elsewhere while a certain wanderer is ready.
pub fn wasted_wanderer(input: &RuleInput<'_>) -> Option<Contribution> {
    let wanderer = input.idle_wanderer?;
    let wasted = input.ctx.options.wanderers
        && is_certain(wanderer, input.ctx)
        && !input.job.accepts_wanderers
        && !input.job.is_free_action(input.ctx);
    wasted.then(|| {
        Contribution::new(
            format!("would waste wanderer ({})", wanderer.name),
            WASTED_WANDERER_PENALTY,
        )
    })
}
