//! Lowering compiled scripts onto action-script nodes.
//!
//! A [`Macro`] is data; to run it against a fight it is lowered into a tree
//! of [`action_script`] nodes and ticked once with a [`CombatRound`]
//! context:
//!
//! - the whole script is a `Sequence` of `When(condition, Attempt(body))`
//!   blocks, so a body that stops on an unavailable step falls through to
//!   the next block
//! - each step becomes a leaf that performs one round action
//! - `Attempt` and `Repeat` steps map onto the decorators of the same name
//!
//! A fight that ends, or an abort, halts the tree immediately.

use action_script::builder::{attempt, repeat, sequence, when};
use action_script::{Behavior, Status};

use crate::combat::kit::needs_hard_kill;
use crate::combat::{Condition, Macro, Step};
use crate::names::{Item, Opponent, Skill};
use crate::world::OpponentStats;

/// Upper bound on loop iterations within one fight.
pub const MAX_ROUNDS: u32 = 30;

/// One round-level action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundAction {
    Attack,
    Skill(Skill),
    Item(Item),
    Runaway,
}

/// Result of performing a round action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundResult {
    /// The action happened and the fight goes on.
    Continue,
    /// The action could not be used (missing skill or item, no charges).
    Unavailable,
    /// The fight is over.
    Ended,
}

/// A fight in progress, as seen by a running script.
pub trait CombatRound {
    fn opponent(&self) -> &Opponent;

    /// The opponent's stats as they stand now, after any delevel.
    fn opponent_stats(&self) -> OpponentStats;

    /// Offense the actor attacks with.
    fn offense(&self) -> i32;

    fn perform(&mut self, action: &RoundAction) -> RoundResult;

    /// Records that the script aborted the fight.
    fn abort(&mut self, reason: &str);
}

struct Matches(Condition);

impl<C: CombatRound> Behavior<C> for Matches {
    fn tick(&self, ctx: &mut C) -> Status {
        let matched = match &self.0 {
            Condition::Outscales { min_resistance } => {
                let stats = ctx.opponent_stats();
                needs_hard_kill(stats.defense, ctx.offense())
                    && min_resistance.is_none_or(|min| stats.elemental_resistance >= min)
            }
            condition => condition.matches(ctx.opponent()),
        };
        if matched { Status::Success } else { Status::Failure }
    }
}

struct Act(RoundAction);

impl<C: CombatRound> Behavior<C> for Act {
    fn tick(&self, ctx: &mut C) -> Status {
        match ctx.perform(&self.0) {
            RoundResult::Continue => Status::Success,
            RoundResult::Unavailable => Status::Failure,
            RoundResult::Ended => Status::Halt,
        }
    }
}

struct Abort(String);

impl<C: CombatRound> Behavior<C> for Abort {
    fn tick(&self, ctx: &mut C) -> Status {
        ctx.abort(&self.0);
        Status::Halt
    }
}

fn lower_step<C: CombatRound + 'static>(step: &Step) -> Box<dyn Behavior<C>> {
    match step {
        Step::Attack => Box::new(Act(RoundAction::Attack)),
        Step::Skill(skill) => Box::new(Act(RoundAction::Skill(skill.clone()))),
        Step::Item(item) => Box::new(Act(RoundAction::Item(item.clone()))),
        Step::Runaway => Box::new(Act(RoundAction::Runaway)),
        Step::Abort(reason) => Box::new(Abort(reason.clone())),
        Step::Attempt(inner) => attempt(lower_step(inner)),
        Step::Repeat(inner) => repeat(lower_step(inner), MAX_ROUNDS),
    }
}

/// Lowers a script into an executable node tree.
pub fn lower<C: CombatRound + 'static>(script: &Macro) -> Box<dyn Behavior<C>> {
    sequence(
        script
            .blocks()
            .iter()
            .map(|block| {
                let body = attempt(sequence(block.steps.iter().map(lower_step::<C>).collect()));
                match block.when {
                    Condition::Always => body,
                    ref condition => when(Box::new(Matches(condition.clone())), body),
                }
            })
            .collect(),
    )
}

/// Lowers and runs a script against one fight.
///
/// Returns `Halt` if the fight ended (or aborted) while the script ran, and
/// `Success` if every block ran or fell through with the fight still going.
pub fn run<C: CombatRound + 'static>(script: &Macro, round: &mut C) -> Status {
    lower::<C>(script).tick(round)
}
