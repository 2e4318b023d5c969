//! Declarative world-state conditions.

use serde::{Deserialize, Serialize};

use plan_core::{Item, Location, Opponent, PlanContext, Predicate, Skill};

/// Counter tracking how many pulls this run has spent.
pub const PULLS_USED_COUNTER: &str = "pulls_used";

/// A condition over world state, as written in catalog files.
///
/// ```text
/// all([counter_at_least("quest.tower", 3), not(have_item("key"))])
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionSpec {
    #[default]
    Always,
    Never,
    CounterAtLeast(String, i64),
    CounterBelow(String, i64),
    /// At least one of the item.
    HaveItem(Item),
    ItemAtLeast(Item, u32),
    HaveSkill(Skill),
    TurnsAtLeast(Location, u32),
    Banished(Opponent),
    /// The run still has pulls left to spend.
    PullsRemaining,
    All(Vec<ConditionSpec>),
    Any(Vec<ConditionSpec>),
    Not(Box<ConditionSpec>),
}

impl ConditionSpec {
    pub fn evaluate(&self, ctx: &PlanContext<'_>) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::CounterAtLeast(name, value) => ctx.counter(name) >= *value,
            Self::CounterBelow(name, value) => ctx.counter(name) < *value,
            Self::HaveItem(item) => ctx.has_item(item),
            Self::ItemAtLeast(item, count) => ctx.item_count(item) >= *count,
            Self::HaveSkill(skill) => ctx.has_skill(skill),
            Self::TurnsAtLeast(location, turns) => ctx.turns_spent(location) >= *turns,
            Self::Banished(opponent) => ctx.is_banished(opponent),
            Self::PullsRemaining => i64::from(ctx.options.pulls) > ctx.counter(PULLS_USED_COUNTER),
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(ctx)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(ctx)),
            Self::Not(condition) => !condition.evaluate(ctx),
        }
    }

    /// Turns the condition into a boxed predicate.
    pub fn build(self) -> Predicate {
        Box::new(move |ctx| self.evaluate(ctx))
    }
}

