//! Declarative side effects.

use serde::{Deserialize, Serialize};

use plan_core::{Item, Procedure, World, WorldError};

use super::condition::PULLS_USED_COUNTER;

/// A side effect against the world, as written in catalog files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureSpec {
    SetCounter(String, i64),
    AddCounter(String, i64),
    Acquire {
        item: Item,
        #[serde(default = "one")]
        quantity: u32,
        #[serde(default)]
        max_price: Option<u32>,
    },
    /// Takes one item out of storage and books it against the pull budget.
    Pull(Item),
    ApplyEffect(String),
    /// Runs each procedure in order, stopping at the first failure.
    Seq(Vec<ProcedureSpec>),
}

fn one() -> u32 {
    1
}

impl ProcedureSpec {
    pub fn run(&self, world: &mut dyn World) -> Result<(), WorldError> {
        match self {
            Self::SetCounter(name, value) => world.set_counter(name, *value),
            Self::AddCounter(name, delta) => {
                let value = world.counter(name) + delta;
                world.set_counter(name, value)
            }
            Self::Acquire {
                item,
                quantity,
                max_price,
            } => {
                if world.acquire(item, *quantity, *max_price)? {
                    Ok(())
                } else {
                    Err(WorldError::new(format!("could not acquire {quantity} {item}")))
                }
            }
            Self::Pull(item) => {
                let wanted = world.item_count(item) + 1;
                if !world.acquire(item, wanted, None)? {
                    return Err(WorldError::new(format!("could not pull {item}")));
                }
                let used = world.counter(PULLS_USED_COUNTER) + 1;
                world.set_counter(PULLS_USED_COUNTER, used)
            }
            Self::ApplyEffect(effect) => world.apply_effect(effect),
            Self::Seq(steps) => steps.iter().try_for_each(|step| step.run(world)),
        }
    }

    /// Turns the spec into a boxed procedure.
    pub fn build(self) -> Procedure {
        Box::new(move |world| self.run(world))
    }
}
