//! Shared builders for the engine integration tests.
#![allow(dead_code)]

use plan_core::{ActorProfile, CombatKit, PlanContext, WeaponCategory};
use runtime::{OpponentSpec, ScriptedEncounter, Technique, WorldSeed};

/// Completion predicate: the counter reached the value.
pub fn reached(counter: &'static str, value: i64) -> impl Fn(&PlanContext<'_>) -> bool + 'static {
    move |ctx| ctx.counter(counter) >= value
}

/// A kit without the delevel chain, so scripts stay short.
pub fn quiet_kit() -> CombatKit {
    CombatKit {
        delevel: Vec::new(),
        ..CombatKit::default()
    }
}

/// Armed actor with 30 offense and both hard-kill skills.
pub fn seed() -> WorldSeed {
    WorldSeed::default()
        .with_actor(ActorProfile {
            muscle: 30,
            mysticality: 30,
            moxie: 10,
            weapon: WeaponCategory::Melee,
        })
        .with_skill("Saucegeyser", Technique::Damage(40))
        .with_skill("Lunging Thrust-Smack", Technique::Damage(40))
}

/// A non-combat adventure that bumps one counter.
pub fn progress(name: &str, counter: &str) -> ScriptedEncounter {
    ScriptedEncounter::Adventure {
        name: name.to_owned(),
        counters: vec![(counter.to_owned(), 1)],
    }
}

/// A weak opponent that bumps a counter when defeated.
pub fn weakling(counter: &str) -> OpponentSpec {
    OpponentSpec {
        hp: 10,
        on_win: vec![(counter.to_owned(), 1)],
        ..OpponentSpec::default()
    }
}
