//! Serializable description of an in-memory world.
//!
//! A seed is typically written as `world.ron` next to the job catalog:
//!
//! ```text
//! (
//!     actor: (muscle: 30, mysticality: 10, moxie: 10, weapon: melee),
//!     skills: ["Snokebomb"],
//!     techniques: { "Snokebomb": banish },
//!     opponents: { "goblin": (defense: 10, hp: 20, on_win: [("quest.cave", 1)]) },
//!     locations: { "cave": (encounters: [fight("goblin"), adventure(name: "A Quiet Room")]) },
//! )
//! ```

use std::collections::BTreeMap;

use plan_core::{ActorProfile, CombatRate, Item, Location, Opponent, Skill};
use serde::{Deserialize, Serialize};

/// Starting health when a seed does not say otherwise.
pub const DEFAULT_HEALTH: i32 = 100;

/// What a skill or usable item does in a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    /// Deals offense plus the bonus, minus the opponent's defense.
    Damage(i32),
    /// Lowers the opponent's defense for the rest of the fight.
    Delevel(i32),
    /// Ends the fight and banishes the opponent from future encounters.
    Banish,
    /// Ends the fight with a win.
    Kill,
    /// Ends the fight with an escape.
    Escape,
}

/// Stats and rewards of one opponent type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentSpec {
    pub defense: i32,
    pub hp: i32,
    /// Damage dealt to the actor each round the opponent survives.
    pub attack: i32,
    pub elemental_resistance: u32,
    pub drops: Vec<Item>,
    /// Counter increments applied on a win.
    pub on_win: Vec<(String, i64)>,
}

/// One entry in a location's encounter cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedEncounter {
    Fight(Opponent),
    /// A non-combat adventure, optionally moving counters.
    Adventure {
        name: String,
        #[serde(default)]
        counters: Vec<(String, i64)>,
    },
    /// The first entry resolves on the visit; the rest become pending.
    Chain(Vec<ScriptedEncounter>),
}

impl ScriptedEncounter {
    pub fn fight(opponent: impl Into<Opponent>) -> Self {
        Self::Fight(opponent.into())
    }

    pub fn adventure(name: impl Into<String>) -> Self {
        Self::Adventure {
            name: name.into(),
            counters: Vec::new(),
        }
    }

    /// The opponent this entry leads with, if it is a fight.
    pub fn lead_opponent(&self) -> Option<&Opponent> {
        match self {
            Self::Fight(opponent) => Some(opponent),
            Self::Adventure { .. } => None,
            Self::Chain(entries) => entries.first().and_then(Self::lead_opponent),
        }
    }

    fn collect_opponents<'a>(&'a self, out: &mut Vec<&'a Opponent>) {
        match self {
            Self::Fight(opponent) => out.push(opponent),
            Self::Adventure { .. } => {}
            Self::Chain(entries) => entries.iter().for_each(|entry| entry.collect_opponents(out)),
        }
    }
}

/// A location's encounter cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSpec {
    /// Visited in order, wrapping around; banished fights are skipped.
    pub encounters: Vec<ScriptedEncounter>,
    /// Opponents that need special handling until first defeated.
    pub special_targets: Vec<Opponent>,
}

impl LocationSpec {
    /// Every opponent that can appear here, in first-appearance order.
    pub fn opponents(&self) -> Vec<Opponent> {
        let mut all = Vec::new();
        for encounter in &self.encounters {
            encounter.collect_opponents(&mut all);
        }
        let mut unique: Vec<Opponent> = Vec::new();
        for opponent in all {
            if !unique.contains(opponent) {
                unique.push(opponent.clone());
            }
        }
        unique
    }
}

/// An equipped item that replaces location encounters with its own opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WandererSpec {
    pub item: Item,
    pub opponent: Opponent,
    /// Fires on every n-th turn of the run.
    #[serde(default = "every_turn")]
    pub interval: u32,
}

fn every_turn() -> u32 {
    1
}

/// Full starting state of a [`crate::MemoryWorld`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldSeed {
    pub counters: BTreeMap<String, i64>,
    pub items: BTreeMap<Item, u32>,
    pub skills: Vec<Skill>,
    pub actor: ActorProfile,
    pub health: i32,
    /// Money available for purchases.
    pub meat: u32,
    /// Unit prices of purchasable items.
    pub shop: BTreeMap<Item, u32>,
    /// Fight behavior of skills and usable items, by name. Unlisted skills
    /// deal plain damage.
    pub techniques: BTreeMap<String, Technique>,
    pub opponents: BTreeMap<Opponent, OpponentSpec>,
    pub locations: BTreeMap<Location, LocationSpec>,
    pub wanderers: Vec<WandererSpec>,
    pub combat_rate: Option<CombatRate>,
    /// Effects that change the active combat rate when applied.
    pub rate_effects: BTreeMap<String, CombatRate>,
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self {
            counters: BTreeMap::new(),
            items: BTreeMap::new(),
            skills: Vec::new(),
            actor: ActorProfile::default(),
            health: DEFAULT_HEALTH,
            meat: 0,
            shop: BTreeMap::new(),
            techniques: BTreeMap::new(),
            opponents: BTreeMap::new(),
            locations: BTreeMap::new(),
            wanderers: Vec::new(),
            combat_rate: None,
            rate_effects: BTreeMap::new(),
        }
    }
}

impl WorldSeed {
    pub fn with_counter(mut self, name: &str, value: i64) -> Self {
        self.counters.insert(name.to_owned(), value);
        self
    }

    pub fn with_item(mut self, item: &str, count: u32) -> Self {
        self.items.insert(item.into(), count);
        self
    }

    pub fn with_skill(mut self, skill: &str, technique: Technique) -> Self {
        self.skills.push(skill.into());
        self.techniques.insert(skill.to_owned(), technique);
        self
    }

    pub fn with_usable(mut self, item: &str, technique: Technique) -> Self {
        self.techniques.insert(item.to_owned(), technique);
        self
    }

    pub fn with_actor(mut self, actor: ActorProfile) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_opponent(mut self, opponent: &str, spec: OpponentSpec) -> Self {
        self.opponents.insert(opponent.into(), spec);
        self
    }

    pub fn with_location(mut self, location: &str, encounters: Vec<ScriptedEncounter>) -> Self {
        self.locations.entry(location.into()).or_default().encounters = encounters;
        self
    }

    pub fn with_special_target(mut self, location: &str, opponent: &str) -> Self {
        self.locations
            .entry(location.into())
            .or_default()
            .special_targets
            .push(opponent.into());
        self
    }

    pub fn with_price(mut self, item: &str, price: u32) -> Self {
        self.shop.insert(item.into(), price);
        self
    }

    pub fn with_meat(mut self, meat: u32) -> Self {
        self.meat = meat;
        self
    }

    pub fn with_wanderer(mut self, item: &str, opponent: &str, interval: u32) -> Self {
        self.wanderers.push(WandererSpec {
            item: item.into(),
            opponent: opponent.into(),
            interval,
        });
        self
    }
}
