//! Test doubles for unit tests.

use std::collections::{HashMap, HashSet};

use crate::cache::WorldCache;
use crate::combat::Macro;
use crate::context::PlanContext;
use crate::error::WorldError;
use crate::loadout::Loadout;
use crate::names::{Item, Location, Opponent, Skill};
use crate::options::RunOptions;
use crate::world::{
    ActorProfile, CombatRate, Encounter, OpponentStats, TriggeredAbility, World,
};

/// A world whose answers are set up front.
#[derive(Debug, Default)]
pub struct StubWorld {
    counters: HashMap<String, i64>,
    items: HashMap<Item, u32>,
    skills: HashSet<Skill>,
    actor: ActorProfile,
    stats: HashMap<Opponent, OpponentStats>,
    turns: HashMap<Location, u32>,
    location_opponents: HashMap<Location, Vec<Opponent>>,
    predictions: HashMap<Location, Opponent>,
    triggered: Vec<TriggeredAbility>,
    special: HashMap<Location, Vec<Opponent>>,
    combat_rate: Option<CombatRate>,
}

impl StubWorld {
    pub fn with_counter(mut self, name: &str, value: i64) -> Self {
        self.counters.insert(name.to_owned(), value);
        self
    }

    pub fn with_item(mut self, item: &str, count: u32) -> Self {
        self.items.insert(item.into(), count);
        self
    }

    pub fn with_skill(mut self, skill: &str) -> Self {
        self.skills.insert(skill.into());
        self
    }

    pub fn with_actor(mut self, actor: ActorProfile) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_stats(mut self, opponent: &str, defense: i32, elemental_resistance: u32) -> Self {
        self.stats.insert(
            opponent.into(),
            OpponentStats {
                defense,
                elemental_resistance,
            },
        );
        self
    }

    pub fn with_turns(mut self, location: &str, turns: u32) -> Self {
        self.turns.insert(location.into(), turns);
        self
    }

    pub fn with_location_opponents(mut self, location: &str, opponents: &[&str]) -> Self {
        self.location_opponents.insert(
            location.into(),
            opponents.iter().map(|o| Opponent::from(*o)).collect(),
        );
        self
    }

    pub fn with_prediction(mut self, location: &str, opponent: &str) -> Self {
        self.predictions.insert(location.into(), opponent.into());
        self
    }

    pub fn with_triggered(mut self, ability: &str, target: &str) -> Self {
        self.triggered.push(TriggeredAbility {
            ability: ability.to_owned(),
            target: target.into(),
        });
        self
    }

    pub fn with_special_target(mut self, location: &str, opponent: &str) -> Self {
        self.special
            .entry(location.into())
            .or_default()
            .push(opponent.into());
        self
    }

    pub fn with_combat_rate(mut self, rate: CombatRate) -> Self {
        self.combat_rate = Some(rate);
        self
    }

    /// A fresh cache and default options borrowing this world.
    pub fn harness(&self) -> Harness<'_> {
        Harness {
            world: self,
            cache: WorldCache::new(),
            options: RunOptions::default(),
        }
    }
}

/// Owns the cache and options a [`PlanContext`] borrows.
pub struct Harness<'w> {
    pub world: &'w StubWorld,
    pub cache: WorldCache,
    pub options: RunOptions,
}

impl Harness<'_> {
    pub fn context(&self) -> PlanContext<'_> {
        PlanContext::new(self.world, &self.cache, &self.options)
    }

    pub fn without_wanderers(mut self) -> Self {
        self.options.wanderers = false;
        self
    }
}

impl World for StubWorld {
    fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    fn item_count(&self, item: &Item) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    fn has_skill(&self, skill: &Skill) -> bool {
        self.skills.contains(skill)
    }

    fn is_equipped(&self, _item: &Item) -> bool {
        false
    }

    fn actor(&self) -> ActorProfile {
        self.actor
    }

    fn opponent_stats(&self, opponent: &Opponent) -> OpponentStats {
        self.stats.get(opponent).copied().unwrap_or_default()
    }

    fn turns_spent(&self, location: &Location) -> u32 {
        self.turns.get(location).copied().unwrap_or(0)
    }

    fn location_opponents(&self, location: &Location) -> Vec<Opponent> {
        self.location_opponents.get(location).cloned().unwrap_or_default()
    }

    fn predict_opponent(&self, location: &Location) -> Option<Opponent> {
        self.predictions.get(location).cloned()
    }

    fn triggered_abilities(&self) -> Vec<TriggeredAbility> {
        self.triggered.clone()
    }

    fn special_targets(&self, location: &Location) -> Vec<Opponent> {
        self.special.get(location).cloned().unwrap_or_default()
    }

    fn combat_rate(&self) -> Option<CombatRate> {
        self.combat_rate
    }

    fn is_incapacitated(&self) -> bool {
        false
    }

    fn set_counter(&mut self, name: &str, value: i64) -> Result<(), WorldError> {
        self.counters.insert(name.to_owned(), value);
        Ok(())
    }

    fn set_choice(&mut self, _choice: u32, _option: u32) -> Result<(), WorldError> {
        Ok(())
    }

    fn equip(&mut self, _loadout: &Loadout) -> Result<(), WorldError> {
        Ok(())
    }

    fn acquire(
        &mut self,
        item: &Item,
        quantity: u32,
        _max_price: Option<u32>,
    ) -> Result<bool, WorldError> {
        let count = self.items.entry(item.clone()).or_default();
        *count = (*count).max(quantity);
        Ok(true)
    }

    fn apply_effect(&mut self, _effect: &str) -> Result<(), WorldError> {
        Ok(())
    }

    fn visit(&mut self, location: &Location, _script: &Macro) -> Result<Encounter, WorldError> {
        *self.turns.entry(location.clone()).or_default() += 1;
        Ok(Encounter::non_combat("nothing happens"))
    }

    fn resolve_pending(&mut self, _script: &Macro) -> Result<Option<Encounter>, WorldError> {
        Ok(None)
    }
}
