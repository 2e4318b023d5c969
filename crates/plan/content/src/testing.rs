//! A minimal world for exercising built conditions and procedures.

use std::collections::{HashMap, HashSet};

use plan_core::{
    ActorProfile, CombatRate, Encounter, Item, Loadout, Location, Macro, Opponent, OpponentStats,
    Skill, TriggeredAbility, World, WorldError,
};

#[derive(Debug, Default)]
pub struct MapWorld {
    counters: HashMap<String, i64>,
    items: HashMap<Item, u32>,
    refused: HashSet<Item>,
}

impl MapWorld {
    pub fn with_counter(mut self, name: &str, value: i64) -> Self {
        self.counters.insert(name.to_owned(), value);
        self
    }

    /// Makes every acquisition of `item` fail.
    pub fn refusing(mut self, item: &str) -> Self {
        self.refused.insert(item.into());
        self
    }
}

impl World for MapWorld {
    fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    fn item_count(&self, item: &Item) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    fn has_skill(&self, _skill: &Skill) -> bool {
        false
    }

    fn is_equipped(&self, _item: &Item) -> bool {
        false
    }

    fn actor(&self) -> ActorProfile {
        ActorProfile::default()
    }

    fn opponent_stats(&self, _opponent: &Opponent) -> OpponentStats {
        OpponentStats::default()
    }

    fn turns_spent(&self, _location: &Location) -> u32 {
        0
    }

    fn location_opponents(&self, _location: &Location) -> Vec<Opponent> {
        Vec::new()
    }

    fn predict_opponent(&self, _location: &Location) -> Option<Opponent> {
        None
    }

    fn triggered_abilities(&self) -> Vec<TriggeredAbility> {
        Vec::new()
    }

    fn special_targets(&self, _location: &Location) -> Vec<Opponent> {
        Vec::new()
    }

    fn combat_rate(&self) -> Option<CombatRate> {
        None
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
        if self.refused.contains(item) {
            return Ok(false);
        }
        let count = self.items.entry(item.clone()).or_default();
        *count = (*count).max(quantity);
        Ok(true)
    }

    fn apply_effect(&mut self, _effect: &str) -> Result<(), WorldError> {
        Ok(())
    }

    fn visit(&mut self, _location: &Location, _script: &Macro) -> Result<Encounter, WorldError> {
        Ok(Encounter::non_combat("nothing happens"))
    }

    fn resolve_pending(&mut self, _script: &Macro) -> Result<Option<Encounter>, WorldError> {
        Ok(None)
    }
}
