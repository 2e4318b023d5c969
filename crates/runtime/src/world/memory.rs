//! A deterministic in-memory [`World`].

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use plan_core::combat::run;
use plan_core::{
    ActorProfile, CombatRate, Encounter, FightOutcome, Item, Loadout, Location, Macro, Opponent,
    OpponentStats, Skill, TriggeredAbility, World, WorldError,
};
use tracing::{debug, trace};

use crate::world::fight::{Combatant, Fight};
use crate::world::seed::{
    LocationSpec, OpponentSpec, ScriptedEncounter, Technique, WandererSpec, WorldSeed,
};

/// Simulated game state built from a [`WorldSeed`].
///
/// Locations hand out their scripted encounters in a cycle, skipping fights
/// against banished opponents. Fights execute the compiled script round by
/// round through [`plan_core::combat::run`]. Nothing is random.
#[derive(Debug)]
pub struct MemoryWorld {
    counters: BTreeMap<String, i64>,
    items: BTreeMap<Item, u32>,
    skills: Vec<Skill>,
    actor: ActorProfile,
    health: i32,
    meat: u32,
    shop: BTreeMap<Item, u32>,
    techniques: BTreeMap<String, Technique>,
    opponents: BTreeMap<Opponent, OpponentSpec>,
    locations: BTreeMap<Location, LocationSpec>,
    wanderers: Vec<WandererSpec>,
    combat_rate: Option<CombatRate>,
    rate_effects: BTreeMap<String, CombatRate>,

    equipped: Vec<Item>,
    effects: BTreeSet<String>,
    choices: BTreeMap<u32, u32>,
    turns: HashMap<Location, u32>,
    total_turns: u32,
    cursors: HashMap<Location, usize>,
    pending: VecDeque<ScriptedEncounter>,
    triggered: Vec<TriggeredAbility>,
    defeated: BTreeSet<Opponent>,
}

impl MemoryWorld {
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            counters: seed.counters,
            items: seed.items,
            skills: seed.skills,
            actor: seed.actor,
            health: seed.health,
            meat: seed.meat,
            shop: seed.shop,
            techniques: seed.techniques,
            opponents: seed.opponents,
            locations: seed.locations,
            wanderers: seed.wanderers,
            combat_rate: seed.combat_rate,
            rate_effects: seed.rate_effects,
            equipped: Vec::new(),
            effects: BTreeSet::new(),
            choices: BTreeMap::new(),
            turns: HashMap::new(),
            total_turns: 0,
            cursors: HashMap::new(),
            pending: VecDeque::new(),
            triggered: Vec::new(),
            defeated: BTreeSet::new(),
        }
    }

    pub fn equipped(&self) -> &[Item] {
        &self.equipped
    }

    pub fn choice(&self, choice: u32) -> Option<u32> {
        self.choices.get(&choice).copied()
    }

    pub fn has_effect(&self, effect: &str) -> bool {
        self.effects.contains(effect)
    }

    pub fn total_turns(&self) -> u32 {
        self.total_turns
    }

    pub fn meat(&self) -> u32 {
        self.meat
    }

    fn is_banished(&self, opponent: &Opponent) -> bool {
        self.triggered.iter().any(|t| &t.target == opponent)
    }

    fn is_skipped(&self, encounter: &ScriptedEncounter) -> bool {
        encounter
            .lead_opponent()
            .is_some_and(|opponent| self.is_banished(opponent))
    }

    /// Position of the next scripted encounter at a location, if any entry
    /// is not skipped.
    fn next_position(&self, location: &Location) -> Option<usize> {
        let spec = self.locations.get(location)?;
        let len = spec.encounters.len();
        let start = self.cursors.get(location).copied().unwrap_or(0);
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&position| !self.is_skipped(&spec.encounters[position]))
    }

    fn wanderer_due(&self) -> Option<Opponent> {
        self.wanderers
            .iter()
            .find(|wanderer| {
                self.equipped.contains(&wanderer.item)
                    && self.total_turns % wanderer.interval.max(1) == 0
            })
            .map(|wanderer| wanderer.opponent.clone())
    }

    fn add_counter(&mut self, name: &str, delta: i64) {
        *self.counters.entry(name.to_owned()).or_default() += delta;
    }

    fn resolve(
        &mut self,
        encounter: ScriptedEncounter,
        script: &Macro,
    ) -> Result<Encounter, WorldError> {
        match encounter {
            ScriptedEncounter::Fight(opponent) => self.fight(opponent, script),
            ScriptedEncounter::Adventure { name, counters } => {
                for (counter, delta) in &counters {
                    self.add_counter(counter, *delta);
                }
                Ok(Encounter::non_combat(name))
            }
            ScriptedEncounter::Chain(mut entries) => {
                if entries.is_empty() {
                    return Ok(Encounter::non_combat("an empty chain"));
                }
                let first = entries.remove(0);
                self.pending.extend(entries);
                self.resolve(first, script)
            }
        }
    }

    fn fight(&mut self, opponent: Opponent, script: &Macro) -> Result<Encounter, WorldError> {
        let spec = self
            .opponents
            .get(&opponent)
            .cloned()
            .ok_or_else(|| WorldError::new(format!("unknown opponent {opponent}")))?;

        let actor = Combatant {
            offense: self.actor.offense(),
            health: self.health,
            items: std::mem::take(&mut self.items),
            skills: self.skills.clone(),
            techniques: self.techniques.clone(),
        };
        let mut fight = Fight::new(opponent.clone(), &spec, actor);
        run(script, &mut fight);
        trace!(%opponent, rounds = fight.rounds(), "fight resolved");

        let outcome = fight.outcome();
        let banished_by = fight.banished_by().map(str::to_owned);
        let actor = fight.into_combatant();
        self.health = actor.health;
        self.items = actor.items;

        match &outcome {
            FightOutcome::Won => {
                for (counter, delta) in &spec.on_win {
                    self.add_counter(counter, *delta);
                }
                for item in &spec.drops {
                    *self.items.entry(item.clone()).or_default() += 1;
                }
                self.defeated.insert(opponent.clone());
            }
            FightOutcome::Banished => {
                if let Some(ability) = banished_by {
                    self.triggered.push(TriggeredAbility {
                        ability,
                        target: opponent.clone(),
                    });
                }
            }
            FightOutcome::Escaped | FightOutcome::Lost | FightOutcome::Aborted(_) => {}
        }
        debug!(%opponent, ?outcome, "fight");
        Ok(Encounter::combat(opponent, outcome))
    }
}

impl From<WorldSeed> for MemoryWorld {
    fn from(seed: WorldSeed) -> Self {
        Self::new(seed)
    }
}

impl World for MemoryWorld {
    fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    fn item_count(&self, item: &Item) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    fn has_skill(&self, skill: &Skill) -> bool {
        self.skills.contains(skill)
    }

    fn is_equipped(&self, item: &Item) -> bool {
        self.equipped.contains(item)
    }

    fn actor(&self) -> ActorProfile {
        self.actor
    }

    fn opponent_stats(&self, opponent: &Opponent) -> OpponentStats {
        self.opponents
            .get(opponent)
            .map(|spec| OpponentStats {
                defense: spec.defense,
                elemental_resistance: spec.elemental_resistance,
            })
            .unwrap_or_default()
    }

    fn turns_spent(&self, location: &Location) -> u32 {
        self.turns.get(location).copied().unwrap_or(0)
    }

    fn location_opponents(&self, location: &Location) -> Vec<Opponent> {
        self.locations
            .get(location)
            .map(LocationSpec::opponents)
            .unwrap_or_default()
    }

    fn predict_opponent(&self, location: &Location) -> Option<Opponent> {
        let position = self.next_position(location)?;
        self.locations.get(location)?.encounters[position]
            .lead_opponent()
            .cloned()
    }

    fn triggered_abilities(&self) -> Vec<TriggeredAbility> {
        self.triggered.clone()
    }

    fn special_targets(&self, location: &Location) -> Vec<Opponent> {
        self.locations
            .get(location)
            .map(|spec| {
                spec.special_targets
                    .iter()
                    .filter(|target| !self.defeated.contains(*target))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn combat_rate(&self) -> Option<CombatRate> {
        self.combat_rate
    }

    fn is_incapacitated(&self) -> bool {
        self.health <= 0
    }

    fn set_counter(&mut self, name: &str, value: i64) -> Result<(), WorldError> {
        self.counters.insert(name.to_owned(), value);
        Ok(())
    }

    fn set_choice(&mut self, choice: u32, option: u32) -> Result<(), WorldError> {
        self.choices.insert(choice, option);
        Ok(())
    }

    fn equip(&mut self, loadout: &Loadout) -> Result<(), WorldError> {
        if let Some((_, missing)) = loadout.iter().find(|(_, item)| self.item_count(item) == 0) {
            return Err(WorldError::new(format!("cannot equip {missing}: none owned")));
        }
        self.equipped = loadout.iter().map(|(_, item)| item.clone()).collect();
        Ok(())
    }

    fn acquire(
        &mut self,
        item: &Item,
        quantity: u32,
        max_price: Option<u32>,
    ) -> Result<bool, WorldError> {
        let have = self.item_count(item);
        if have >= quantity {
            return Ok(true);
        }
        let Some(&price) = self.shop.get(item) else {
            return Ok(false);
        };
        if max_price.is_some_and(|ceiling| price > ceiling) {
            return Ok(false);
        }
        let cost = price.saturating_mul(quantity - have);
        if cost > self.meat {
            return Ok(false);
        }
        self.meat -= cost;
        self.items.insert(item.clone(), quantity);
        debug!(%item, quantity, cost, "bought");
        Ok(true)
    }

    fn apply_effect(&mut self, effect: &str) -> Result<(), WorldError> {
        if let Some(rate) = self.rate_effects.get(effect) {
            self.combat_rate = Some(*rate);
        }
        self.effects.insert(effect.to_owned());
        Ok(())
    }

    fn visit(&mut self, location: &Location, script: &Macro) -> Result<Encounter, WorldError> {
        let spec_len = self
            .locations
            .get(location)
            .map(|spec| spec.encounters.len())
            .ok_or_else(|| WorldError::new(format!("unknown location {location}")))?;

        *self.turns.entry(location.clone()).or_default() += 1;
        self.total_turns += 1;

        if let Some(opponent) = self.wanderer_due() {
            debug!(%location, %opponent, "wanderer appears");
            return self.fight(opponent, script);
        }

        let Some(position) = self.next_position(location) else {
            return Ok(Encounter::non_combat("an empty room"));
        };
        self.cursors.insert(location.clone(), (position + 1) % spec_len);
        let encounter = self.locations[location].encounters[position].clone();
        self.resolve(encounter, script)
    }

    fn resolve_pending(&mut self, script: &Macro) -> Result<Option<Encounter>, WorldError> {
        match self.pending.pop_front() {
            Some(encounter) => self.resolve(encounter, script).map(Some),
            None => Ok(None),
        }
    }
}
