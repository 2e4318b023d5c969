//! Round-by-round fight resolution for the in-memory world.

use std::collections::BTreeMap;

use plan_core::combat::{CombatRound, MAX_ROUNDS, RoundAction, RoundResult};
use plan_core::{FightOutcome, Item, Opponent, OpponentStats, Skill};

use crate::world::seed::{OpponentSpec, Technique};

/// The actor's side of a fight.
///
/// Moved into a [`Fight`] and handed back afterwards with health lost and
/// usable items spent.
#[derive(Clone, Debug, Default)]
pub struct Combatant {
    pub offense: i32,
    pub health: i32,
    pub items: BTreeMap<Item, u32>,
    pub skills: Vec<Skill>,
    pub techniques: BTreeMap<String, Technique>,
}

/// One fight in progress.
pub struct Fight {
    opponent: Opponent,
    hp: i32,
    defense: i32,
    attack: i32,
    elemental_resistance: u32,
    actor: Combatant,
    rounds: u32,
    outcome: Option<FightOutcome>,
    /// Name of the action that banished the opponent.
    banished_by: Option<String>,
}

impl Fight {
    pub fn new(opponent: Opponent, spec: &OpponentSpec, actor: Combatant) -> Self {
        Self {
            opponent,
            hp: spec.hp,
            defense: spec.defense,
            attack: spec.attack,
            elemental_resistance: spec.elemental_resistance,
            actor,
            rounds: 0,
            outcome: None,
            banished_by: None,
        }
    }

    /// Ends the fight, returning the actor's side.
    pub fn into_combatant(self) -> Combatant {
        self.actor
    }

    /// Final outcome. A script that ran out of actions mid-fight lost it.
    pub fn outcome(&self) -> FightOutcome {
        self.outcome.clone().unwrap_or(FightOutcome::Lost)
    }

    pub fn banished_by(&self) -> Option<&str> {
        self.banished_by.as_deref()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    fn end(&mut self, outcome: FightOutcome) -> RoundResult {
        self.outcome = Some(outcome);
        RoundResult::Ended
    }

    fn technique(&self, name: &str) -> Technique {
        self.actor
            .techniques
            .get(name)
            .copied()
            .unwrap_or(Technique::Damage(0))
    }

    /// Resolves the availability of an action and what it does.
    fn resolve(&mut self, action: &RoundAction) -> Option<(Technique, String)> {
        match action {
            RoundAction::Attack => Some((Technique::Damage(0), "attack".to_owned())),
            RoundAction::Skill(skill) => self
                .actor
                .skills
                .contains(skill)
                .then(|| (self.technique(skill.as_str()), skill.to_string())),
            RoundAction::Item(item) => {
                let count = self.actor.items.get_mut(item).filter(|count| **count > 0)?;
                *count -= 1;
                Some((self.technique(item.as_str()), item.to_string()))
            }
            RoundAction::Runaway => Some((Technique::Escape, "runaway".to_owned())),
        }
    }
}

impl CombatRound for Fight {
    fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    fn opponent_stats(&self) -> OpponentStats {
        OpponentStats {
            defense: self.defense,
            elemental_resistance: self.elemental_resistance,
        }
    }

    fn offense(&self) -> i32 {
        self.actor.offense
    }

    fn perform(&mut self, action: &RoundAction) -> RoundResult {
        if self.outcome.is_some() {
            return RoundResult::Ended;
        }
        let Some((technique, name)) = self.resolve(action) else {
            return RoundResult::Unavailable;
        };
        self.rounds += 1;

        match technique {
            Technique::Damage(bonus) => {
                self.hp -= (self.actor.offense + bonus - self.defense).max(1);
                if self.hp <= 0 {
                    return self.end(FightOutcome::Won);
                }
            }
            Technique::Delevel(amount) => self.defense -= amount,
            Technique::Banish => {
                self.banished_by = Some(name);
                return self.end(FightOutcome::Banished);
            }
            Technique::Kill => return self.end(FightOutcome::Won),
            Technique::Escape => return self.end(FightOutcome::Escaped),
        }

        self.actor.health -= self.attack;
        if self.actor.health <= 0 || self.rounds >= MAX_ROUNDS {
            return self.end(FightOutcome::Lost);
        }
        RoundResult::Continue
    }

    fn abort(&mut self, reason: &str) {
        if self.outcome.is_none() {
            self.outcome = Some(FightOutcome::Aborted(reason.to_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::Macro;
    use plan_core::combat::{Block, Condition, Step, run};

    fn actor() -> Combatant {
        Combatant {
            offense: 20,
            health: 100,
            items: BTreeMap::new(),
            skills: vec!["Snokebomb".into(), "Weaken".into()],
            techniques: BTreeMap::from([
                ("Snokebomb".to_owned(), Technique::Banish),
                ("Weaken".to_owned(), Technique::Delevel(5)),
                ("smoke bomb".to_owned(), Technique::Escape),
            ]),
        }
    }

    fn goblin() -> OpponentSpec {
        OpponentSpec {
            defense: 10,
            hp: 25,
            attack: 3,
            ..OpponentSpec::default()
        }
    }

    #[test]
    fn attacks_until_the_opponent_falls() {
        let mut script = Macro::new();
        script.push(Block::always(vec![Step::repeat(Step::Attack)]));

        let spec = goblin();
        let mut fight = Fight::new("goblin".into(), &spec, actor());
        run(&script, &mut fight);

        assert_eq!(fight.outcome(), FightOutcome::Won);
        assert_eq!(fight.rounds(), 3);
        assert_eq!(fight.into_combatant().health, 94);
    }

    #[test]
    fn delevel_lowers_defense() {
        let mut script = Macro::new();
        script.push(Block::always(vec![
            Step::attempt(Step::skill("Weaken")),
            Step::repeat(Step::Attack),
        ]));

        let spec = goblin();
        let mut fight = Fight::new("goblin".into(), &spec, actor());
        run(&script, &mut fight);

        assert_eq!(fight.outcome(), FightOutcome::Won);
        assert_eq!(fight.rounds(), 3);
    }

    #[test]
    fn banish_records_its_source() {
        let mut script = Macro::new();
        script.push(Block::new(
            Condition::Opponent("goblin".into()),
            vec![Step::skill("Snokebomb")],
        ));

        let spec = goblin();
        let mut fight = Fight::new("goblin".into(), &spec, actor());
        run(&script, &mut fight);

        assert_eq!(fight.outcome(), FightOutcome::Banished);
        assert_eq!(fight.banished_by(), Some("Snokebomb"));
    }

    #[test]
    fn missing_items_are_unavailable() {
        let mut script = Macro::new();
        script.push(Block::always(vec![
            Step::attempt(Step::item("smoke bomb")),
            Step::abort("no way out"),
        ]));

        let spec = goblin();
        let mut fight = Fight::new("goblin".into(), &spec, actor());
        run(&script, &mut fight);

        assert_eq!(fight.outcome(), FightOutcome::Aborted("no way out".into()));
    }

    #[test]
    fn usable_items_are_consumed() {
        let mut fighter = actor();
        fighter.items.insert("smoke bomb".into(), 1);
        let mut script = Macro::new();
        script.push(Block::always(vec![Step::item("smoke bomb")]));

        let spec = goblin();
        let mut fight = Fight::new("goblin".into(), &spec, fighter);
        run(&script, &mut fight);

        assert_eq!(fight.outcome(), FightOutcome::Escaped);
        assert_eq!(fight.into_combatant().items[&Item::from("smoke bomb")], 0);
    }

    #[test]
    fn script_without_a_finish_loses() {
        let mut script = Macro::new();
        script.push(Block::always(vec![Step::Attack]));

        let spec = OpponentSpec {
            hp: 100,
            ..goblin()
        };
        let mut fight = Fight::new("goblin".into(), &spec, actor());
        run(&script, &mut fight);

        assert_eq!(fight.outcome(), FightOutcome::Lost);
    }
}
