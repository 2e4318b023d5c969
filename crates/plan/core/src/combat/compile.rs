//! Combat-policy compiler.
//!
//! Turns a job's abstract [`CombatPolicy`] and this step's [`Bindings`] into
//! an executable [`Macro`]. Blocks are emitted in a fixed order:
//!
//! 1. one hard-kill block per opponent a bound wanderer brings
//! 2. named opponents, in declaration order
//! 3. the literal default script, if any
//! 4. the default strategy, preceded by per-opponent blocks for expected
//!    opponents whose resolution differs from the generic one
//!
//! Strategy resolution is a total match over [`Strategy`]. Strategies that
//! need a resource degrade to an abort step when none was bound; the abort
//! is only fatal if that block actually runs.

use tracing::{debug, warn};

use crate::combat::kit::needs_hard_kill;
use crate::combat::{Block, CombatKit, CombatPolicy, Condition, Macro, Step, Strategy};
use crate::names::{Location, Opponent};
use crate::resource::Bindings;
use crate::world::{ActorProfile, OpponentStats, World};

/// What the compiler knows about who might be fought.
pub struct OpponentContext<'a> {
    world: &'a dyn World,
    actor: ActorProfile,
    expected: Vec<Opponent>,
}

impl<'a> OpponentContext<'a> {
    /// Reads the actor and the opponents expected at a location.
    pub fn new(world: &'a dyn World, location: Option<&Location>) -> Self {
        Self {
            world,
            actor: world.actor(),
            expected: location
                .map(|location| world.location_opponents(location))
                .unwrap_or_default(),
        }
    }

    pub fn actor(&self) -> &ActorProfile {
        &self.actor
    }

    pub fn expected(&self) -> &[Opponent] {
        &self.expected
    }

    pub fn stats(&self, opponent: &Opponent) -> OpponentStats {
        self.world.opponent_stats(opponent)
    }
}

struct Resolver<'c> {
    bindings: &'c Bindings<'c>,
    opponents: &'c OpponentContext<'c>,
    boss: bool,
    kit: &'c CombatKit,
}

impl Resolver<'_> {
    fn delevel(&self) -> Vec<Step> {
        self.kit.delevel_steps().collect()
    }

    fn hard_kill(&self, opponent: Option<&Opponent>) -> Vec<Step> {
        let stats = opponent
            .map(|opponent| self.opponents.stats(opponent))
            .unwrap_or_default();
        self.hard_kill_against(&stats)
    }

    fn hard_kill_against(&self, stats: &OpponentStats) -> Vec<Step> {
        let skill = self.kit.hard_kill_skill(self.opponents.actor(), stats);

        let mut steps = self.delevel();
        steps.push(Step::repeat(Step::Skill(skill.clone())));
        steps
    }

    fn normal_kill(&self) -> Vec<Step> {
        let mut steps = self.delevel();
        steps.push(Step::repeat(Step::Attack));
        steps
    }

    fn resolve(&self, strategy: &Strategy, opponent: Option<&Opponent>) -> Vec<Step> {
        let target = opponent.map_or_else(|| "any opponent".to_owned(), ToString::to_string);

        match strategy {
            Strategy::Ignore | Strategy::IgnoreUnlessBanished => match self.bindings.escape() {
                Some(escape) => escape.steps.clone(),
                None => {
                    let mut steps: Vec<Step> =
                        self.kit.escape.iter().cloned().map(Step::attempt).collect();
                    steps.push(Step::repeat(Step::Attack));
                    steps
                }
            },
            Strategy::KillGuaranteed => match self.bindings.guaranteed_kill() {
                Some(kill) => {
                    let mut steps = self.delevel();
                    steps.extend(kill.steps.iter().cloned());
                    steps
                }
                None => {
                    warn!(%target, "no guaranteed kill bound; degrading to abort");
                    vec![Step::abort(format!("no guaranteed kill available for {target}"))]
                }
            },
            Strategy::Kill => {
                if let Some(kill) = self.bindings.guaranteed_kill()
                    && !self.boss
                {
                    let mut steps = self.delevel();
                    steps.extend(kill.steps.iter().cloned());
                    return steps;
                }
                let upgrade = opponent.is_some_and(|opponent| {
                    needs_hard_kill(self.opponents.stats(opponent).defense, self.opponents.actor().offense())
                });
                if upgrade {
                    debug!(%target, "defense outscales offense; using hard kill");
                    self.hard_kill(opponent)
                } else {
                    self.normal_kill()
                }
            }
            Strategy::KillHard => self.hard_kill(opponent),
            Strategy::Banish => match self.bindings.banish() {
                Some(banish) => banish.steps.clone(),
                None => {
                    warn!(%target, "no banish bound; degrading to abort");
                    vec![Step::abort(format!("no banish available for {target}"))]
                }
            },
            Strategy::Abort => vec![Step::abort(format!("unexpected fight against {target}"))],
            Strategy::Custom(steps) => steps.clone(),
        }
    }

    /// Blocks that upgrade a plain kill once the fight shows the opponent
    /// outscales the actor. Covers opponents nobody expected at compile time.
    fn outscaling_blocks(&self, strategy: &Strategy) -> Vec<Block> {
        let spends_guaranteed_kill = self.bindings.guaranteed_kill().is_some() && !self.boss;
        if *strategy != Strategy::Kill || spends_guaranteed_kill {
            return Vec::new();
        }

        let mut blocks = Vec::new();
        if self.opponents.actor().is_armed() {
            let resistant = OpponentStats {
                elemental_resistance: self.kit.resistance_threshold,
                ..OpponentStats::default()
            };
            blocks.push(Block::new(
                Condition::Outscales {
                    min_resistance: Some(self.kit.resistance_threshold),
                },
                self.hard_kill_against(&resistant),
            ));
        }
        blocks.push(Block::new(
            Condition::Outscales { min_resistance: None },
            self.hard_kill_against(&OpponentStats::default()),
        ));
        blocks
    }
}

/// Compiles a policy into an executable script.
///
/// # Arguments
///
/// * `policy` - The job's per-opponent strategies
/// * `bindings` - Resources bound to the job this step
/// * `opponents` - Actor profile and expected opponents
/// * `boss` - Whether the job is a boss fight (never spends guaranteed kills
///   on plain kills)
/// * `kit` - Skills used for delevel, hard kills and escapes
///
/// # Returns
///
/// The compiled script. It always contains a final `Always` block.
pub fn compile(
    policy: &CombatPolicy,
    bindings: &Bindings<'_>,
    opponents: &OpponentContext<'_>,
    boss: bool,
    kit: &CombatKit,
) -> Macro {
    let resolver = Resolver {
        bindings,
        opponents,
        boss,
        kit,
    };
    let mut script = Macro::new();

    let mut wanderers: Vec<&Opponent> = Vec::new();
    if let Some(wanderer) = bindings.wanderer() {
        for opponent in &wanderer.opponents {
            script.push(Block::new(
                Condition::Opponent(opponent.clone()),
                resolver.hard_kill(Some(opponent)),
            ));
            wanderers.push(opponent);
        }
    }

    for (opponent, strategy) in policy.entries() {
        script.push(Block::new(
            Condition::Opponent(opponent.clone()),
            resolver.resolve(strategy, Some(opponent)),
        ));
    }

    if let Some(steps) = policy.default_script() {
        script.push(Block::always(steps.to_vec()));
    }

    let default = policy.default_strategy();
    let generic = resolver.resolve(default, None);
    for opponent in opponents.expected() {
        if policy.is_named(opponent) || wanderers.contains(&opponent) {
            continue;
        }
        let specific = resolver.resolve(default, Some(opponent));
        if specific != generic {
            script.push(Block::new(Condition::Opponent(opponent.clone()), specific));
        }
    }
    for block in resolver.outscaling_blocks(default) {
        script.push(block);
    }
    script.push(Block::always(generic));

    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, ResourceCategory};
    use crate::testing::StubWorld;
    use crate::world::WeaponCategory;

    fn actor(muscle: i32) -> ActorProfile {
        ActorProfile {
            muscle,
            mysticality: 10,
            moxie: 10,
            weapon: WeaponCategory::Melee,
        }
    }

    fn last(steps: &[Step]) -> &Step {
        steps.last().unwrap()
    }

    #[test]
    fn banish_without_resource_aborts() {
        let world = StubWorld::default();
        let opponents = OpponentContext::new(&world, None);
        let policy = CombatPolicy::new().with("X", Strategy::Banish);

        let script = compile(&policy, &Bindings::none(), &opponents, false, &CombatKit::default());

        let steps = script.steps_for(&"X".into());
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_abort());
    }

    #[test]
    fn banish_with_resource_uses_its_script() {
        let world = StubWorld::default();
        let opponents = OpponentContext::new(&world, None);
        let banish = Resource::new("Snokebomb", ResourceCategory::Banish, vec![Step::skill("Snokebomb")]);
        let mut bindings = Bindings::none();
        bindings.bind(&banish);

        let policy = CombatPolicy::new().with("X", Strategy::Banish);
        let script = compile(&policy, &bindings, &opponents, false, &CombatKit::default());

        assert_eq!(script.steps_for(&"X".into()), &[Step::skill("Snokebomb")]);
    }

    #[test]
    fn hard_kill_boundary_selects_normal_attack() {
        let world = StubWorld::default()
            .with_actor(actor(50))
            .with_stats("even", 40, 0)
            .with_stats("tough", 41, 0);
        let opponents = OpponentContext::new(&world, None);
        let kit = CombatKit::default();
        let policy = CombatPolicy::new()
            .with("even", Strategy::Kill)
            .with("tough", Strategy::Kill);

        let script = compile(&policy, &Bindings::none(), &opponents, false, &kit);

        assert_eq!(last(script.steps_for(&"even".into())), &Step::repeat(Step::Attack));
        assert_eq!(
            last(script.steps_for(&"tough".into())),
            &Step::repeat(Step::Skill(kit.elemental_kill.clone()))
        );
    }

    #[test]
    fn kills_start_with_delevel_chain() {
        let world = StubWorld::default();
        let opponents = OpponentContext::new(&world, None);
        let kit = CombatKit::default();

        let script = compile(&CombatPolicy::new(), &Bindings::none(), &opponents, false, &kit);
        let steps = script.steps_for(&"anyone".into());

        let delevel: Vec<Step> = kit.delevel_steps().collect();
        assert_eq!(&steps[..delevel.len()], delevel.as_slice());
        assert_eq!(last(steps), &Step::repeat(Step::Attack));
    }

    #[test]
    fn guaranteed_kill_is_kept_off_boss_plain_kills() {
        let world = StubWorld::default();
        let opponents = OpponentContext::new(&world, None);
        let kit = CombatKit {
            delevel: Vec::new(),
            ..CombatKit::default()
        };
        let brick = Resource::new("Shadow Brick", ResourceCategory::GuaranteedKill, vec![Step::item("shadow brick")]);
        let mut bindings = Bindings::none();
        bindings.bind(&brick);

        let plain = compile(&CombatPolicy::new(), &bindings, &opponents, false, &kit);
        assert_eq!(plain.steps_for(&"ogre".into()), &[Step::item("shadow brick")]);

        let boss = compile(&CombatPolicy::new(), &bindings, &opponents, true, &kit);
        assert_eq!(boss.steps_for(&"ogre".into()), &[Step::repeat(Step::Attack)]);

        let forced = CombatPolicy::new().with("ogre", Strategy::KillHard);
        let hard = compile(&forced, &bindings, &opponents, false, &kit);
        assert_eq!(
            hard.steps_for(&"ogre".into()),
            &[Step::repeat(Step::Skill(kit.elemental_kill.clone()))]
        );
    }

    #[test]
    fn ignore_falls_back_to_escape_then_fight() {
        let world = StubWorld::default();
        let opponents = OpponentContext::new(&world, None);
        let policy = CombatPolicy::new().with_default(Strategy::IgnoreUnlessBanished);

        let script = compile(&policy, &Bindings::none(), &opponents, false, &CombatKit::default());
        assert_eq!(
            script.steps_for(&"bat".into()),
            &[Step::attempt(Step::Runaway), Step::repeat(Step::Attack)]
        );
    }

    #[test]
    fn wanderer_opponents_come_first_and_are_hard_killed() {
        let world = StubWorld::default()
            .with_actor(actor(100))
            .with_stats("lobster", 1, 80);
        let opponents = OpponentContext::new(&world, None);
        let kit = CombatKit::default();
        let wanderer = Resource::new("Cartography", ResourceCategory::Wanderer, Vec::new())
            .with_opponents([Opponent::from("lobster")]);
        let mut bindings = Bindings::none();
        bindings.bind(&wanderer);

        let policy = CombatPolicy::new().with("lobster", Strategy::Ignore);
        let script = compile(&policy, &bindings, &opponents, false, &kit);

        assert_eq!(script.blocks()[0].when, Condition::Opponent("lobster".into()));
        assert_eq!(
            last(script.steps_for(&"lobster".into())),
            &Step::repeat(Step::Skill(kit.physical_kill.clone()))
        );
    }

    #[test]
    fn block_order_is_named_then_literal_then_default() {
        let world = StubWorld::default()
            .with_actor(actor(10))
            .with_location_opponents("crypt", &["ghoul", "bat"])
            .with_stats("ghoul", 30, 0);
        let opponents = OpponentContext::new(&world, Some(&"crypt".into()));
        let policy = CombatPolicy::new()
            .with("bat", Strategy::Abort)
            .with_default_script(vec![Step::item("holy water")]);

        let script = compile(&policy, &Bindings::none(), &opponents, false, &CombatKit::default());
        let conditions: Vec<&Condition> = script.blocks().iter().map(|b| &b.when).collect();

        assert_eq!(
            conditions,
            [
                &Condition::Opponent("bat".into()),
                &Condition::Always,
                &Condition::Opponent("ghoul".into()),
                &Condition::Outscales { min_resistance: Some(50) },
                &Condition::Outscales { min_resistance: None },
                &Condition::Always,
            ]
        );
    }

    #[test]
    fn unexpected_opponents_get_a_fight_time_hard_kill() {
        let world = StubWorld::default()
            .with_actor(actor(10))
            .with_stats("tough", 100, 0);
        let opponents = OpponentContext::new(&world, None);
        let kit = CombatKit::default();

        let script = compile(&CombatPolicy::new(), &Bindings::none(), &opponents, false, &kit);
        let blocks = script.blocks();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].when, Condition::Outscales { min_resistance: Some(50) });
        assert_eq!(last(&blocks[0].steps), &Step::repeat(Step::Skill(kit.physical_kill.clone())));
        assert_eq!(blocks[1].when, Condition::Outscales { min_resistance: None });
        assert_eq!(last(&blocks[1].steps), &Step::repeat(Step::Skill(kit.elemental_kill.clone())));
        assert_eq!(blocks[2].when, Condition::Always);
        assert_eq!(last(&blocks[2].steps), &Step::repeat(Step::Attack));
    }

    #[test]
    fn fight_time_hard_kill_needs_a_plain_kill() {
        let world = StubWorld::default().with_actor(ActorProfile {
            weapon: WeaponCategory::Unarmed,
            ..actor(10)
        });
        let opponents = OpponentContext::new(&world, None);
        let kit = CombatKit::default();

        let unarmed = compile(&CombatPolicy::new(), &Bindings::none(), &opponents, false, &kit);
        assert_eq!(unarmed.blocks()[0].when, Condition::Outscales { min_resistance: None });
        assert_eq!(unarmed.blocks().len(), 2);

        let banish = CombatPolicy::new().with_default(Strategy::Banish);
        let script = compile(&banish, &Bindings::none(), &opponents, false, &kit);
        assert!(script.blocks().iter().all(|block| !block.when.is_fight_time()));

        let brick = Resource::new("Shadow Brick", ResourceCategory::GuaranteedKill, vec![Step::item("shadow brick")]);
        let mut bindings = Bindings::none();
        bindings.bind(&brick);
        let spent = compile(&CombatPolicy::new(), &bindings, &opponents, false, &kit);
        assert_eq!(spent.blocks().len(), 1);
    }
}
