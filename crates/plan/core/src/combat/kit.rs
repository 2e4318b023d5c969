//! The character's combat repertoire.

use crate::combat::Step;
use crate::names::Skill;
use crate::world::{ActorProfile, OpponentStats};

/// Skills the compiler draws from when resolving strategies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CombatKit {
    /// Best-effort debuffs tried before every kill. Empty disables the chain.
    pub delevel: Vec<Skill>,
    /// Hard-kill skill used against low-resistance opponents.
    pub elemental_kill: Skill,
    /// Hard-kill skill used with a weapon against resistant opponents.
    pub physical_kill: Skill,
    /// Elemental resistance (percent) at which the physical kill is preferred.
    pub resistance_threshold: u32,
    /// Fallback escape tried when no escape resource is bound.
    pub escape: Vec<Step>,
}

impl Default for CombatKit {
    fn default() -> Self {
        Self {
            delevel: vec![
                "Curse of Weaksauce".into(),
                "Micrometeorite".into(),
                "Entangling Noodles".into(),
            ],
            elemental_kill: "Saucegeyser".into(),
            physical_kill: "Lunging Thrust-Smack".into(),
            resistance_threshold: 50,
            escape: vec![Step::Runaway],
        }
    }
}

impl CombatKit {
    /// The delevel chain, each step attempted.
    pub fn delevel_steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.delevel
            .iter()
            .map(|skill| Step::attempt(Step::Skill(skill.clone())))
    }

    /// Picks the hard-kill skill for an opponent.
    ///
    /// | resistance >= threshold | armed | skill |
    /// |---|---|---|
    /// | no | any | elemental |
    /// | yes | yes | physical |
    /// | yes | no | elemental |
    pub fn hard_kill_skill(&self, actor: &ActorProfile, stats: &OpponentStats) -> &Skill {
        if stats.elemental_resistance >= self.resistance_threshold && actor.is_armed() {
            &self.physical_kill
        } else {
            &self.elemental_kill
        }
    }
}

/// Returns true if a plain kill should be upgraded to a hard kill.
///
/// The rule is `defense * 1.25 > offense`, evaluated as `5 * D > 4 * O` so
/// that the boundary (`D * 1.25 == O`) always selects the normal attack.
pub fn needs_hard_kill(defense: i32, offense: i32) -> bool {
    5 * i64::from(defense) > 4 * i64::from(offense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WeaponCategory;

    #[test]
    fn boundary_selects_normal_attack() {
        // 40 * 1.25 == 50
        assert!(!needs_hard_kill(40, 50));
        assert!(needs_hard_kill(41, 50));
        assert!(!needs_hard_kill(39, 50));
    }

    #[test]
    fn hard_kill_skill_follows_resistance_and_weapon() {
        let kit = CombatKit::default();
        let mut actor = ActorProfile {
            weapon: WeaponCategory::Melee,
            ..ActorProfile::default()
        };
        let resistant = OpponentStats {
            defense: 10,
            elemental_resistance: 50,
        };
        let soft = OpponentStats {
            defense: 10,
            elemental_resistance: 49,
        };

        assert_eq!(kit.hard_kill_skill(&actor, &resistant), &kit.physical_kill);
        assert_eq!(kit.hard_kill_skill(&actor, &soft), &kit.elemental_kill);

        actor.weapon = WeaponCategory::Unarmed;
        assert_eq!(kit.hard_kill_skill(&actor, &resistant), &kit.elemental_kill);
    }
}
