//! Boundary to the game being played.
//!
//! The planner never touches game state directly. Everything it reads or
//! changes goes through the [`World`] trait, which an embedding supplies: a
//! live game session in production, an in-memory simulation in tests.

use crate::combat::Macro;
use crate::error::WorldError;
use crate::loadout::Loadout;
use crate::names::{Item, Location, Opponent, Skill};

// ============================================================================
// Read-side types
// ============================================================================

/// The weapon class the actor is holding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WeaponCategory {
    #[default]
    Unarmed,
    Melee,
    Ranged,
}

/// Combat-relevant stats of the character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorProfile {
    pub muscle: i32,
    pub mysticality: i32,
    pub moxie: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: WeaponCategory,
}

impl ActorProfile {
    /// Effective offense in the stat that drives normal attacks.
    ///
    /// Ranged weapons attack with moxie, everything else with muscle.
    pub fn offense(&self) -> i32 {
        match self.weapon {
            WeaponCategory::Ranged => self.moxie,
            WeaponCategory::Melee | WeaponCategory::Unarmed => self.muscle,
        }
    }

    /// Returns true if the actor can deal physical hard-kill damage.
    pub fn is_armed(&self) -> bool {
        self.weapon != WeaponCategory::Unarmed
    }
}

/// Defensive stats of an opponent type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentStats {
    pub defense: i32,
    /// Elemental resistance in percent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub elemental_resistance: u32,
}

/// Active modifier on how often encounters are fights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CombatRate {
    Increased,
    Decreased,
}

/// A one-shot ability that has been used, and the opponent it was used on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggeredAbility {
    pub ability: String,
    pub target: Opponent,
}

// ============================================================================
// Encounter results
// ============================================================================

/// How a fight ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FightOutcome {
    Won,
    Escaped,
    Banished,
    Lost,
    /// An abort step ran; the reason is the step's message.
    Aborted(String),
}

/// What happened during one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterKind {
    NonCombat,
    Combat {
        opponent: Opponent,
        outcome: FightOutcome,
    },
}

/// One resolved encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    /// Encounter title as the game reports it.
    pub name: String,
    pub kind: EncounterKind,
}

impl Encounter {
    pub fn non_combat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EncounterKind::NonCombat,
        }
    }

    pub fn combat(opponent: Opponent, outcome: FightOutcome) -> Self {
        Self {
            name: opponent.to_string(),
            kind: EncounterKind::Combat { opponent, outcome },
        }
    }

    /// The opponent fought, if this was a fight.
    pub fn opponent(&self) -> Option<&Opponent> {
        match &self.kind {
            EncounterKind::Combat { opponent, .. } => Some(opponent),
            EncounterKind::NonCombat => None,
        }
    }

    pub fn is_combat(&self) -> bool {
        matches!(self.kind, EncounterKind::Combat { .. })
    }
}

// ============================================================================
// World trait
// ============================================================================

/// Queries, mutators and encounter execution provided by the game.
///
/// Query methods are infallible snapshots. Mutators and encounters may fail;
/// the engine wraps every failure into a fatal [`crate::PlanError::World`].
pub trait World {
    // ---- queries ----------------------------------------------------------

    /// Reads a named persistent counter or flag (missing counters read as 0).
    fn counter(&self, name: &str) -> i64;

    fn item_count(&self, item: &Item) -> u32;

    fn has_skill(&self, skill: &Skill) -> bool;

    fn is_equipped(&self, item: &Item) -> bool;

    fn actor(&self) -> ActorProfile;

    fn opponent_stats(&self, opponent: &Opponent) -> OpponentStats;

    /// Turns spent at a location over the whole run.
    fn turns_spent(&self, location: &Location) -> u32;

    /// Opponents a location can produce.
    fn location_opponents(&self, location: &Location) -> Vec<Opponent>;

    /// Forward-looking guess at the next fight at a location.
    fn predict_opponent(&self, location: &Location) -> Option<Opponent>;

    /// One-shot abilities already spent, with their targets.
    fn triggered_abilities(&self) -> Vec<TriggeredAbility>;

    /// Opponents at a location that still need special handling.
    fn special_targets(&self, location: &Location) -> Vec<Opponent>;

    fn combat_rate(&self) -> Option<CombatRate>;

    fn is_incapacitated(&self) -> bool;

    // ---- mutators ---------------------------------------------------------

    fn set_counter(&mut self, name: &str, value: i64) -> Result<(), WorldError>;

    /// Pre-selects the answer to a numbered choice adventure.
    fn set_choice(&mut self, choice: u32, option: u32) -> Result<(), WorldError>;

    fn equip(&mut self, loadout: &Loadout) -> Result<(), WorldError>;

    /// Tries to bring the item count up to `quantity`, paying at most
    /// `max_price` each. Returns false if the target count was not reached.
    fn acquire(
        &mut self,
        item: &Item,
        quantity: u32,
        max_price: Option<u32>,
    ) -> Result<bool, WorldError>;

    fn apply_effect(&mut self, effect: &str) -> Result<(), WorldError>;

    // ---- encounters -------------------------------------------------------

    /// Spends one turn at a location, fighting with `script` if needed.
    fn visit(&mut self, location: &Location, script: &Macro) -> Result<Encounter, WorldError>;

    /// Resolves the next chained encounter, if one is pending.
    fn resolve_pending(&mut self, script: &Macro) -> Result<Option<Encounter>, WorldError>;
}
