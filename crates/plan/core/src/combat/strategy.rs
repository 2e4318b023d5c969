//! Abstract per-opponent strategies.

use crate::combat::Step;
use crate::names::Opponent;

/// What a job intends to do with an opponent, before resources are bound.
#[derive(Clone, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Strategy {
    /// Escape the fight.
    Ignore,
    /// Escape the fight; the opponent is a banish candidate elsewhere.
    IgnoreUnlessBanished,
    /// Kill, preferring a guaranteed kill on non-boss jobs.
    #[default]
    Kill,
    /// Kill with a guaranteed-kill resource; abort without one.
    KillGuaranteed,
    /// Kill with the hard-kill sequence.
    KillHard,
    /// Banish with a banish resource; abort without one.
    Banish,
    /// The job must never meet this opponent.
    Abort,
    /// A literal script.
    Custom(Vec<Step>),
}

impl Strategy {
    pub fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignore | Self::IgnoreUnlessBanished)
    }
}

/// Per-job mapping from opponents to strategies.
///
/// Named entries keep their declaration order; the compiler emits branches
/// in exactly that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct CombatPolicy {
    entries: Vec<(Opponent, Strategy)>,
    default: Strategy,
    default_script: Option<Vec<Step>>,
}

impl CombatPolicy {
    /// A policy that kills everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a strategy for one opponent. A repeated opponent replaces
    /// the earlier strategy but keeps its position.
    pub fn with(mut self, opponent: impl Into<Opponent>, strategy: Strategy) -> Self {
        let opponent = opponent.into();
        match self.entries.iter_mut().find(|(named, _)| *named == opponent) {
            Some(entry) => entry.1 = strategy,
            None => self.entries.push((opponent, strategy)),
        }
        self
    }

    pub fn with_default(mut self, strategy: Strategy) -> Self {
        self.default = strategy;
        self
    }

    /// Literal script applied after every named opponent.
    pub fn with_default_script(mut self, steps: Vec<Step>) -> Self {
        self.default_script = Some(steps);
        self
    }

    pub fn entries(&self) -> &[(Opponent, Strategy)] {
        &self.entries
    }

    pub fn default_strategy(&self) -> &Strategy {
        &self.default
    }

    pub fn default_script(&self) -> Option<&[Step]> {
        self.default_script.as_deref()
    }

    /// The strategy that applies to an opponent.
    pub fn strategy_for(&self, opponent: &Opponent) -> &Strategy {
        self.entries
            .iter()
            .find(|(named, _)| named == opponent)
            .map(|(_, strategy)| strategy)
            .unwrap_or(&self.default)
    }

    pub fn is_named(&self, opponent: &Opponent) -> bool {
        self.entries.iter().any(|(named, _)| named == opponent)
    }

    /// Every strategy in use, including the default.
    pub fn strategies(&self) -> impl Iterator<Item = &Strategy> {
        self.entries
            .iter()
            .map(|(_, strategy)| strategy)
            .chain(std::iter::once(&self.default))
    }

    pub fn uses(&self, strategy: &Strategy) -> bool {
        self.strategies().any(|used| used == strategy)
    }

    pub fn uses_ignore(&self) -> bool {
        self.strategies().any(Strategy::is_ignore)
    }

    /// Opponents this policy wants banished.
    pub fn banish_targets(&self) -> impl Iterator<Item = &Opponent> {
        self.entries
            .iter()
            .filter(|(_, strategy)| *strategy == Strategy::Banish)
            .map(|(opponent, _)| opponent)
    }
}
