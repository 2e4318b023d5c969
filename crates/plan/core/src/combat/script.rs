//! Compiled action scripts.
//!
//! A [`Macro`] is an ordered list of conditional [`Block`]s. During a fight,
//! each block whose condition matches the current opponent runs in turn;
//! a block that does not end the fight falls through to the next one. The
//! script renders as readable macro text for logs.

use std::fmt;

use crate::names::{Item, Opponent, Skill};

/// One sub-action of a script.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Step {
    /// Normal weapon attack.
    Attack,
    Skill(Skill),
    Item(Item),
    /// Generic flee.
    Runaway,
    /// Stops the fight and the run with the given reason.
    Abort(String),
    /// Tries the inner step; unavailability is not a failure.
    Attempt(Box<Step>),
    /// Repeats the inner step until the fight ends.
    Repeat(Box<Step>),
}

impl Step {
    pub fn skill(name: impl Into<Skill>) -> Self {
        Self::Skill(name.into())
    }

    pub fn item(name: impl Into<Item>) -> Self {
        Self::Item(name.into())
    }

    pub fn abort(reason: impl Into<String>) -> Self {
        Self::Abort(reason.into())
    }

    pub fn attempt(step: Step) -> Self {
        Self::Attempt(Box::new(step))
    }

    pub fn repeat(step: Step) -> Self {
        Self::Repeat(Box::new(step))
    }

    /// Returns true if this step (or the step it wraps) aborts.
    pub fn is_abort(&self) -> bool {
        match self {
            Self::Abort(_) => true,
            Self::Attempt(inner) | Self::Repeat(inner) => inner.is_abort(),
            _ => false,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => f.write_str("attack"),
            Self::Skill(skill) => write!(f, "skill {skill}"),
            Self::Item(item) => write!(f, "use {item}"),
            Self::Runaway => f.write_str("runaway"),
            Self::Abort(reason) => write!(f, "abort \"{reason}\""),
            Self::Attempt(inner) => write!(f, "try {inner}"),
            Self::Repeat(inner) => write!(f, "repeat {inner}"),
        }
    }
}

/// When a block applies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Always,
    Opponent(Opponent),
    OneOf(Vec<Opponent>),
    /// Decided in the fight: the opponent's defense outscales the actor's
    /// offense (see [`crate::combat::needs_hard_kill`]) and, if set, its
    /// elemental resistance reaches the given percentage.
    Outscales { min_resistance: Option<u32> },
}

impl Condition {
    /// Matches by opponent name alone. Fight-time conditions never match
    /// here; they are evaluated against the live fight when the script runs.
    pub fn matches(&self, opponent: &Opponent) -> bool {
        match self {
            Self::Always => true,
            Self::Opponent(expected) => expected == opponent,
            Self::OneOf(expected) => expected.contains(opponent),
            Self::Outscales { .. } => false,
        }
    }

    pub fn is_fight_time(&self) -> bool {
        matches!(self, Self::Outscales { .. })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Opponent(opponent) => write!(f, "monstername \"{opponent}\""),
            Self::OneOf(opponents) => {
                for (i, opponent) in opponents.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" || ")?;
                    }
                    write!(f, "monstername \"{opponent}\"")?;
                }
                Ok(())
            }
            Self::Outscales { min_resistance: None } => f.write_str("outscales"),
            Self::Outscales {
                min_resistance: Some(min),
            } => write!(f, "outscales && resistance >= {min}"),
        }
    }
}

/// A conditional sequence of steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub when: Condition,
    pub steps: Vec<Step>,
}

impl Block {
    pub fn new(when: Condition, steps: Vec<Step>) -> Self {
        Self { when, steps }
    }

    pub fn always(steps: Vec<Step>) -> Self {
        Self::new(Condition::Always, steps)
    }

    pub fn aborts(&self) -> bool {
        self.steps.iter().any(Step::is_abort)
    }
}

/// An executable combat script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Macro {
    blocks: Vec<Block>,
}

impl Macro {
    pub fn new() -> Self {
        Self::default()
    }

    /// A script that aborts any fight that happens.
    pub fn abort_only(reason: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::always(vec![Step::abort(reason)])],
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The first block that applies to the given opponent.
    pub fn block_for(&self, opponent: &Opponent) -> Option<&Block> {
        self.blocks.iter().find(|block| block.when.matches(opponent))
    }

    /// Steps of the first block that applies to the given opponent.
    pub fn steps_for(&self, opponent: &Opponent) -> &[Step] {
        self.block_for(opponent)
            .map(|block| block.steps.as_slice())
            .unwrap_or_default()
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            let indent = match &block.when {
                Condition::Always => "",
                condition => {
                    writeln!(f, "if {condition}")?;
                    "  "
                }
            };
            for step in &block.steps {
                writeln!(f, "{indent}{step};")?;
            }
            if block.when != Condition::Always {
                writeln!(f, "endif")?;
            }
        }
        Ok(())
    }
}
