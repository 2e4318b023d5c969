//! Priority scoring for job selection.
//!
//! A job's priority is never a single opaque number. It is a list of named,
//! signed [`Contribution`]s produced by an ordered rule set ([`rules`]); the
//! score is their sum and the list doubles as the explanation in logs.
//!
//! # Score Components
//!
//! - **Override**: an explicit tier or point value declared by the job
//! - **Readiness**: bonuses and penalties for resources the job would get
//! - **Mood**: desired combat rate against the active one
//! - **Prediction**: what the next fight at the job's location looks like
//! - **Anti-waste**: penalty for spending turns while a wanderer is ready
//!
//! Ties are not broken here. The engine walks jobs in routing order and only
//! replaces its best candidate on a strictly greater score.

pub mod rules;
pub mod scorer;

use std::fmt;

pub use scorer::Scorer;

/// Named priority levels a job may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Tier {
    Urgent,
    Free,
    Normal,
    Deferred,
}

impl Tier {
    pub const fn points(self) -> i32 {
        match self {
            Self::Urgent => 1000,
            Self::Free => 50,
            Self::Normal => 0,
            Self::Deferred => -1000,
        }
    }
}

/// An explicit priority override.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PriorityHint {
    Tier(Tier),
    Points(i32),
}

impl PriorityHint {
    pub const fn points(self) -> i32 {
        match self {
            Self::Tier(tier) => tier.points(),
            Self::Points(points) => points,
        }
    }
}

impl From<Tier> for PriorityHint {
    fn from(tier: Tier) -> Self {
        Self::Tier(tier)
    }
}

/// One signed, explained part of a score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub reason: String,
    pub points: i32,
}

impl Contribution {
    pub fn new(reason: impl Into<String>, points: i32) -> Self {
        Self {
            reason: reason.into(),
            points,
        }
    }
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} {}", self.points, self.reason)
    }
}

/// Accumulated contributions for one job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Priority {
    contributions: Vec<Contribution>,
}

impl Priority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, contribution: Contribution) {
        self.contributions.push(contribution);
    }

    /// Sum of every contribution.
    pub fn score(&self) -> i32 {
        self.contributions.iter().map(|c| c.points).sum()
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    /// Reasons joined for logs; empty when nothing applied.
    pub fn explain(&self) -> String {
        self.contributions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contributions.is_empty() {
            write!(f, "{}", self.score())
        } else {
            write!(f, "{} ({})", self.score(), self.explain())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_sum_of_reasons() {
        let mut priority = Priority::new();
        priority.push(Contribution::new("free action", 20));
        priority.push(Contribution::new("no banish available", -10));

        assert_eq!(priority.score(), 10);
        assert_eq!(priority.explain(), "+20 free action, -10 no banish available");
        assert_eq!(priority.to_string(), "10 (+20 free action, -10 no banish available)");
    }

    #[test]
    fn empty_priority_is_zero() {
        assert_eq!(Priority::new().score(), 0);
        assert_eq!(Priority::new().to_string(), "0");
    }

    #[test]
    fn hints_resolve_to_points() {
        assert_eq!(PriorityHint::from(Tier::Urgent).points(), 1000);
        assert_eq!(PriorityHint::Points(-7).points(), -7);
        assert_eq!(Tier::Deferred.to_string(), "deferred");
    }
}
