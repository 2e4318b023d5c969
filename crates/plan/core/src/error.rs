//! Error types for planning and execution.
//!
//! Every error in this crate is fatal for the run: nothing is retried except
//! the natural "the job is still incomplete, so it may be picked again next
//! step" loop. Errors are still classified by [`ErrorCategory`] so the run
//! driver can report what kind of stop happened.
//!
//! # Design Principles
//!
//! - **Rich Context**: every variant names the job (and item/opponent/cap)
//! - **Stable Codes**: [`PlanError::error_code`] is suitable for logs and tests
//! - **Typed Sources**: configuration, limit and collaborator failures keep
//!   their own types and convert into [`PlanError`] via `From`

use std::fmt;

use crate::loadout::SlotSet;
use crate::names::{Item, JobName, Opponent};

/// Classification of a fatal stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// Broken catalog or options, detected at startup.
    Configuration,
    /// A mandatory item could not be obtained.
    Acquisition,
    /// A hard, soft or turn cap was exceeded.
    AttemptLimit,
    /// An abort script actually ran during an encounter.
    StrategyFault,
    /// The character was beaten.
    Incapacitated,
    /// An invariant the catalog promised was broken (e.g., progress regressed).
    Defect,
    /// The external game collaborator reported a failure.
    World,
}

/// Startup-time catalog and option errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("job `{job}` depends on unknown job `{missing}`")]
    DanglingDependency { job: JobName, missing: JobName },

    #[error("job `{0}` is declared more than once")]
    DuplicateJob(JobName),

    #[error("job name `{0}` is reserved")]
    ReservedName(JobName),

    #[error("dependency cycle: {}", join_cycle(.0))]
    Cycle(Vec<JobName>),

    #[error("routing order names unknown job `{0}`")]
    UnknownRouteEntry(JobName),

    #[error("routing order lists `{0}` more than once")]
    DuplicateRouteEntry(JobName),

    #[error("option `{name}` has invalid value `{value}` (expected {expected})")]
    InvalidOption {
        name: &'static str,
        value: String,
        expected: String,
    },

    #[error("option `{option}` names unknown job `{job}`")]
    UnknownJob { option: &'static str, job: JobName },

    #[error("job `{job}` has soft cap {soft} not below its hard cap {tries}")]
    SoftCapNotBelowHard { job: JobName, soft: u32, tries: u32 },
}

fn join_cycle(path: &[JobName]) -> String {
    path.iter()
        .map(JobName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Failure reported by the external game collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WorldError {
    message: String,
}

impl WorldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Which ceiling of an [`crate::job::AttemptLimit`] fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LimitKind {
    /// Hard attempt cap: probably a logic defect.
    Tries,
    /// Soft attempt cap: probably bad luck.
    Soft,
    /// Turns spent at the job's location.
    Turns,
}

/// An attempt-limit ceiling was reached by a job that is still incomplete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimitExceeded {
    pub job: JobName,
    pub kind: LimitKind,
    pub cap: u32,
    pub hint: Option<String>,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LimitKind::Tries => write!(
                f,
                "job `{}` did not complete within {} attempts; check what went wrong",
                self.job, self.cap
            )?,
            LimitKind::Soft => write!(
                f,
                "job `{}` did not complete within {} attempts; check what went wrong \
                 (this is probably just bad luck)",
                self.job, self.cap
            )?,
            LimitKind::Turns => write!(
                f,
                "job `{}` did not complete within {} turns; check what went wrong",
                self.job, self.cap
            )?,
        }
        if let Some(hint) = &self.hint {
            write!(f, ". {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LimitExceeded {}

/// Top-level error: every variant stops the run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("job `{job}` could not acquire {item}")]
    Acquisition { job: JobName, item: Item },

    #[error(transparent)]
    Limit(#[from] LimitExceeded),

    #[error("fight lost/aborted in job `{job}`{}: {reason}; stop.", describe_opponent(.opponent))]
    CombatAborted {
        job: JobName,
        opponent: Option<Opponent>,
        reason: String,
    },

    #[error("character incapacitated during job `{job}`; stop.")]
    Incapacitated { job: JobName },

    #[error("job `{job}` cannot wear {item}: slots {slots:?} are already committed")]
    LoadoutConflict {
        job: JobName,
        item: Item,
        slots: SlotSet,
    },

    #[error("job `{job}` was observed complete but now reports incomplete")]
    ProgressRegressed { job: JobName },

    #[error("world failure during job `{job}`: {source}")]
    World {
        job: JobName,
        #[source]
        source: WorldError,
    },
}

fn describe_opponent(opponent: &Option<Opponent>) -> String {
    opponent
        .as_ref()
        .map(|o| format!(" against {o}"))
        .unwrap_or_default()
}

impl PlanError {
    /// Wraps a collaborator failure with the job that was running.
    pub fn world(job: &JobName, source: WorldError) -> Self {
        Self::World {
            job: job.clone(),
            source,
        }
    }

    /// Returns the category of this stop.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::Acquisition { .. } => ErrorCategory::Acquisition,
            Self::Limit(_) => ErrorCategory::AttemptLimit,
            Self::CombatAborted { .. } => ErrorCategory::StrategyFault,
            Self::Incapacitated { .. } => ErrorCategory::Incapacitated,
            Self::LoadoutConflict { .. } | Self::ProgressRegressed { .. } => {
                ErrorCategory::Defect
            }
            Self::World { .. } => ErrorCategory::World,
        }
    }

    /// Returns a static identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(ConfigError::DanglingDependency { .. }) => "config.dangling_dependency",
            Self::Config(ConfigError::DuplicateJob(_)) => "config.duplicate_job",
            Self::Config(ConfigError::ReservedName(_)) => "config.reserved_name",
            Self::Config(ConfigError::Cycle(_)) => "config.cycle",
            Self::Config(ConfigError::UnknownRouteEntry(_)) => "config.unknown_route_entry",
            Self::Config(ConfigError::DuplicateRouteEntry(_)) => "config.duplicate_route_entry",
            Self::Config(ConfigError::InvalidOption { .. }) => "config.invalid_option",
            Self::Config(ConfigError::UnknownJob { .. }) => "config.unknown_job",
            Self::Config(ConfigError::SoftCapNotBelowHard { .. }) => "config.soft_cap",
            Self::Acquisition { .. } => "acquisition",
            Self::Limit(limit) => match limit.kind {
                LimitKind::Tries => "limit.tries",
                LimitKind::Soft => "limit.soft",
                LimitKind::Turns => "limit.turns",
            },
            Self::CombatAborted { .. } => "combat.aborted",
            Self::Incapacitated { .. } => "combat.incapacitated",
            Self::LoadoutConflict { .. } => "loadout.conflict",
            Self::ProgressRegressed { .. } => "progress.regressed",
            Self::World { .. } => "world",
        }
    }

    /// Returns the job this error is about, if any.
    pub fn job(&self) -> Option<&JobName> {
        match self {
            Self::Config(_) => None,
            Self::Limit(limit) => Some(&limit.job),
            Self::Acquisition { job, .. }
            | Self::CombatAborted { job, .. }
            | Self::Incapacitated { job }
            | Self::LoadoutConflict { job, .. }
            | Self::ProgressRegressed { job }
            | Self::World { job, .. } => Some(job),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_limit_wording_mentions_luck() {
        let hard = LimitExceeded {
            job: JobName::new("dig"),
            kind: LimitKind::Tries,
            cap: 3,
            hint: None,
        };
        let soft = LimitExceeded {
            kind: LimitKind::Soft,
            hint: Some("try more +item".into()),
            ..hard.clone()
        };

        assert!(!hard.to_string().contains("luck"));
        assert!(soft.to_string().contains("bad luck"));
        assert!(soft.to_string().ends_with("try more +item"));
    }

    #[test]
    fn cycle_lists_path() {
        let err = ConfigError::Cycle(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "dependency cycle: a -> b -> a");
    }

    #[test]
    fn categories_and_codes() {
        let err = PlanError::CombatAborted {
            job: "vault".into(),
            opponent: Some("guard".into()),
            reason: "no banisher".into(),
        };
        assert_eq!(err.category(), ErrorCategory::StrategyFault);
        assert_eq!(err.error_code(), "combat.aborted");
        assert_eq!(err.job().map(JobName::as_str), Some("vault"));
        assert_eq!(
            err.to_string(),
            "fight lost/aborted in job `vault` against guard: no banisher; stop."
        );
    }
}
