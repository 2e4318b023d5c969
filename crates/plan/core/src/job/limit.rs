//! Attempt-limit policy.
//!
//! Every job may declare up to three ceilings: a hard attempt cap (probably a
//! logic defect when hit), a soft attempt cap (probably bad luck), and a cap
//! on turns spent at the job's location. All are checked after every
//! execution of the job, not only after failures, and exceeding any one of
//! them stops the run.

use crate::error::{ConfigError, LimitExceeded, LimitKind};
use crate::names::JobName;

/// Per-job lifecycle tracked by the run state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    /// Never executed.
    #[default]
    Fresh,
    /// Executed at least once, still incomplete.
    InProgress,
    /// Completion predicate observed true.
    Completed,
    /// Hard or turn cap exceeded.
    HardFailed,
    /// Soft cap exceeded.
    SoftWarned,
}

impl JobStatus {
    /// Status a job ends in when the given ceiling fires.
    pub fn after_limit(kind: LimitKind) -> Self {
        match kind {
            LimitKind::Soft => Self::SoftWarned,
            LimitKind::Tries | LimitKind::Turns => Self::HardFailed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::HardFailed | Self::SoftWarned)
    }
}

/// Ceilings on how long a job may keep failing to complete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct AttemptLimit {
    /// Hard attempt cap.
    pub tries: Option<u32>,
    /// Soft attempt cap.
    pub soft: Option<u32>,
    /// Cap on turns spent at the job's location.
    pub turns: Option<u32>,
    /// Hint appended to the failure message.
    pub message: Option<String>,
}

impl AttemptLimit {
    pub fn tries(cap: u32) -> Self {
        Self {
            tries: Some(cap),
            ..Self::default()
        }
    }

    pub fn soft(cap: u32) -> Self {
        Self {
            soft: Some(cap),
            ..Self::default()
        }
    }

    pub fn turns(cap: u32) -> Self {
        Self {
            turns: Some(cap),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_unlimited(&self) -> bool {
        self.tries.is_none() && self.soft.is_none() && self.turns.is_none()
    }

    /// A soft cap only warns if it fires before the hard cap.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SoftCapNotBelowHard`] when both caps are set and the
    /// soft one is not strictly lower.
    pub fn validate(&self, job: &JobName) -> Result<(), ConfigError> {
        match (self.soft, self.tries) {
            (Some(soft), Some(tries)) if soft >= tries => Err(ConfigError::SoftCapNotBelowHard {
                job: job.clone(),
                soft,
                tries,
            }),
            _ => Ok(()),
        }
    }

    /// Checks every ceiling for a job that is still incomplete.
    ///
    /// # Arguments
    ///
    /// * `job` - Name used in the error
    /// * `attempts` - Counted executions so far, including the one just run
    /// * `turns_spent` - Turns spent at the job's location, if it has one
    ///
    /// # Errors
    ///
    /// Returns the first ceiling reached, checked in the order hard, soft,
    /// turns.
    pub fn check(
        &self,
        job: &JobName,
        attempts: u32,
        turns_spent: Option<u32>,
    ) -> Result<(), LimitExceeded> {
        let exceeded = |kind, cap| LimitExceeded {
            job: job.clone(),
            kind,
            cap,
            hint: self.message.clone(),
        };

        if let Some(cap) = self.tries
            && attempts >= cap
        {
            return Err(exceeded(LimitKind::Tries, cap));
        }
        if let Some(cap) = self.soft
            && attempts >= cap
        {
            return Err(exceeded(LimitKind::Soft, cap));
        }
        if let (Some(cap), Some(turns)) = (self.turns, turns_spent)
            && turns >= cap
        {
            return Err(exceeded(LimitKind::Turns, cap));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_cap_fires_on_reaching_the_cap() {
        let limit = AttemptLimit::tries(3);
        let job = JobName::new("tower");

        assert!(limit.check(&job, 1, None).is_ok());
        assert!(limit.check(&job, 2, None).is_ok());

        let err = limit.check(&job, 3, None).unwrap_err();
        assert_eq!(err.kind, LimitKind::Tries);
        assert_eq!(err.cap, 3);
    }

    #[test]
    fn soft_cap_carries_hint() {
        let limit = AttemptLimit::soft(2).with_message("equip more +item drop");
        let err = limit.check(&"dig".into(), 2, None).unwrap_err();

        assert_eq!(err.kind, LimitKind::Soft);
        assert_eq!(err.hint.as_deref(), Some("equip more +item drop"));
        assert_eq!(JobStatus::after_limit(err.kind), JobStatus::SoftWarned);
    }

    #[test]
    fn turn_cap_needs_a_location() {
        let limit = AttemptLimit::turns(10);
        let job = JobName::new("crypt");

        assert!(limit.check(&job, 50, None).is_ok());
        assert!(limit.check(&job, 1, Some(9)).is_ok());
        assert_eq!(
            limit.check(&job, 1, Some(10)).unwrap_err().kind,
            LimitKind::Turns
        );
    }

    #[test]
    fn combined_caps_report_first_reached() {
        let limit = AttemptLimit {
            tries: Some(10),
            soft: Some(5),
            turns: Some(4),
            message: None,
        };
        let job = JobName::new("crypt");

        assert_eq!(limit.check(&job, 5, Some(1)).unwrap_err().kind, LimitKind::Soft);
        assert_eq!(limit.check(&job, 1, Some(4)).unwrap_err().kind, LimitKind::Turns);
        assert!(!limit.is_unlimited());
        assert!(AttemptLimit::default().is_unlimited());
    }

    #[test]
    fn soft_cap_must_sit_below_hard_cap() {
        let job = JobName::new("crypt");
        let limit = |tries, soft| AttemptLimit {
            tries,
            soft,
            ..AttemptLimit::default()
        };

        assert!(limit(Some(10), Some(9)).validate(&job).is_ok());
        assert!(limit(None, Some(10)).validate(&job).is_ok());
        assert!(limit(Some(10), None).validate(&job).is_ok());
        assert_eq!(
            limit(Some(5), Some(5)).validate(&job),
            Err(ConfigError::SoftCapNotBelowHard {
                job: job.clone(),
                soft: 5,
                tries: 5,
            })
        );
        assert!(limit(Some(5), Some(8)).validate(&job).is_err());
    }
}
