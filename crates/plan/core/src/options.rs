//! Per-run options supplied at startup.

use crate::error::ConfigError;
use crate::names::JobName;

/// Upper bound on the number of pulls a run may permit.
pub const MAX_PULLS: u32 = 20;

/// Numeric and boolean knobs that gate resource availability and the run loop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct RunOptions {
    /// Reusable pulls permitted this run.
    pub pulls: u32,
    /// Whether wandering-encounter resources may be used.
    pub wanderers: bool,
    /// Stop after this many executed steps.
    pub max_steps: Option<u32>,
    /// Stop when this job would be selected next.
    pub stop_before: Option<JobName>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            pulls: 0,
            wanderers: true,
            max_steps: None,
            stop_before: None,
        }
    }
}

impl RunOptions {
    /// Checks option values against their declared ranges and the job catalog.
    ///
    /// # Arguments
    ///
    /// * `known_job` - Returns true if a job with the given name exists
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for out-of-range values and
    /// [`ConfigError::UnknownJob`] when `stop_before` names no job.
    pub fn validate(&self, known_job: impl Fn(&JobName) -> bool) -> Result<(), ConfigError> {
        if self.pulls > MAX_PULLS {
            return Err(ConfigError::InvalidOption {
                name: "pulls",
                value: self.pulls.to_string(),
                expected: format!("0..={MAX_PULLS}"),
            });
        }

        if self.max_steps == Some(0) {
            return Err(ConfigError::InvalidOption {
                name: "max_steps",
                value: "0".into(),
                expected: "a positive step count".into(),
            });
        }

        if let Some(job) = &self.stop_before
            && !known_job(job)
        {
            return Err(ConfigError::UnknownJob {
                option: "stop_before",
                job: job.clone(),
            });
        }

        Ok(())
    }
}
