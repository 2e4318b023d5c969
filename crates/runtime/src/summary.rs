//! What a run did, step by step.

use std::fmt;

use plan_core::{Encounter, JobName};
use serde::Serialize;

/// One executed step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepRecord {
    /// 1-based step number.
    pub step: u32,
    pub job: JobName,
    pub score: i32,
    /// Score contributions as rendered in logs.
    pub reasons: Vec<String>,
    /// Names of the resources bound for this step.
    pub bindings: Vec<String>,
    pub free_action: bool,
    /// Rendered combat script.
    pub script: String,
    pub encounters: Vec<Encounter>,
    /// Attempt count after this step.
    pub attempts: u32,
    /// Whether the job read complete after the step.
    pub completed: bool,
}

/// Why a run stopped without an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No job was eligible.
    NothingEligible,
    /// The configured step budget ran out.
    MaxSteps(u32),
    /// The configured stop job came up next.
    StopBefore(JobName),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingEligible => f.write_str("nothing left to do"),
            Self::MaxSteps(max) => write!(f, "step limit reached ({max})"),
            Self::StopBefore(job) => write!(f, "stopped before `{job}`"),
        }
    }
}

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub steps: Vec<StepRecord>,
    pub stop: StopReason,
    /// Jobs complete when the run stopped.
    pub completed: Vec<JobName>,
    /// Jobs still incomplete when the run stopped.
    pub remaining: Vec<JobName>,
}

impl RunSummary {
    /// Steps spent on each job, in first-executed order.
    pub fn steps_per_job(&self) -> Vec<(&JobName, usize)> {
        let mut counts: Vec<(&JobName, usize)> = Vec::new();
        for record in &self.steps {
            match counts.iter_mut().find(|(job, _)| *job == &record.job) {
                Some((_, count)) => *count += 1,
                None => counts.push((&record.job, 1)),
            }
        }
        counts
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}. {} (score {})", self.step, self.job, self.score)?;
        if !self.bindings.is_empty() {
            write!(f, " with {}", self.bindings.join(", "))?;
        }
        if self.completed {
            f.write_str(" [done]")?;
        }
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.steps {
            writeln!(f, "{record}")?;
        }
        writeln!(
            f,
            "{} steps, {} complete, {} remaining: {}",
            self.steps.len(),
            self.completed.len(),
            self.remaining.len(),
            self.stop
        )
    }
}
