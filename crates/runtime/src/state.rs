//! Per-run bookkeeping owned by the engine.

use plan_core::{JobStatus, LimitKind};

/// Status and attempt counter for one job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JobRecord {
    pub status: JobStatus,
    pub attempts: u32,
}

/// Attempt counters and lifecycle status, indexed like the task graph.
///
/// Nothing here is persisted: a new run starts every job `Fresh`.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    jobs: Vec<JobRecord>,
}

impl RunState {
    pub fn new(job_count: usize) -> Self {
        Self {
            jobs: vec![JobRecord::default(); job_count],
        }
    }

    pub fn record(&self, index: usize) -> JobRecord {
        self.jobs[index]
    }

    pub fn status(&self, index: usize) -> JobStatus {
        self.jobs[index].status
    }

    pub fn attempts(&self, index: usize) -> u32 {
        self.jobs[index].attempts
    }

    /// Counts one attempt and returns the new total.
    pub fn record_attempt(&mut self, index: usize) -> u32 {
        let record = &mut self.jobs[index];
        record.attempts += 1;
        if record.status == JobStatus::Fresh {
            record.status = JobStatus::InProgress;
        }
        record.attempts
    }

    /// Marks a job that ran without counting an attempt.
    pub fn mark_started(&mut self, index: usize) {
        let record = &mut self.jobs[index];
        if record.status == JobStatus::Fresh {
            record.status = JobStatus::InProgress;
        }
    }

    pub fn mark_completed(&mut self, index: usize) {
        self.jobs[index].status = JobStatus::Completed;
    }

    pub fn mark_limit(&mut self, index: usize, kind: LimitKind) {
        self.jobs[index].status = JobStatus::after_limit(kind);
    }

    pub fn completed(&self) -> usize {
        self.jobs
            .iter()
            .filter(|record| record.status == JobStatus::Completed)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, JobRecord)> + '_ {
        self.jobs.iter().copied().enumerate()
    }
}
