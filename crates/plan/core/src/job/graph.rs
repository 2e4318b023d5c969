//! Task graph construction and validation.
//!
//! Jobs form a DAG keyed by name. Every structural problem is caught here, at
//! startup, and reported as a [`ConfigError`]:
//!
//! - reserved names
//! - duplicate names
//! - soft attempt caps not below the hard cap
//! - prerequisites naming no job
//! - cycles (the error carries the cycle path)

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::job::Job;
use crate::names::JobName;

/// Names that cannot be used for jobs.
pub const RESERVED_NAMES: [&str; 2] = ["none", "all"];

/// Validated jobs in declaration order.
#[derive(Debug)]
pub struct TaskGraph {
    jobs: Vec<Job>,
    index: HashMap<JobName, usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl TaskGraph {
    /// Validates and indexes the given jobs.
    ///
    /// # Errors
    ///
    /// The first structural problem found, checking names and limits before
    /// edges and edges before cycles.
    pub fn new(jobs: Vec<Job>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(jobs.len());
        for (i, job) in jobs.iter().enumerate() {
            if RESERVED_NAMES.contains(&job.name.as_str()) {
                return Err(ConfigError::ReservedName(job.name.clone()));
            }
            if index.insert(job.name.clone(), i).is_some() {
                return Err(ConfigError::DuplicateJob(job.name.clone()));
            }
            job.limit.validate(&job.name)?;
        }

        for job in &jobs {
            if let Some(missing) = job.after.iter().find(|dep| !index.contains_key(*dep)) {
                return Err(ConfigError::DanglingDependency {
                    job: job.name.clone(),
                    missing: missing.clone(),
                });
            }
        }

        let graph = Self { jobs, index };
        graph.check_acyclic()?;
        Ok(graph)
    }

    fn check_acyclic(&self) -> Result<(), ConfigError> {
        let mut marks = vec![Mark::Unvisited; self.jobs.len()];
        let mut stack = Vec::new();
        for start in 0..self.jobs.len() {
            if marks[start] == Mark::Unvisited {
                self.visit(start, &mut marks, &mut stack)?;
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        node: usize,
        marks: &mut [Mark],
        stack: &mut Vec<usize>,
    ) -> Result<(), ConfigError> {
        marks[node] = Mark::OnStack;
        stack.push(node);

        for dep in &self.jobs[node].after {
            let next = self.index[dep];
            match marks[next] {
                Mark::Done => {}
                Mark::Unvisited => self.visit(next, marks, stack)?,
                Mark::OnStack => {
                    let start = stack.iter().position(|&i| i == next).unwrap_or(0);
                    let mut path: Vec<JobName> = stack[start..]
                        .iter()
                        .map(|&i| self.jobs[i].name.clone())
                        .collect();
                    path.push(self.jobs[next].name.clone());
                    return Err(ConfigError::Cycle(path));
                }
            }
        }

        stack.pop();
        marks[node] = Mark::Done;
        Ok(())
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, index: usize) -> &Job {
        &self.jobs[index]
    }

    pub fn get(&self, name: &str) -> Option<&Job> {
        self.index.get(name).map(|&i| &self.jobs[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Prerequisites of a job, as indices.
    pub fn prerequisites(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.jobs[index].after.iter().map(|dep| self.index[dep])
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{AttemptLimit, JobEffect};

    fn job(name: &str, after: &[&str]) -> Job {
        Job::new(name, |_| false, JobEffect::Visit("nowhere".into())).with_after(after.iter().copied())
    }

    #[test]
    fn accepts_a_dag() {
        let graph = TaskGraph::new(vec![
            job("a", &[]),
            job("b", &["a"]),
            job("c", &["a", "b"]),
        ])
        .unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.index_of("c"), Some(2));
        assert_eq!(graph.prerequisites(2).collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn rejects_duplicates_and_reserved_names() {
        let err = TaskGraph::new(vec![job("a", &[]), job("a", &[])]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateJob("a".into()));

        let err = TaskGraph::new(vec![job("all", &[])]).unwrap_err();
        assert_eq!(err, ConfigError::ReservedName("all".into()));
    }

    #[test]
    fn rejects_soft_cap_at_or_above_hard_cap() {
        let capped = job("dig", &[]).with_limit(AttemptLimit {
            tries: Some(5),
            soft: Some(5),
            ..AttemptLimit::default()
        });

        let err = TaskGraph::new(vec![job("a", &[]), capped]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::SoftCapNotBelowHard {
                job: "dig".into(),
                soft: 5,
                tries: 5,
            }
        );
    }

    #[test]
    fn rejects_dangling_dependencies() {
        let err = TaskGraph::new(vec![job("a", &["ghost"])]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DanglingDependency {
                job: "a".into(),
                missing: "ghost".into(),
            }
        );
    }

    #[test]
    fn reports_cycle_path() {
        let err = TaskGraph::new(vec![
            job("root", &[]),
            job("a", &["root", "c"]),
            job("b", &["a"]),
            job("c", &["b"]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Cycle(vec!["a".into(), "c".into(), "b".into(), "a".into()])
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let err = TaskGraph::new(vec![job("loop", &["loop"])]).unwrap_err();
        assert_eq!(err, ConfigError::Cycle(vec!["loop".into(), "loop".into()]));
    }
}
