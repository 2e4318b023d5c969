//! Scores one job by running every rule against it.

use tracing::trace;

use crate::context::PlanContext;
use crate::job::Job;
use crate::priority::Priority;
use crate::priority::rules::{RULES, RuleInput};
use crate::resource::{ResourceCategory, ResourceRegistry, allocate};

/// Job scorer.
///
/// # Determinism
///
/// All scoring is pure with respect to the context: no randomness and no
/// mutation. Scoring the same job against the same world yields the same
/// [`Priority`], contributions included.
pub struct Scorer<'r> {
    registry: &'r ResourceRegistry,
}

impl<'r> Scorer<'r> {
    pub fn new(registry: &'r ResourceRegistry) -> Self {
        Self { registry }
    }

    /// Scores a job.
    ///
    /// # Arguments
    ///
    /// * `job` - The candidate
    /// * `remaining` - Every still-incomplete job, for the allocator preview
    /// * `ctx` - Planning context for this step
    ///
    /// # Returns
    ///
    /// The contributions of every rule that applied, in rule order.
    pub fn score(&self, job: &Job, remaining: &[&Job], ctx: &PlanContext<'_>) -> Priority {
        let preview = allocate::preview(self.registry, job, remaining, ctx);
        let idle_wanderer = if ctx.options.wanderers {
            allocate::first_ready(self.registry, ResourceCategory::Wanderer, ctx)
        } else {
            None
        };
        let input = RuleInput {
            job,
            ctx,
            preview,
            idle_wanderer,
        };

        let mut priority = Priority::new();
        for (rule, evaluate) in RULES {
            if let Some(contribution) = evaluate(&input) {
                trace!(job = %job.name, rule, %contribution, "rule applied");
                priority.push(contribution);
            }
        }
        priority
    }
}
