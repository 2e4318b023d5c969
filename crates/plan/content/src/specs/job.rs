//! Job definitions.

use serde::{Deserialize, Serialize};

use plan_core::{
    Acquisition, AttemptLimit, CombatPolicy, CombatRate, Job, JobEffect, JobName, Location,
    Outfit, PriorityHint,
};

use super::condition::ConditionSpec;
use super::procedure::ProcedureSpec;
use super::value::ValueSpec;

/// What a job does when it runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSpec {
    Visit(Location),
    Run(ProcedureSpec),
}

/// A job as written in `jobs.ron`.
///
/// Only `name`, `completed` and `effect` are required; every other field
/// falls back to the same default [`Job::new`] uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    pub name: JobName,
    #[serde(default)]
    pub after: Vec<JobName>,
    #[serde(default)]
    pub ready: Option<ConditionSpec>,
    pub completed: ConditionSpec,
    #[serde(default)]
    pub priority: Option<ValueSpec<PriorityHint>>,
    #[serde(default)]
    pub limit: AttemptLimit,
    #[serde(default)]
    pub combat: CombatPolicy,
    #[serde(default)]
    pub outfit: Outfit,
    #[serde(default)]
    pub acquire: Vec<Acquisition>,
    /// `(choice number, option)` pairs.
    #[serde(default)]
    pub choices: Vec<(u32, ValueSpec<u32>)>,
    pub effect: EffectSpec,
    #[serde(default)]
    pub post: Option<ProcedureSpec>,
    #[serde(default)]
    pub boss: bool,
    #[serde(default)]
    pub free_action: Option<ConditionSpec>,
    #[serde(default)]
    pub accepts_wanderers: bool,
    #[serde(default)]
    pub combat_rate: Option<CombatRate>,
    #[serde(default)]
    pub ignored_encounters: Vec<String>,
}

impl JobSpec {
    /// Builds the runtime job.
    pub fn build(self) -> Job {
        let effect = match self.effect {
            EffectSpec::Visit(location) => JobEffect::Visit(location),
            EffectSpec::Run(procedure) => JobEffect::Run(procedure.build()),
        };
        let completed = self.completed;
        let mut job = Job::new(self.name, move |ctx| completed.evaluate(ctx), effect)
            .with_after(self.after)
            .with_limit(self.limit)
            .with_combat(self.combat)
            .with_outfit(self.outfit);

        job.ready = self.ready.map(ConditionSpec::build);
        job.priority = self.priority.map(ValueSpec::build);
        job.acquire = self.acquire;
        job.choices = self
            .choices
            .into_iter()
            .map(|(choice, option)| (choice, option.build()))
            .collect();
        job.post = self.post.map(ProcedureSpec::build);
        job.boss = self.boss;
        if let Some(free) = self.free_action {
            job.free_action = plan_core::Value::computed(move |ctx| free.evaluate(ctx));
        }
        job.accepts_wanderers = self.accepts_wanderers;
        job.combat_rate = self.combat_rate;
        job.ignored_encounters = self.ignored_encounters;
        job
    }
}
