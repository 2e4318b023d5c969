//! The step loop: select, prepare, allocate, compile, execute, record.
//!
//! The engine owns the validated task graph, the routing order, the resource
//! registry and the per-run state. Each step re-evaluates every job against
//! the current world; nothing is planned ahead.

use plan_core::combat::{OpponentContext, compile};
use plan_core::resource::allocate;
use plan_core::{
    Bindings, CombatKit, ConfigError, Encounter, EncounterKind, EquipRequirement, FightOutcome,
    Job, JobEffect, JobName, JobStatus, Loadout, Macro, PlanContext, PlanError, Priority,
    ResourceRegistry, Result, RouteOrder, RunOptions, Scorer, TaskGraph, World, WorldCache,
};
use tracing::{debug, error, info, warn};

use crate::error::RunFailure;
use crate::state::RunState;
use crate::summary::{RunSummary, StepRecord, StopReason};

/// Abort reason for a fight met while running a free action.
pub const FREE_ACTION_ABORT: &str = "fight during a free action";

/// A job picked for execution, with the score that won.
#[derive(Clone, Debug)]
pub struct Selection {
    /// Index into the task graph.
    pub index: usize,
    pub job: JobName,
    pub priority: Priority,
}

/// Builder for [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    jobs: Vec<Job>,
    route: Vec<JobName>,
    registry: ResourceRegistry,
    kit: CombatKit,
    options: RunOptions,
    default_equipment: Vec<EquipRequirement>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    pub fn jobs(mut self, jobs: impl IntoIterator<Item = Job>) -> Self {
        self.jobs.extend(jobs);
        self
    }

    /// Sets the preferred tie-break order. Unlisted jobs follow in
    /// declaration order.
    pub fn route<I, N>(mut self, route: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<JobName>,
    {
        self.route = route.into_iter().map(Into::into).collect();
        self
    }

    pub fn resources(mut self, registry: ResourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn kit(mut self, kit: CombatKit) -> Self {
        self.kit = kit;
        self
    }

    pub fn options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Equipment that fills free, non-avoided slots after everything else.
    pub fn default_equipment(mut self, equipment: Vec<EquipRequirement>) -> Self {
        self.default_equipment = equipment;
        self
    }

    /// Validates the catalog and builds the engine.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`]: graph defects, bad routing entries, or options
    /// outside their declared ranges.
    pub fn build<W: World>(self, world: W) -> std::result::Result<Engine<W>, ConfigError> {
        let graph = TaskGraph::new(self.jobs)?;
        let route = RouteOrder::new(&graph, &self.route)?;
        self.options.validate(|name| graph.contains(name.as_str()))?;

        info!(
            jobs = graph.len(),
            resources = self.registry.len(),
            routed = self.route.len(),
            "engine ready"
        );

        Ok(Engine {
            world,
            state: RunState::new(graph.len()),
            graph,
            route,
            registry: self.registry,
            kit: self.kit,
            options: self.options,
            default_equipment: self.default_equipment,
            cache: WorldCache::new(),
            history: Vec::new(),
        })
    }
}

/// Drives one run against a world.
///
/// # Determinism
///
/// Given the same catalog, routing order and world answers, the engine makes
/// the same selections, bindings and scripts. Ties never depend on hashing
/// or timing: candidates are visited in routing order and only a strictly
/// greater score replaces the current best.
pub struct Engine<W> {
    world: W,
    graph: TaskGraph,
    route: RouteOrder,
    registry: ResourceRegistry,
    kit: CombatKit,
    options: RunOptions,
    default_equipment: Vec<EquipRequirement>,
    cache: WorldCache,
    state: RunState,
    history: Vec<StepRecord>,
}

impl<W: World> Engine<W> {
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable world access; drops every cached fact.
    pub fn world_mut(&mut self) -> &mut W {
        self.cache.invalidate();
        &mut self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Steps executed so far.
    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    fn context(&self) -> PlanContext<'_> {
        PlanContext::new(&self.world, &self.cache, &self.options)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Returns true if every prerequisite is complete, the job itself is
    /// not, and its readiness predicate holds.
    pub fn is_eligible(&self, index: usize, ctx: &PlanContext<'_>) -> bool {
        let job = self.graph.job(index);
        self.graph
            .prerequisites(index)
            .all(|prerequisite| self.graph.job(prerequisite).is_complete(ctx))
            && !job.is_complete(ctx)
            && job.is_ready(ctx)
    }

    /// Scores every eligible job, in routing order.
    pub fn candidates(&self) -> Vec<Selection> {
        let ctx = self.context();
        let remaining: Vec<&Job> = self
            .graph
            .jobs()
            .iter()
            .filter(|job| !job.is_complete(&ctx))
            .collect();
        let scorer = Scorer::new(&self.registry);

        self.route
            .iter()
            .filter(|&index| self.is_eligible(index, &ctx))
            .map(|index| {
                let job = self.graph.job(index);
                let priority = scorer.score(job, &remaining, &ctx);
                debug!(job = %job.name, %priority, "candidate scored");
                Selection {
                    index,
                    job: job.name.clone(),
                    priority,
                }
            })
            .collect()
    }

    /// Picks the highest-scoring eligible job.
    ///
    /// # Returns
    ///
    /// `None` when no job is eligible, which ends the run normally. Equal
    /// scores keep the earliest job in routing order.
    pub fn select_next(&self) -> Option<Selection> {
        let mut best: Option<Selection> = None;
        for candidate in self.candidates() {
            let better = best
                .as_ref()
                .is_none_or(|current| candidate.priority.score() > current.priority.score());
            if better {
                best = Some(candidate);
            }
        }
        best
    }

    /// Records newly completed jobs.
    ///
    /// # Errors
    ///
    /// [`PlanError::ProgressRegressed`] if a job seen complete before now
    /// reads incomplete.
    pub fn observe_completions(&mut self) -> Result<()> {
        let ctx = self.context();
        let mut newly_completed = Vec::new();
        for (index, job) in self.graph.jobs().iter().enumerate() {
            let complete = job.is_complete(&ctx);
            match (self.state.status(index), complete) {
                (JobStatus::Completed, false) => {
                    return Err(PlanError::ProgressRegressed {
                        job: job.name.clone(),
                    });
                }
                (JobStatus::Completed, true) | (_, false) => {}
                (_, true) => newly_completed.push(index),
            }
        }

        for index in newly_completed {
            debug!(job = %self.graph.job(index).name, "job observed complete");
            self.state.mark_completed(index);
        }
        Ok(())
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Executes the selected job once.
    ///
    /// Order: acquisitions, choices, loadout (job equipment, then bound
    /// resources, then defaults), equip, resource preparation, script
    /// compilation, the effect and any chained encounters, the post hook,
    /// attempt accounting and limit checks. The cache is invalidated after
    /// every world-changing phase.
    ///
    /// # Errors
    ///
    /// Every error is fatal for the run. Nothing is retried or rolled back.
    pub fn execute(&mut self, selection: Selection) -> Result<StepRecord> {
        let Self {
            ref mut world,
            ref graph,
            ref registry,
            ref kit,
            ref options,
            ref default_equipment,
            ref mut cache,
            ref mut state,
            ref mut history,
            ..
        } = *self;

        let index = selection.index;
        let job = graph.job(index);
        let name = &job.name;
        let fail = |source| PlanError::world(name, source);

        info!(step = history.len() + 1, job = %name, priority = %selection.priority, "executing job");

        // Acquisitions
        for acquisition in &job.acquire {
            let acquired = world
                .acquire(&acquisition.item, acquisition.quantity, acquisition.max_price)
                .map_err(fail)?;
            if acquired {
                continue;
            }
            if !acquisition.optional {
                return Err(PlanError::Acquisition {
                    job: name.clone(),
                    item: acquisition.item.clone(),
                });
            }
            warn!(job = %name, item = %acquisition.item, "optional acquisition failed");
        }
        if !job.acquire.is_empty() {
            cache.invalidate();
        }

        // Choices
        let choices: Vec<(u32, u32)> = {
            let ctx = PlanContext::new(&*world, cache, options);
            job.choices
                .iter()
                .map(|(choice, option)| (*choice, option.evaluate(&ctx)))
                .collect()
        };
        for (choice, option) in choices {
            world.set_choice(choice, option).map_err(fail)?;
        }

        // Loadout and allocation
        let mut loadout = Loadout::new();
        loadout.avoid(job.outfit.avoid);
        for requirement in &job.outfit.equip {
            loadout
                .place(requirement)
                .map_err(|slots| PlanError::LoadoutConflict {
                    job: name.clone(),
                    item: requirement.item.clone(),
                    slots,
                })?;
        }

        let (free, bindings) = {
            let ctx = PlanContext::new(&*world, cache, options);
            if job.is_free_action(&ctx) {
                (true, Bindings::none())
            } else {
                let remaining: Vec<&Job> = graph
                    .jobs()
                    .iter()
                    .filter(|other| !other.is_complete(&ctx))
                    .collect();
                (false, allocate(registry, job, &remaining, &mut loadout, &ctx))
            }
        };
        for requirement in default_equipment {
            loadout.fill_default(requirement);
        }

        world.equip(&loadout).map_err(fail)?;
        for effect in &job.outfit.effects {
            world.apply_effect(effect).map_err(fail)?;
        }
        for resource in bindings.iter() {
            if let Some(prepare) = &resource.prepare {
                debug!(job = %name, resource = %resource.name, "preparing resource");
                prepare(&mut *world).map_err(fail)?;
            }
        }
        cache.invalidate();

        // Script
        let script = if free {
            Macro::abort_only(FREE_ACTION_ABORT)
        } else {
            let opponents = OpponentContext::new(&*world, job.location());
            compile(&job.combat, &bindings, &opponents, job.boss, kit)
        };
        debug!(job = %name, bindings = ?bindings.names(), %script, "script compiled");

        // Effect and chained encounters
        let mut encounters = Vec::new();
        match &job.effect {
            JobEffect::Visit(location) => {
                let encounter = world.visit(location, &script).map_err(fail)?;
                settle(name, &encounter, &*world)?;
                encounters.push(encounter);
            }
            JobEffect::Run(procedure) => procedure(&mut *world).map_err(fail)?,
        }
        while let Some(encounter) = world.resolve_pending(&script).map_err(fail)? {
            settle(name, &encounter, &*world)?;
            encounters.push(encounter);
        }

        if let Some(post) = &job.post {
            post(&mut *world).map_err(fail)?;
        }
        cache.invalidate();

        // Accounting
        let ignorable = !encounters.is_empty()
            && encounters
                .iter()
                .all(|encounter| !encounter.is_combat() && job.ignores_encounter(&encounter.name));
        let attempts = if ignorable {
            debug!(job = %name, "ignorable encounter, attempt not counted");
            state.mark_started(index);
            state.attempts(index)
        } else {
            state.record_attempt(index)
        };

        let completed = job.is_complete(&PlanContext::new(&*world, cache, options));
        if completed {
            info!(job = %name, attempts, "job complete");
            state.mark_completed(index);
        } else {
            let turns = job.location().map(|location| world.turns_spent(location));
            if let Err(exceeded) = job.limit.check(name, attempts, turns) {
                state.mark_limit(index, exceeded.kind);
                return Err(exceeded.into());
            }
        }

        let record = StepRecord {
            step: history.len() as u32 + 1,
            job: name.clone(),
            score: selection.priority.score(),
            reasons: selection
                .priority
                .contributions()
                .iter()
                .map(ToString::to_string)
                .collect(),
            bindings: bindings.names().into_iter().map(str::to_owned).collect(),
            free_action: free,
            script: script.to_string(),
            encounters,
            attempts,
            completed,
        };
        history.push(record.clone());
        Ok(record)
    }

    /// Runs one step regardless of stop options.
    ///
    /// # Returns
    ///
    /// `None` when no job is eligible.
    pub fn step(&mut self) -> Result<Option<StepRecord>> {
        self.observe_completions()?;
        match self.select_next() {
            Some(selection) => self.execute(selection).map(Some),
            None => Ok(None),
        }
    }

    /// Runs until nothing is eligible, a stop option fires, or an error.
    ///
    /// # Errors
    ///
    /// A [`RunFailure`] carrying the error and every step executed before it.
    pub fn run(&mut self) -> std::result::Result<RunSummary, RunFailure> {
        info!(jobs = self.graph.len(), "run started");
        match self.drive() {
            Ok(stop) => {
                let summary = self.summary(stop);
                info!(
                    steps = summary.steps.len(),
                    completed = summary.completed.len(),
                    stop = %summary.stop,
                    "run finished"
                );
                Ok(summary)
            }
            Err(error) => {
                error!(code = error.error_code(), %error, "run failed");
                Err(RunFailure {
                    steps: self.history.clone(),
                    error,
                })
            }
        }
    }

    fn drive(&mut self) -> Result<StopReason> {
        loop {
            self.observe_completions()?;

            if let Some(max) = self.options.max_steps
                && self.history.len() >= max as usize
            {
                return Ok(StopReason::MaxSteps(max));
            }

            let Some(selection) = self.select_next() else {
                return Ok(StopReason::NothingEligible);
            };

            if self.options.stop_before.as_ref() == Some(&selection.job) {
                return Ok(StopReason::StopBefore(selection.job));
            }

            self.execute(selection)?;
        }
    }

    fn summary(&self, stop: StopReason) -> RunSummary {
        let ctx = self.context();
        let (completed, remaining): (Vec<&Job>, Vec<&Job>) =
            self.graph.jobs().iter().partition(|job| job.is_complete(&ctx));

        RunSummary {
            steps: self.history.clone(),
            stop,
            completed: completed.into_iter().map(|job| job.name.clone()).collect(),
            remaining: remaining.into_iter().map(|job| job.name.clone()).collect(),
        }
    }
}

/// Checks one resolved encounter for fatal outcomes.
fn settle(job: &JobName, encounter: &Encounter, world: &dyn World) -> Result<()> {
    debug!(%job, encounter = %encounter.name, "encounter resolved");

    if world.is_incapacitated() {
        return Err(PlanError::Incapacitated { job: job.clone() });
    }
    if let EncounterKind::Combat { opponent, outcome } = &encounter.kind {
        let reason = match outcome {
            FightOutcome::Aborted(reason) => reason.clone(),
            FightOutcome::Lost => "fight lost".to_owned(),
            FightOutcome::Won | FightOutcome::Escaped | FightOutcome::Banished => return Ok(()),
        };
        return Err(PlanError::CombatAborted {
            job: job.clone(),
            opponent: Some(opponent.clone()),
            reason,
        });
    }
    Ok(())
}
