//! Step-by-step execution of a job plan against a [`plan_core::World`].
//!
//! The [`Engine`] owns the world, the task graph and the per-run state, and
//! repeats select, prepare, execute and record until nothing is eligible or
//! a stop condition is hit.
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the selection loop and its builder
//! - [`state`] tracks status and attempt counts per job
//! - [`summary`] records what each step did
//! - [`world`] provides a deterministic in-memory world
pub mod engine;
pub mod error;
pub mod state;
pub mod summary;
pub mod world;

pub use engine::{Engine, EngineBuilder, FREE_ACTION_ABORT, Selection};
pub use error::RunFailure;
pub use state::{JobRecord, RunState};
pub use summary::{RunSummary, StepRecord, StopReason};
pub use world::{
    LocationSpec, MemoryWorld, OpponentSpec, ScriptedEncounter, Technique, WandererSpec,
    WorldSeed,
};
