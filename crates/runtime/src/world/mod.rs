//! In-memory world used by the driver and the integration tests.
//!
//! - [`seed`] describes a starting state that can be written as RON
//! - [`memory`] implements [`plan_core::World`] over that state
//! - [`fight`] resolves one fight round by round from a compiled script
mod fight;
mod memory;
mod seed;

pub use fight::{Combatant, Fight};
pub use memory::MemoryWorld;
pub use seed::{
    DEFAULT_HEALTH, LocationSpec, OpponentSpec, ScriptedEncounter, Technique, WandererSpec,
    WorldSeed,
};
