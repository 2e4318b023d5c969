//! Combat policies, compiled scripts and their execution.
//!
//! # Architecture
//!
//! - [`Strategy`] / [`CombatPolicy`]: what a job intends per opponent
//! - [`CombatKit`]: the skills strategies resolve to
//! - [`compile`]: policy + bindings → [`Macro`]
//! - [`lower`]: [`Macro`] → action-script nodes run against a [`CombatRound`]

pub mod compile;
pub mod kit;
pub mod lower;
pub mod script;
pub mod strategy;

pub use compile::{OpponentContext, compile};
pub use kit::{CombatKit, needs_hard_kill};
pub use lower::{CombatRound, MAX_ROUNDS, RoundAction, RoundResult, lower, run};
pub use script::{Block, Condition, Macro, Step};
pub use strategy::{CombatPolicy, Strategy};
