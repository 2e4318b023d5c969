//! Round-by-round action script nodes.
//!
//! Compiled combat policies are lowered into a tree of these nodes and then
//! ticked once against an encounter context. Every tick completes
//! immediately; there is no `Running` state.
//!
//! - **Three outcomes**: a node succeeds, fails, or halts the whole script
//! - **Halt propagates**: once the encounter ends (or an abort fires), no
//!   composite keeps evaluating its remaining children
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure, or Halt
//! - Composite node: [`Sequence`]
//! - Decorator nodes: [`Attempt`], [`Repeat`], [`When`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::Sequence;
pub use decorator::{Attempt, Repeat, When};
pub use status::Status;
