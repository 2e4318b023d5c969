//! Composite script nodes.
//!
//! A [`Sequence`] runs its children in order and stops at the first `Halt`,
//! which is how a finished encounter short-circuits the rest of a compiled
//! script.

use crate::{Behavior, Status};

/// Executes children in order until one fails or halts.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Halt`, the sequence **stops immediately** and returns `Halt`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success` (or there are none), the sequence returns `Success`
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given children.
    ///
    /// An empty sequence is allowed and always succeeds; compiled scripts may
    /// legitimately contain empty bodies (e.g., an empty literal override).
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }

    /// Returns true if the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}
