//! Decorator script nodes.
//!
//! Decorators wrap a single child and change how its result is reported:
//! [`Attempt`] for best-effort steps, [`Repeat`] for round loops and
//! [`When`] for conditional blocks that fall through.

use crate::{Behavior, Status};

/// Runs its child and reports `Success` even if the child failed.
///
/// # Semantics
///
/// - `Success` or `Failure` from the child becomes `Success`
/// - `Halt` is passed through unchanged
///
/// Used for best-effort steps such as the debuff chain that precedes every
/// kill: each debuff is tried, none is required.
pub struct Attempt<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Attempt<C> {
    /// Wraps the given child.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Attempt<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        match self.child.tick(ctx) {
            Status::Halt => Status::Halt,
            _ => Status::Success,
        }
    }
}

/// Ticks its child repeatedly until it stops succeeding.
///
/// # Semantics
///
/// - While the child returns `Success`, tick it again
/// - `Failure` or `Halt` from the child is returned as-is
/// - After `limit` successful ticks the loop gives up and returns `Failure`
///
/// The limit mirrors the hard round cap of an encounter; a loop that never
/// ends the encounter is a failed loop.
pub struct Repeat<C> {
    child: Box<dyn Behavior<C>>,
    limit: u32,
}

impl<C> Repeat<C> {
    /// Wraps the given child with an iteration limit.
    pub fn new(child: Box<dyn Behavior<C>>, limit: u32) -> Self {
        Self { child, limit }
    }

    /// Maximum number of successful ticks before giving up.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl<C> Behavior<C> for Repeat<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for _ in 0..self.limit {
            match self.child.tick(ctx) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}

/// Runs `body` only when `condition` holds; otherwise falls through.
///
/// # Semantics
///
/// - Condition `Success`: returns whatever the body returns
/// - Condition `Failure`: the block is skipped and reports `Success`, so a
///   surrounding [`crate::Sequence`] moves on to the next block
/// - Condition `Halt`: returns `Halt`
pub struct When<C> {
    condition: Box<dyn Behavior<C>>,
    body: Box<dyn Behavior<C>>,
}

impl<C> When<C> {
    /// Creates a conditional block.
    pub fn new(condition: Box<dyn Behavior<C>>, body: Box<dyn Behavior<C>>) -> Self {
        Self { condition, body }
    }
}

impl<C> Behavior<C> for When<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        match self.condition.tick(ctx) {
            Status::Success => self.body.tick(ctx),
            Status::Failure => Status::Success,
            Status::Halt => Status::Halt,
        }
    }
}
