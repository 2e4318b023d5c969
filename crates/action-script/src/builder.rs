//! Builder utilities for ergonomic script construction.
//!
//! Instead of writing verbose `Box::new(Sequence::new(vec![...]))`, lowering
//! code uses shorter functions like `sequence(vec![...])`.

use crate::{Attempt, Behavior, Repeat, Sequence, When};

/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: 'static>(children: Vec<Box<dyn Behavior<C>>>) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Shorthand for `Box::new(Attempt::new(child))`.
#[inline]
pub fn attempt<C: 'static>(child: Box<dyn Behavior<C>>) -> Box<dyn Behavior<C>> {
    Box::new(Attempt::new(child))
}

/// Shorthand for `Box::new(Repeat::new(child, limit))`.
#[inline]
pub fn repeat<C: 'static>(child: Box<dyn Behavior<C>>, limit: u32) -> Box<dyn Behavior<C>> {
    Box::new(Repeat::new(child, limit))
}

/// Shorthand for `Box::new(When::new(condition, body))`.
#[inline]
pub fn when<C: 'static>(
    condition: Box<dyn Behavior<C>>,
    body: Box<dyn Behavior<C>>,
) -> Box<dyn Behavior<C>> {
    Box::new(When::new(condition, body))
}
