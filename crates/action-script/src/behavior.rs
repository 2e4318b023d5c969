//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, the abstraction shared by all
//! script nodes. The trait is generic over a context type `C`, which is the
//! encounter being resolved: nodes read it to test conditions and mutate it to
//! perform actions.

use crate::Status;

/// A script node that can be evaluated against an encounter context.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the encounter. Action nodes spend
    ///   rounds through it; condition nodes only read it.
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the node did what it describes
    /// - `Status::Failure` if it could not
    /// - `Status::Halt` if the encounter ended or the script must stop
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
