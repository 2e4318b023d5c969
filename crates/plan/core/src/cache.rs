//! Lazily computed, explicitly invalidated facts derived from the world.
//!
//! The cache is a pure read layer. Every fact is computed on first access
//! within a step and then reused by scoring and allocation until the engine
//! calls [`WorldCache::invalidate`] after something that could change it (an
//! executed job, a prepared resource, a combat outcome).
//!
//! # Lifetime
//!
//! Reads take `&self` so the cache can sit behind a shared
//! [`crate::PlanContext`]; invalidation takes `&mut self`, which makes it
//! impossible to invalidate while a context still borrows the cache.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;

use crate::names::{Location, Opponent};
use crate::world::{TriggeredAbility, World};

/// Per-step memo of derived world facts.
#[derive(Debug, Default)]
pub struct WorldCache {
    generation: u64,
    triggered: OnceCell<Vec<TriggeredAbility>>,
    targets: RefCell<HashMap<Location, Vec<Opponent>>>,
    predictions: RefCell<HashMap<Location, Option<Opponent>>>,
}

impl WorldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of invalidations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops every memoised fact.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.triggered = OnceCell::new();
        self.targets.get_mut().clear();
        self.predictions.get_mut().clear();
        tracing::trace!(generation = self.generation, "world cache invalidated");
    }

    /// One-shot abilities already spent this run.
    pub fn triggered(&self, world: &dyn World) -> &[TriggeredAbility] {
        self.triggered.get_or_init(|| world.triggered_abilities())
    }

    /// Returns true if any spent ability targeted this opponent.
    pub fn is_banished(&self, world: &dyn World, opponent: &Opponent) -> bool {
        self.triggered(world)
            .iter()
            .any(|triggered| &triggered.target == opponent)
    }

    /// Returns true if the named ability has already been used.
    pub fn is_triggered(&self, world: &dyn World, ability: &str) -> bool {
        self.triggered(world)
            .iter()
            .any(|triggered| triggered.ability == ability)
    }

    /// Opponents at a location still needing special handling.
    pub fn special_targets(&self, world: &dyn World, location: &Location) -> Vec<Opponent> {
        self.targets
            .borrow_mut()
            .entry(location.clone())
            .or_insert_with(|| world.special_targets(location))
            .clone()
    }

    /// The predicted next opponent at a location.
    pub fn predicted(&self, world: &dyn World, location: &Location) -> Option<Opponent> {
        self.predictions
            .borrow_mut()
            .entry(location.clone())
            .or_insert_with(|| world.predict_opponent(location))
            .clone()
    }
}
