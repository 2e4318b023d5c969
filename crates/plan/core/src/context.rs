//! Planning context shared by predicates, scoring and allocation.

use crate::cache::WorldCache;
use crate::names::{Item, Location, Opponent, Skill};
use crate::options::RunOptions;
use crate::world::World;

/// Read-only view handed to every predicate and computed value.
///
/// # Design
///
/// The context bundles the three inputs every planning decision needs:
///
/// 1. **World**: live queries against the game
/// 2. **Cache**: memoised derived facts, valid for the current step
/// 3. **Options**: per-run knobs (pulls, wanderers)
///
/// # Lifetime
///
/// The `'a` lifetime ties the context to the world and cache it borrows.
/// A new context is created for every step, after the engine has
/// invalidated the cache if needed.
#[derive(Clone, Copy)]
pub struct PlanContext<'a> {
    pub world: &'a dyn World,
    pub cache: &'a WorldCache,
    pub options: &'a RunOptions,
}

impl<'a> PlanContext<'a> {
    pub fn new(world: &'a dyn World, cache: &'a WorldCache, options: &'a RunOptions) -> Self {
        Self {
            world,
            cache,
            options,
        }
    }

    // ========================================================================
    // Shorthands used by predicates
    // ========================================================================

    pub fn counter(&self, name: &str) -> i64 {
        self.world.counter(name)
    }

    pub fn item_count(&self, item: &Item) -> u32 {
        self.world.item_count(item)
    }

    pub fn has_item(&self, item: &Item) -> bool {
        self.world.item_count(item) > 0
    }

    pub fn has_skill(&self, skill: &Skill) -> bool {
        self.world.has_skill(skill)
    }

    pub fn turns_spent(&self, location: &Location) -> u32 {
        self.world.turns_spent(location)
    }

    pub fn is_banished(&self, opponent: &Opponent) -> bool {
        self.cache.is_banished(self.world, opponent)
    }

    pub fn is_triggered(&self, ability: &str) -> bool {
        self.cache.is_triggered(self.world, ability)
    }

    pub fn predicted(&self, location: &Location) -> Option<Opponent> {
        self.cache.predicted(self.world, location)
    }

    pub fn special_targets(&self, location: &Location) -> Vec<Opponent> {
        self.cache.special_targets(self.world, location)
    }
}
