//! Serializable definitions that build planning-core values.
//!
//! Catalog files describe predicates and procedures declaratively; each spec
//! type has a `build` method that turns it into the closure-backed value the
//! planner works with.

pub mod condition;
pub mod job;
pub mod procedure;
pub mod resource;
pub mod value;

pub use condition::{ConditionSpec, PULLS_USED_COUNTER};
pub use job::{EffectSpec, JobSpec};
pub use procedure::ProcedureSpec;
pub use resource::ResourceSpec;
pub use value::ValueSpec;

#[cfg(test)]
mod tests {
    use super::*;
    use plan_core::{PlanContext, RunOptions, World, WorldCache};

    use crate::testing::MapWorld;

    #[test]
    fn conditions_combine() {
        let world = MapWorld::default().with_counter("quest.tower", 2);
        let cache = WorldCache::new();
        let options = RunOptions::default();
        let ctx = PlanContext::new(&world, &cache, &options);

        let started = ConditionSpec::CounterAtLeast("quest.tower".into(), 1);
        let finished = ConditionSpec::CounterAtLeast("quest.tower".into(), 3);
        assert!(started.evaluate(&ctx));
        assert!(!finished.evaluate(&ctx));
        let in_progress = ConditionSpec::All(vec![
            started.clone(),
            ConditionSpec::Not(Box::new(finished.clone())),
        ]);
        assert!(in_progress.evaluate(&ctx));
        assert!(!ConditionSpec::Any(vec![finished, ConditionSpec::Never]).evaluate(&ctx));
        assert!(!ConditionSpec::HaveItem("key".into()).evaluate(&ctx));
    }

    #[test]
    fn pulls_remaining_tracks_the_budget() {
        let mut world = MapWorld::default();
        let cache = WorldCache::new();
        let options = RunOptions {
            pulls: 1,
            ..RunOptions::default()
        };
        let pulls_left = ConditionSpec::PullsRemaining;
        assert!(pulls_left.evaluate(&PlanContext::new(&world, &cache, &options)));

        ProcedureSpec::Pull("star chart".into())
            .run(&mut world)
            .expect("pull succeeds");
        assert_eq!(world.counter(PULLS_USED_COUNTER), 1);
        assert_eq!(world.item_count(&"star chart".into()), 1);
        assert!(!pulls_left.evaluate(&PlanContext::new(&world, &cache, &options)));
    }

    #[test]
    fn sequence_stops_at_first_failure() {
        let mut world = MapWorld::default().refusing("diamond");
        let procedure = ProcedureSpec::Seq(vec![
            ProcedureSpec::AddCounter("steps".into(), 1),
            ProcedureSpec::Acquire {
                item: "diamond".into(),
                quantity: 1,
                max_price: None,
            },
            ProcedureSpec::AddCounter("steps".into(), 1),
        ]);

        let err = procedure.run(&mut world).expect_err("acquisition fails");
        assert!(err.message().contains("diamond"));
        assert_eq!(world.counter("steps"), 1);
    }

    #[test]
    fn conditional_value_follows_world() {
        let world = MapWorld::default().with_counter("lit", 1);
        let cache = WorldCache::new();
        let options = RunOptions::default();
        let ctx = PlanContext::new(&world, &cache, &options);

        let value = ValueSpec::When {
            condition: ConditionSpec::CounterAtLeast("lit".into(), 1),
            then: 2u32,
            otherwise: 1,
        }
        .build();
        assert!(!value.is_fixed());
        assert_eq!(value.evaluate(&ctx), 2);
    }
}
