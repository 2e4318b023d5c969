mod common;

use common::{progress, reached, seed};
use plan_core::combat::Step;
use plan_core::{
    Acquisition, CombatPolicy, CombatRate, EquipRequirement, ErrorCategory, Item, Job, JobEffect,
    Outfit, PlanError, Resource, ResourceCategory, ResourceRegistry, SlotSet, Strategy, Value,
    World,
};
use runtime::{EngineBuilder, MemoryWorld, WorldSeed};

fn market() -> WorldSeed {
    seed()
        .with_location("market", vec![progress("A Busy Stall", "market.done")])
        .with_price("torch", 30)
        .with_meat(50)
}

fn shop() -> Job {
    Job::visit("shop", "market", reached("market.done", 1))
}

#[test]
fn acquisitions_buy_before_the_visit() {
    let mut engine = EngineBuilder::new()
        .job(shop().with_acquire(Acquisition::new("torch")))
        .build(MemoryWorld::new(market()))
        .expect("valid catalog");

    engine.run().expect("run succeeds");

    assert_eq!(engine.world().item_count(&Item::from("torch")), 1);
    assert_eq!(engine.world().meat(), 20);
}

#[test]
fn optional_acquisitions_may_fail() {
    let mut engine = EngineBuilder::new()
        .job(shop().with_acquire(Acquisition::new("crown").optional()))
        .build(MemoryWorld::new(market()))
        .expect("valid catalog");

    let summary = engine.run().expect("run succeeds");

    assert_eq!(summary.steps.len(), 1);
    assert!(summary.steps[0].completed);
}

#[test]
fn mandatory_acquisition_failure_is_fatal() {
    let mut engine = EngineBuilder::new()
        .job(shop().with_acquire(Acquisition::new("torch").with_max_price(10)))
        .build(MemoryWorld::new(market()))
        .expect("valid catalog");

    let failure = engine.run().expect_err("too expensive");

    assert!(failure.steps.is_empty());
    assert_eq!(failure.category(), ErrorCategory::Acquisition);
    assert!(matches!(failure.error, PlanError::Acquisition { ref item, .. } if item == "torch"));
    assert_eq!(engine.world().meat(), 50);
}

#[test]
fn choices_are_set_before_the_visit() {
    let world = MemoryWorld::new(market().with_item("map", 1));
    let mut engine = EngineBuilder::new()
        .job(
            shop()
                .with_choice(502, Value::Fixed(2))
                .with_choice(
                    503,
                    Value::computed(|ctx| if ctx.has_item(&Item::from("map")) { 1 } else { 3 }),
                ),
        )
        .build(world)
        .expect("valid catalog");

    engine.run().expect("run succeeds");

    assert_eq!(engine.world().choice(502), Some(2));
    assert_eq!(engine.world().choice(503), Some(1));
}

#[test]
fn outfits_are_equipped_and_effects_applied() {
    let mut world = market().with_item("lantern", 1);
    world
        .rate_effects
        .insert("Smooth Movements".into(), CombatRate::Decreased);
    let outfit = Outfit::new()
        .with_equip("lantern", SlotSet::OFF_HAND)
        .with_effect("Smooth Movements");
    let mut engine = EngineBuilder::new()
        .job(shop().with_outfit(outfit))
        .build(MemoryWorld::new(world))
        .expect("valid catalog");

    engine.run().expect("run succeeds");

    let world = engine.world();
    assert!(world.is_equipped(&Item::from("lantern")));
    assert!(world.has_effect("Smooth Movements"));
    assert_eq!(world.combat_rate(), Some(CombatRate::Decreased));
}

#[test]
fn default_equipment_fills_only_free_slots() {
    let world = market()
        .with_item("lucky hat", 1)
        .with_location("vault", vec![progress("A Vault", "vault.done")]);
    let mut engine = EngineBuilder::new()
        .job(shop().with_outfit(Outfit::new().with_avoid(SlotSet::HAT)))
        .job(Job::visit("vault", "vault", reached("vault.done", 1)).with_after(["shop"]))
        .default_equipment(vec![EquipRequirement::new("lucky hat", SlotSet::HAT)])
        .build(MemoryWorld::new(world))
        .expect("valid catalog");

    engine.step().expect("shop step").expect("a job ran");
    assert!(engine.world().equipped().is_empty());

    engine.step().expect("vault step").expect("a job ran");
    assert!(engine.world().is_equipped(&Item::from("lucky hat")));
}

#[test]
fn conflicting_outfit_is_a_defect() {
    let world = market().with_item("cap", 1).with_item("crown", 1);
    let outfit = Outfit::new()
        .with_equip("cap", SlotSet::HAT)
        .with_equip("crown", SlotSet::HAT);
    let mut engine = EngineBuilder::new()
        .job(shop().with_outfit(outfit))
        .build(MemoryWorld::new(world))
        .expect("valid catalog");

    let failure = engine.run().expect_err("both want the hat slot");

    assert_eq!(failure.error_code(), "loadout.conflict");
    assert_eq!(failure.category(), ErrorCategory::Defect);
}

#[test]
fn equipping_unowned_items_is_a_world_failure() {
    let outfit = Outfit::new().with_equip("crown", SlotSet::HAT);
    let mut engine = EngineBuilder::new()
        .job(shop().with_outfit(outfit))
        .build(MemoryWorld::new(market()))
        .expect("valid catalog");

    let failure = engine.run().expect_err("crown not owned");

    assert_eq!(failure.error_code(), "world");
    assert!(failure.error.to_string().contains("crown"));
}

#[test]
fn procedures_and_post_hooks_run() {
    let job = Job::new(
        "ring bell",
        reached("rung", 1),
        JobEffect::Run(Box::new(|world: &mut dyn World| world.set_counter("rung", 1))),
    )
    .with_post(Box::new(|world: &mut dyn World| {
        world.set_counter("echo", 1)
    }));
    let mut engine = EngineBuilder::new()
        .job(job)
        .build(MemoryWorld::new(market()))
        .expect("valid catalog");

    let summary = engine.run().expect("run succeeds");

    assert_eq!(summary.steps.len(), 1);
    assert!(summary.steps[0].encounters.is_empty());
    assert_eq!(summary.steps[0].attempts, 1);
    assert_eq!(engine.world().counter("echo"), 1);
}

#[test]
fn bound_resources_are_prepared() {
    let snokebomb = Resource::new(
        "Snokebomb",
        ResourceCategory::Banish,
        vec![Step::skill("Snokebomb")],
    )
    .with_prepare(Box::new(|world: &mut dyn World| {
        world.set_counter("prepared", 1)
    }));
    let mut engine = EngineBuilder::new()
        .job(shop().with_combat(CombatPolicy::new().with("goblin", Strategy::Banish)))
        .resources(ResourceRegistry::new().with(snokebomb))
        .build(MemoryWorld::new(market()))
        .expect("valid catalog");

    let record = engine.step().expect("step succeeds").expect("a job ran");

    assert_eq!(record.bindings, ["Snokebomb"]);
    assert_eq!(engine.world().counter("prepared"), 1);
}
