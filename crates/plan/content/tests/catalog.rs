use std::fs;

use plan_content::CatalogFactory;
use plan_core::{ResourceCategory, RouteOrder, SlotSet, Strategy, TaskGraph};
use tempfile::TempDir;

const JOBS: &str = r#"(
    jobs: [
        (
            name: "key",
            completed: have_item("vault key"),
            effect: visit("gatehouse"),
        ),
        (
            name: "vault",
            after: ["key"],
            completed: counter_at_least("vault.opened", 1),
            combat: (entries: [("guard", banish)]),
            limit: (tries: 5, message: "is the key missing?"),
            effect: visit("vault"),
            boss: true,
        ),
        (
            name: "shop",
            completed: have_item("torch"),
            free_action: always,
            effect: run(acquire(item: "torch")),
        ),
    ],
)"#;

const RESOURCES: &str = r#"(
    resources: [
        (
            name: "Spring Kick",
            category: banish,
            available: have_item("spring shoes"),
            equip: (item: "spring shoes", slots: "ACC1 | ACC2 | ACC3"),
            steps: [skill("Spring Kick")],
        ),
        (
            name: "Kramco",
            category: wanderer,
            chance: fixed(1.0),
            opponents: ["goblin"],
        ),
    ],
)"#;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("write catalog file");
}

#[test]
fn loads_a_complete_catalog() {
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "jobs.ron", JOBS);
    write(&dir, "resources.ron", RESOURCES);
    write(&dir, "route.ron", r#"(order: ["shop"])"#);
    write(&dir, "options.toml", "pulls = 5\nwanderers = false\n");
    write(
        &dir,
        "kit.toml",
        r#"
[combat]
elemental_kill = "Stuffed Mortar Shell"
resistance_threshold = 40

[[equipment]]
item = "lucky hat"
slots = "HAT"
"#,
    );

    let catalog = CatalogFactory::new(dir.path()).load().expect("catalog loads");

    assert_eq!(catalog.jobs.len(), 3);
    let vault = &catalog.jobs[1];
    assert_eq!(vault.after.len(), 1);
    assert!(vault.boss);
    assert_eq!(vault.limit.tries, Some(5));
    assert_eq!(vault.limit.message.as_deref(), Some("is the key missing?"));
    assert_eq!(vault.combat.strategy_for(&"guard".into()), &Strategy::Banish);

    assert_eq!(catalog.resources.len(), 2);
    let kick = catalog.resources.get("Spring Kick").expect("banish registered");
    assert_eq!(kick.category, ResourceCategory::Banish);
    assert_eq!(kick.equip.as_ref().map(|e| e.slots), Some(SlotSet::ACCESSORY));

    assert!(!catalog.options.wanderers);
    assert_eq!(catalog.options.pulls, 5);
    assert_eq!(catalog.kit.resistance_threshold, 40);
    assert_eq!(catalog.kit.physical_kill, "Lunging Thrust-Smack");
    assert_eq!(catalog.default_equipment.len(), 1);

    let graph = TaskGraph::new(catalog.jobs).expect("graph is valid");
    let route = RouteOrder::new(&graph, &catalog.route).expect("route is valid");
    let order: Vec<_> = route.iter().map(|i| graph.job(i).name.to_string()).collect();
    assert_eq!(order, ["shop", "key", "vault"]);
}

#[test]
fn optional_files_fall_back_to_defaults() {
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "jobs.ron", JOBS);

    let catalog = CatalogFactory::new(dir.path()).load().expect("catalog loads");

    assert!(catalog.resources.is_empty());
    assert!(catalog.route.is_empty());
    assert!(catalog.options.wanderers);
    assert!(catalog.default_equipment.is_empty());
}

#[test]
fn missing_jobs_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");

    let err = CatalogFactory::new(dir.path()).load().expect_err("jobs.ron is required");
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn malformed_jobs_report_the_catalog() {
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "jobs.ron", "(jobs: [(name: \"x\")])");

    let err = CatalogFactory::new(dir.path()).load().expect_err("missing fields");
    assert!(err.to_string().contains("job catalog"));
}

#[test]
fn duplicate_resources_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    write(&dir, "jobs.ron", JOBS);
    write(
        &dir,
        "resources.ron",
        r#"(resources: [
            (name: "Snokebomb", category: banish),
            (name: "Snokebomb", category: banish),
        ])"#,
    );

    let err = CatalogFactory::new(dir.path()).load().expect_err("duplicate");
    assert!(err.to_string().contains("Duplicate resource"));
}
