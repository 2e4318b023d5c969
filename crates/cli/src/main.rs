//! Command-line driver: loads a catalog and a world seed, runs the planner
//! to completion and reports every step.
mod config;
mod logging;
mod report;

use anyhow::{Context, Result};
use config::CliConfig;
use plan_content::{CatalogFactory, load_ron};
use runtime::{EngineBuilder, MemoryWorld, WorldSeed};
use tracing::{error, info};

/// World seed file inside the catalog directory.
const WORLD_FILE: &str = "world.ron";

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let session = logging::init(&config)?;

    let factory = CatalogFactory::new(&config.catalog_dir);
    let catalog = factory
        .load()
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_dir.display()))?;
    let seed: WorldSeed = load_ron(&factory.data_dir().join(WORLD_FILE), "world seed")?;

    let mut options = catalog.options;
    if let Some(max_steps) = config.max_steps {
        options.max_steps = Some(max_steps);
    }

    let mut engine = EngineBuilder::new()
        .jobs(catalog.jobs)
        .route(catalog.route)
        .resources(catalog.resources)
        .kit(catalog.kit)
        .options(options)
        .default_equipment(catalog.default_equipment)
        .build(MemoryWorld::new(seed))
        .context("Invalid catalog")?;

    match engine.run() {
        Ok(summary) => {
            print!("{summary}");
            let path = session.dir.join(report::SUMMARY_FILE);
            report::write_summary(&path, &summary)?;
            info!(session = %session.id, summary = %path.display(), "run complete");
            Ok(())
        }
        Err(failure) => {
            for step in &failure.steps {
                println!("{step}");
            }
            error!(
                session = %session.id,
                code = failure.error_code(),
                category = ?failure.category(),
                "run stopped"
            );
            Err(failure.into())
        }
    }
}
