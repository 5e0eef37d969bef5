//! Engine binary for the Hive worker simulation.
//!
//! Wires the configuration, a seeded colony world, and the tick loop
//! together, then runs until the tick limit is reached.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hive-config.yaml` (defaults when absent)
//! 2. Initialize structured logging (tracing), honoring `HIVE_LOG`
//! 3. Generate the colony from the configured seed
//! 4. Run the simulation loop
//! 5. Log the result

mod error;
mod progress;

use std::path::Path;

use hive_core::{MemoryStore, SimulationConfig, log_simulation_end, run_simulation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress::ProgressCallback;

/// Ticks between colony reports.
const REPORT_EVERY: u64 = 100;

/// Application entry point for the Hive engine.
///
/// # Errors
///
/// Returns an error if configuration, world generation, or the simulation
/// itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config);
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.world.max_ticks,
        "Configuration loaded"
    );

    // 3. Generate the colony.
    let mut rng = StdRng::seed_from_u64(config.world.seed);
    let (mut world, layout) =
        hive_world::create_colony(&config.world.layout(), &mut rng).map_err(EngineError::from)?;
    info!(
        regions = layout.regions.len(),
        sources = layout.sources.len(),
        spawn = %layout.spawn,
        "Colony created"
    );

    // 4. Run the simulation.
    let mut callback = ProgressCallback::new(REPORT_EVERY);
    let result = run_simulation(&mut world, MemoryStore::new(), &config, &mut callback)
        .await
        .map_err(EngineError::from)?;

    // 5. Log results.
    log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "hive-engine shutdown complete"
    );

    Ok(())
}

/// Install the tracing subscriber. `HIVE_LOG` overrides the configured
/// level.
fn init_logging(config: &SimulationConfig) {
    let filter = EnvFilter::try_from_env("HIVE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the simulation configuration from `hive-config.yaml`.
///
/// Looks for the config file relative to the current working directory and
/// falls back to the defaults when it is absent.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new("hive-config.yaml");
    if config_path.exists() {
        Ok(SimulationConfig::from_file(config_path)?)
    } else {
        Ok(SimulationConfig::default())
    }
}
