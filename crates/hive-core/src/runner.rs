//! Simulation loop runner.
//!
//! [`run_simulation`] drives the tick loop: run one [`run_tick`], notify the
//! callback, advance the world, then sleep for the configured interval.
//! Worker memory crosses tick boundaries only as its serialized JSON blob,
//! the same way it would be persisted between game ticks, so every tick
//! starts from what a fresh process would read back.
//!
//! [`run_tick`]: crate::tick::run_tick

use hive_world::{Lifecycle, Simulation, WorldQuery};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::memory_store::{MemoryError, MemoryStore};
use crate::tick::{self, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The memory blob could not be written or read back.
    #[error("memory error: {source}")]
    Memory {
        /// The underlying memory error.
        #[from]
        source: MemoryError,
    },
}

/// Why a simulation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// No workers and no spawns are left, so nothing can change.
    Deserted,
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Worker memory as of the end of the last tick.
    pub memory: MemoryStore,
}

/// Callback invoked after each tick completes.
pub trait TickCallback: Send {
    /// Called after a tick completes, before the world advances.
    fn on_tick(&mut self, summary: &TickSummary, memory: &MemoryStore);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _memory: &MemoryStore) {}
}

/// Run the simulation loop until the tick limit is reached or the colony
/// is deserted. A `max_ticks` of zero runs until deserted.
///
/// # Errors
///
/// Returns [`RunnerError::Memory`] if the memory blob cannot be
/// round-tripped between ticks.
pub async fn run_simulation<S: Simulation>(
    world: &mut S,
    memory: MemoryStore,
    config: &SimulationConfig,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let max_ticks = config.world.max_ticks;
    let interval_ms = config.world.tick_interval_ms;
    let mut blob = memory.to_json()?;
    let mut total_ticks: u64 = 0;

    info!(
        name = %config.world.name,
        max_ticks,
        tick_interval_ms = interval_ms,
        "Simulation starting"
    );

    loop {
        let mut store = MemoryStore::from_json(&blob)?;
        let summary = tick::run_tick(world, &mut store, config);
        total_ticks = total_ticks.saturating_add(1);
        blob = store.to_json()?;

        callback.on_tick(&summary, &store);
        world.advance();

        if world.worker_names().is_empty() && world.spawns().is_empty() {
            info!(tick = summary.tick, "No workers or spawns left");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::Deserted,
                final_summary: Some(summary),
                total_ticks,
                memory: store,
            });
        }

        if max_ticks > 0 && total_ticks >= max_ticks {
            info!(tick = summary.tick, max_ticks, "Tick limit reached");
            return Ok(SimulationResult {
                end_reason: SimulationEndReason::MaxTicksReached,
                final_summary: Some(summary),
                total_ticks,
                memory: store,
            });
        }

        if interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(interval_ms)).await;
        }
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        workers_remembered = result.memory.len(),
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            processed = summary.processed,
            acted = summary.acted,
            died = summary.died.len(),
            terminated = summary.terminated.len(),
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
