//! One tick of the Hive engine.
//!
//! Each tick runs through these phases:
//!
//! 1. **Cleanup** -- drop memory records of workers that no longer exist.
//!
//! 2. **Spawn** -- let every idle spawn request one missing worker.
//!
//! 3. **Workers** -- for each live, fully spawned worker, in name order:
//!    - a worker with one tick or less to live drops what it carries and
//!      loses its memory;
//!    - otherwise its memory is normalized (home region, gather phase) and
//!      its role policy decides and performs at most one action.
//!
//! Advancing the world clock is left to the caller, so a tick can be run
//! against a world that advances on its own.

use std::collections::BTreeSet;

use hive_agents::{BehaviorSettings, TaskStatus, WorkerContext, policy_for};
use hive_types::{Resource, Worker, WorkerMemory, WorkerName};
use hive_world::World;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::memory_store::MemoryStore;
use crate::spawner;

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Workers the orchestrator looked at (spawned and alive).
    pub processed: u32,
    /// Workers that performed an action or a move.
    pub acted: u32,
    /// Workers that reached the end of their life this tick.
    pub died: Vec<WorkerName>,
    /// Workers that terminated themselves this tick.
    pub terminated: Vec<WorkerName>,
    /// Stale memory records removed during cleanup.
    pub memory_removed: Vec<WorkerName>,
    /// Workers whose creation started this tick.
    pub spawned: Vec<WorkerName>,
}

/// Run one tick against `world`, reading and writing `memory`.
pub fn run_tick(
    world: &mut dyn World,
    memory: &mut MemoryStore,
    config: &SimulationConfig,
) -> TickSummary {
    let mut summary = TickSummary {
        tick: world.tick(),
        ..TickSummary::default()
    };

    let live: BTreeSet<WorkerName> = world.worker_names().into_iter().collect();
    summary.memory_removed = memory.cleanup(&live);

    summary.spawned = spawner::spawn_missing(world, config);

    let settings = config.behavior.settings();
    for name in world.worker_names() {
        let Some(worker) = world.worker(&name) else {
            continue;
        };
        if worker.spawning {
            continue;
        }
        summary.processed = summary.processed.saturating_add(1);

        if worker.ticks_to_live.is_some_and(|ttl| ttl <= 1) {
            release_dying(world, memory, &name);
            summary.died.push(name);
            continue;
        }

        let role = worker.role;
        let mut record = memory.remove(&name).unwrap_or_default();
        normalize(worker, &mut record);

        match run_worker(world, &name, role, &mut record, &settings) {
            TaskStatus::Terminated => {
                summary.terminated.push(name);
            }
            status => {
                if world.worker(&name).is_some_and(|w| w.spent_turn) {
                    summary.acted = summary.acted.saturating_add(1);
                }
                debug!(worker = %name, status = ?status, "Worker done");
                memory.insert(name, record);
            }
        }
    }

    debug!(
        tick = summary.tick,
        processed = summary.processed,
        acted = summary.acted,
        died = summary.died.len(),
        spawned = summary.spawned.len(),
        "Tick complete"
    );
    summary
}

/// Drop everything a dying worker carries and forget it.
fn release_dying(world: &mut dyn World, memory: &mut MemoryStore, name: &WorkerName) {
    let carried: Vec<Resource> = world
        .worker(name)
        .map(|w| w.store.contents.keys().copied().collect())
        .unwrap_or_default();

    world.say(name, "Dying -- dropping resources");
    for resource in &carried {
        world.drop_resource(name, *resource);
    }
    memory.remove(name);
    info!(worker = %name, resources = ?carried, "Worker dying, dropped resources");
}

/// Bring a memory record in line with the worker's current state. At most
/// one gather-phase transition happens per tick.
fn normalize(worker: &Worker, memory: &mut WorkerMemory) {
    if memory.home_region_id.is_none() {
        memory.home_region_id = Some(worker.pos.region);
    }

    if !memory.needs_resource && worker.store.is_empty() {
        memory.needs_resource = true;
        memory.current_resource_target_id = None;
    } else if memory.needs_resource && worker.store.is_full() {
        memory.needs_resource = false;
        memory.current_resource_target_id = None;
    }
}

fn run_worker(
    world: &mut dyn World,
    name: &WorkerName,
    role: hive_types::Role,
    memory: &mut WorkerMemory,
    settings: &BehaviorSettings,
) -> TaskStatus {
    let mut ctx = WorkerContext {
        world,
        name,
        role,
        memory,
        settings,
    };
    policy_for(role).run(&mut ctx)
}
