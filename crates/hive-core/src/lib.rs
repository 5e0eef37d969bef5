//! Tick orchestration for the Hive worker engine.
//!
//! This crate runs the decision engine from `hive-agents` once per worker
//! per tick, keeps the persisted per-worker memory, and keeps each role at
//! its configured population.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `hive-config.yaml` into
//!   strongly-typed structs.
//! - [`memory_store`] -- The JSON memory blob and stale-record cleanup.
//! - [`spawner`] -- Worker name allocation and the spawn planner.
//! - [`tick`] -- One tick: cleanup, spawning, and the worker loop.
//! - [`runner`] -- The async simulation loop.

pub mod config;
pub mod memory_store;
pub mod runner;
pub mod spawner;
pub mod tick;

pub use config::{ConfigError, SimulationConfig};
pub use memory_store::{MemoryError, MemoryStore};
pub use runner::{
    NoOpCallback, RunnerError, SimulationEndReason, SimulationResult, TickCallback,
    log_simulation_end, run_simulation,
};
pub use spawner::{SpawnError, allocate_name, spawn_missing};
pub use tick::{TickSummary, run_tick};
