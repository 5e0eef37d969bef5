//! Decision engine for Hive workers.
//!
//! Given one worker, its memory record, and the world, this crate decides
//! and performs at most one action for the current tick. It never touches
//! persistence or scheduling; `hive-core` drives it once per worker.
//!
//! # Modules
//!
//! - [`context`] -- The per-worker view and [`TaskStatus`]
//! - [`settings`] -- Behavior thresholds ([`BehaviorSettings`])
//! - [`selector`] -- Priority-ordered target selection
//! - [`travel`] -- The movement adapter and blocked-target escalation
//! - [`tasks`] -- Gather, deposit, build, and upgrade executors
//! - [`continuation`] -- Resuming remembered targets
//! - [`policy`] -- Per-role decision tables

pub mod context;
pub mod continuation;
pub mod policy;
pub mod selector;
pub mod settings;
pub mod tasks;
pub mod travel;

pub use context::{TaskStatus, WorkerContext};
pub use policy::{Policy, Step, policy_for};
pub use selector::GatherOptions;
pub use settings::BehaviorSettings;
pub use travel::TravelOutcome;
