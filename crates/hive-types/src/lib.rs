//! Shared type definitions for the Hive worker engine.
//!
//! This crate is the single source of truth for the records exchanged
//! between the world, the decision engine, and the persisted memory. The
//! memory schema flows downstream to `TypeScript` via `ts-rs` so game-side
//! scripts can read the same records.
//!
//! # Modules
//!
//! - [`ids`] -- Identifiers for targets, regions, and workers
//! - [`enums`] -- Resources, body parts, roles, target kinds, result codes
//! - [`structs`] -- Positions, stores, targets, and workers
//! - [`memory`] -- The persisted per-worker memory record

pub mod enums;
pub mod ids;
pub mod memory;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionCode, BodyPart, Job, MoveCode, Resource, Role, TargetKind};
pub use ids::{RegionId, TargetId, WorkerName};
pub use memory::WorkerMemory;
pub use structs::{CARRY_CAPACITY_PER_PART, Position, Store, Target, Worker};
