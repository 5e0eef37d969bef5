//! World interfaces and the simulated world for the Hive worker engine.
//!
//! The decision engine only talks to the world through the traits in
//! [`interface`]. [`sim::SimWorld`] implements them over in-memory region
//! grids so the engine can run, and be tested, without a game server.
//!
//! # Modules
//!
//! - [`error`] -- World construction errors
//! - [`grid`] -- Region grids and breadth-first path search
//! - [`interface`] -- Query, action, movement, and lifecycle traits
//! - [`sim`] -- The deterministic in-memory world
//! - [`layout`] -- Seeded colony generation

pub mod error;
pub mod grid;
pub mod interface;
pub mod layout;
pub mod sim;

pub use error::WorldError;
pub use grid::Grid;
pub use interface::{
    FindScope, Lifecycle, Movement, Simulation, SpawnCode, SpawnRequest, VisualHint,
    WorkerActions, World, WorldQuery,
};
pub use layout::{ColonyLayout, LayoutParams, create_colony};
pub use sim::SimWorld;
