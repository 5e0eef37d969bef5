//! Task executors.
//!
//! Every executor follows the same shape: resolve a target, persist its id
//! in the matching memory slot, try the in-range action, and walk toward
//! the target when out of range. Each returns a [`TaskStatus`] telling the
//! caller whether the worker's tick is used up.
//!
//! # Submodules
//!
//! - [`gather`] -- Acquire energy from piles, containers, or sources
//! - [`deposit`] -- Refill spawns, extensions, and towers
//! - [`build`] -- Work on construction sites
//! - [`upgrade`] -- Upgrade the home controller

pub mod build;
pub mod deposit;
pub mod gather;
pub mod upgrade;

pub use build::build;
pub use deposit::deposit;
pub use gather::gather;
pub use upgrade::upgrade;

use hive_types::WorkerMemory;
use tracing::{debug, info};

use crate::context::{TaskStatus, WorkerContext};
use crate::travel::TravelOutcome;

/// A target slot in [`WorkerMemory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Resource,
    Build,
    Deposit,
}

impl Slot {
    pub(crate) const fn clear(self, memory: &mut WorkerMemory) {
        match self {
            Self::Resource => memory.current_resource_target_id = None,
            Self::Build => memory.current_build_target_id = None,
            Self::Deposit => memory.current_deposit_target_id = None,
        }
    }
}

/// Map a travel outcome to a task status. On escalation `slot` is cleared
/// so the next selection starts fresh.
pub(crate) fn settle_travel(
    ctx: &mut WorkerContext<'_>,
    outcome: TravelOutcome,
    slot: Option<Slot>,
) -> TaskStatus {
    match outcome {
        TravelOutcome::Moved | TravelOutcome::Blocked { .. } => TaskStatus::Consumed,
        TravelOutcome::Escalate => {
            if let Some(slot) = slot {
                slot.clear(ctx.memory);
            }
            info!(worker = %ctx.name, "Blocked - abandoning target");
            TaskStatus::Available
        }
        TravelOutcome::Fatal => ctx.terminate("No bodypart for moving"),
        TravelOutcome::Other(code) => {
            debug!(worker = %ctx.name, ?code, "Movement failed");
            TaskStatus::Available
        }
    }
}
