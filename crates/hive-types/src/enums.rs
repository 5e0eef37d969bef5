//! Enumeration types for the Hive worker engine.
//!
//! Resources, body parts, roles, target kinds, jobs, and the closed sets of
//! result codes returned by the action and movement interfaces.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources and bodies
// ---------------------------------------------------------------------------

/// A resource a worker can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// The universal currency: harvested from sources, spent on building,
    /// upgrading, and refilling structures.
    Energy,
    /// Raw hydrogen mineral.
    Hydrogen,
    /// Raw oxygen mineral.
    Oxygen,
}

/// A body part of a worker. Each part enables a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    /// Harvesting, building, and upgrading.
    Work,
    /// Carrying resources (50 units of capacity per part).
    Carry,
    /// Movement.
    Move,
}

impl BodyPart {
    /// Energy cost of creating this part.
    pub const fn cost(self) -> u32 {
        match self {
            Self::Work => 100,
            Self::Carry | Self::Move => 50,
        }
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The kind of a worker, fixed at creation.
///
/// Each variant maps to exactly one behavior policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Gathers from resource nodes and feeds structures first.
    Harvester,
    /// Acquires stored resources and prefers construction.
    Builder,
    /// Prefers upgrading the home region controller.
    Upgrader,
}

impl Role {
    /// All roles in declaration order. Spawning iterates in this order.
    pub const ALL: [Self; 3] = [Self::Harvester, Self::Builder, Self::Upgrader];

    /// Name prefix used when naming new workers of this role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Harvester => "Harvester",
            Self::Builder => "Builder",
            Self::Upgrader => "Upgrader",
        }
    }

    /// Base stroke color of this role's path visualization.
    pub const fn palette(self) -> &'static str {
        match self {
            Self::Harvester => "#800080",
            Self::Builder => "#000080",
            Self::Upgrader => "#008000",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// The class of a selectable world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A regenerating resource node workers harvest from.
    Source,
    /// A small unowned store placed next to sources.
    Container,
    /// A large owned store.
    Storage,
    /// A link structure that teleports energy between links.
    Link,
    /// A pile of resources lying on the ground.
    DroppedResource,
    /// A structure under construction.
    ConstructionSite,
    /// A spawn: creates workers and holds energy.
    Spawn,
    /// An extension: extra energy for spawning.
    Extension,
    /// A tower: holds energy for defense.
    Tower,
    /// The controller of a region.
    Controller,
}

impl TargetKind {
    /// Whether this kind is a deposit sink with bounded capacity
    /// (spawn, extension, tower).
    pub const fn is_bounded_sink(self) -> bool {
        matches!(self, Self::Spawn | Self::Extension | Self::Tower)
    }

    /// Whether this kind is a structure (as opposed to a node, pile, site,
    /// or controller).
    pub const fn is_structure(self) -> bool {
        matches!(
            self,
            Self::Container
                | Self::Storage
                | Self::Link
                | Self::Spawn
                | Self::Extension
                | Self::Tower
        )
    }
}

// ---------------------------------------------------------------------------
// Jobs and result codes
// ---------------------------------------------------------------------------

/// The kind of work a worker is doing; used to tag path visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Job {
    /// Acquiring resources.
    Harvest,
    /// Depositing into a sink.
    Recharge,
    /// Working on a construction site.
    Build,
    /// Upgrading a controller.
    Upgrade,
}

/// Result code of a worker action (`harvest`, `withdraw`, `pickup`,
/// `transfer`, `build`, `upgrade_controller`, `drop`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCode {
    /// The action was scheduled.
    Ok,
    /// The target is too far away.
    NotInRange,
    /// The source or the worker lacks the resource to act.
    NotEnoughSource,
    /// The destination (or the worker, when receiving) is full.
    Full,
    /// The target is not a valid object for this action.
    InvalidTarget,
    /// The worker has no body part enabling this action.
    NoCapability,
    /// The target belongs to someone else.
    NotOwner,
    /// The worker or target does not exist.
    NotFound,
}

/// Result code of the movement primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCode {
    /// The worker stepped toward the target.
    Ok,
    /// The worker is fatigued and cannot move this tick.
    Tired,
    /// No path to the target exists.
    NoPath,
    /// The worker has no `Move` part.
    NoCapability,
    /// Any other engine code, passed through untouched.
    Other(i32),
}
