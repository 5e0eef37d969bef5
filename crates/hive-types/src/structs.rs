//! Core records: positions, stores, targets, and workers.
//!
//! These are the read models the world hands to the decision engine. The
//! world owns them; the engine reads them and mutates only the behavioral
//! fields of [`Worker`] (the spent-turn flag).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{BodyPart, Resource, Role, TargetKind};
use crate::ids::{RegionId, TargetId, WorkerName};

/// Carry capacity contributed by each `Carry` part.
pub const CARRY_CAPACITY_PER_PART: u32 = 50;

/// A tile in a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// The region the tile belongs to.
    pub region: RegionId,
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Position {
    /// Create a position.
    pub const fn new(region: RegionId, x: u32, y: u32) -> Self {
        Self { region, x, y }
    }

    /// Chebyshev distance to `other`, or `None` across regions.
    pub fn range_to(&self, other: &Self) -> Option<u32> {
        if self.region != other.region {
            return None;
        }
        Some(self.x.abs_diff(other.x).max(self.y.abs_diff(other.y)))
    }

    /// Whether `other` is within `range` tiles in the same region.
    pub fn in_range_to(&self, other: &Self, range: u32) -> bool {
        self.range_to(other).is_some_and(|r| r <= range)
    }
}

/// A bounded resource store.
///
/// `capacity` bounds the sum of all resource amounts. A capacity of zero
/// means the store is not meant to hold anything (for example a
/// construction site).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Resource amounts held.
    pub contents: BTreeMap<Resource, u32>,
    /// Maximum total amount.
    pub capacity: u32,
}

impl Store {
    /// An empty store with the given capacity.
    pub const fn with_capacity(capacity: u32) -> Self {
        Self {
            contents: BTreeMap::new(),
            capacity,
        }
    }

    /// A store pre-filled with `amount` of `resource`.
    pub fn filled(resource: Resource, amount: u32, capacity: u32) -> Self {
        let mut store = Self::with_capacity(capacity);
        if amount > 0 {
            store.contents.insert(resource, amount.min(capacity));
        }
        store
    }

    /// Amount of `resource` held.
    pub fn get(&self, resource: Resource) -> u32 {
        self.contents.get(&resource).copied().unwrap_or(0)
    }

    /// Total amount held across all resources.
    pub fn used(&self) -> u32 {
        self.contents
            .values()
            .fold(0_u32, |acc, qty| acc.saturating_add(*qty))
    }

    /// Remaining room.
    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.used())
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.used() == 0
    }

    /// Whether no room is left.
    pub fn is_full(&self) -> bool {
        self.free() == 0
    }

    /// Add up to `amount` of `resource`, clamped to free room. Returns the
    /// amount actually added.
    pub fn add(&mut self, resource: Resource, amount: u32) -> u32 {
        let added = amount.min(self.free());
        if added > 0 {
            let entry = self.contents.entry(resource).or_insert(0);
            *entry = entry.saturating_add(added);
        }
        added
    }

    /// Remove up to `amount` of `resource`. Returns the amount actually
    /// removed; the key is dropped when it reaches zero.
    pub fn remove(&mut self, resource: Resource, amount: u32) -> u32 {
        let current = self.get(resource);
        let removed = amount.min(current);
        let remaining = current.saturating_sub(removed);
        if remaining == 0 {
            self.contents.remove(&resource);
        } else {
            self.contents.insert(resource, remaining);
        }
        removed
    }

    /// Take everything out of the store.
    pub fn drain(&mut self) -> BTreeMap<Resource, u32> {
        core::mem::take(&mut self.contents)
    }
}

/// A selectable world object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Stable identifier.
    pub id: TargetId,
    /// Object class.
    pub kind: TargetKind,
    /// Where the object is.
    pub pos: Position,
    /// Held resources. For a source this is its remaining energy; for a
    /// dropped resource, the pile itself.
    pub store: Store,
    /// Whether the object belongs to us.
    pub owned: bool,
    /// Build progress for sites, upgrade progress for controllers.
    pub progress: u32,
    /// Progress needed to finish a site or reach the next controller level.
    pub progress_total: u32,
    /// Structure a construction site turns into once finished.
    pub builds_into: Option<TargetKind>,
}

impl Target {
    /// Create a target with an empty store.
    pub const fn new(id: TargetId, kind: TargetKind, pos: Position, owned: bool) -> Self {
        Self {
            id,
            kind,
            pos,
            store: Store::with_capacity(0),
            owned,
            progress: 0,
            progress_total: 0,
            builds_into: None,
        }
    }

    /// Attach a store to the target.
    #[must_use]
    pub fn with_store(mut self, store: Store) -> Self {
        self.store = store;
        self
    }

    /// Whether a source still has energy to harvest.
    pub fn is_active(&self) -> bool {
        self.kind == TargetKind::Source && self.store.get(Resource::Energy) > 0
    }
}

/// A mobile agent controlled by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique name; keys the memory record.
    pub name: WorkerName,
    /// Kind of the worker, set at creation.
    pub role: Role,
    /// Current tile.
    pub pos: Position,
    /// Body composition.
    pub body: Vec<BodyPart>,
    /// Carried resources.
    pub store: Store,
    /// Ticks until the worker expires; `None` while still being created.
    pub ticks_to_live: Option<u32>,
    /// Whether the worker is still materializing at its spawn.
    pub spawning: bool,
    /// Whether the worker already used this tick's action.
    pub spent_turn: bool,
    /// Movement fatigue; the worker cannot move while above zero.
    pub fatigue: u32,
}

impl Worker {
    /// Create a live worker with a store sized by its `Carry` parts.
    pub fn new(name: WorkerName, role: Role, pos: Position, body: Vec<BodyPart>) -> Self {
        let carry_parts = u32::try_from(body.iter().filter(|p| **p == BodyPart::Carry).count())
            .unwrap_or(u32::MAX);
        Self {
            name,
            role,
            pos,
            store: Store::with_capacity(carry_parts.saturating_mul(CARRY_CAPACITY_PER_PART)),
            body,
            ticks_to_live: Some(1500),
            spawning: false,
            spent_turn: false,
            fatigue: 0,
        }
    }

    /// Number of parts of the given type.
    pub fn part_count(&self, part: BodyPart) -> u32 {
        u32::try_from(self.body.iter().filter(|p| **p == part).count()).unwrap_or(u32::MAX)
    }

    /// Whether the worker has at least one part of the given type.
    pub fn has_part(&self, part: BodyPart) -> bool {
        self.body.contains(&part)
    }

    /// Carried energy.
    pub fn energy(&self) -> u32 {
        self.store.get(Resource::Energy)
    }
}
