//! In-memory simulated world.
//!
//! [`SimWorld`] implements every collaborator interface the engine drives:
//! regions are [`Grid`]s, objects and workers live in ordered maps, and
//! actions apply immediately so a worker's store reflects its own action
//! within the same tick. The simulation is fully deterministic: iteration
//! follows identifier order, and nothing is random after construction.

use std::collections::BTreeMap;

use hive_types::{
    ActionCode, BodyPart, MoveCode, Position, RegionId, Resource, Store, Target, TargetId,
    TargetKind, Worker, WorkerName,
};
use tracing::{debug, info};

use crate::error::WorldError;
use crate::grid::Grid;
use crate::interface::{
    FindScope, Lifecycle, Movement, Simulation, SpawnCode, SpawnRequest, VisualHint,
    WorkerActions, WorldQuery,
};

/// Range for harvest, withdraw, pickup, and transfer.
pub const ADJACENT_RANGE: u32 = 1;

/// Range for build and upgrade.
pub const WORK_RANGE: u32 = 3;

/// Energy harvested per `Work` part per tick.
pub const HARVEST_POWER: u32 = 2;

/// Build progress per `Work` part per tick (one energy per point).
pub const BUILD_POWER: u32 = 5;

/// Energy spent on a controller per `Work` part per tick.
pub const UPGRADE_POWER: u32 = 1;

/// Fatigue generated per non-`Move` part when stepping, and removed per
/// `Move` part each tick.
pub const FATIGUE_PER_PART: u32 = 2;

/// Sources refill to capacity every this many ticks.
pub const SOURCE_REGEN_TICKS: u64 = 300;

/// Energy held by a fresh source.
pub const SOURCE_CAPACITY: u32 = 3000;

/// Ticks needed to create one body part.
pub const SPAWN_TICKS_PER_PART: u32 = 3;

/// Lifetime of a freshly created worker.
pub const DEFAULT_TICKS_TO_LIVE: u32 = 1500;

/// Progress needed to finish a construction site.
pub const DEFAULT_SITE_PROGRESS: u32 = 3000;

/// Engine code reported when moving a worker that does not exist.
pub const MOVE_NOT_FOUND: i32 = -5;

/// Engine code reported when moving a worker that is still spawning.
pub const MOVE_BUSY: i32 = -4;

/// Store capacity of a structure kind.
pub const fn structure_capacity(kind: TargetKind) -> u32 {
    match kind {
        TargetKind::Spawn => 300,
        TargetKind::Extension => 50,
        TargetKind::Tower => 1000,
        TargetKind::Container => 2000,
        TargetKind::Storage => 100_000,
        TargetKind::Link => 800,
        TargetKind::Source
        | TargetKind::DroppedResource
        | TargetKind::ConstructionSite
        | TargetKind::Controller => 0,
    }
}

/// A worker waiting to finish materializing at a spawn.
#[derive(Debug, Clone)]
struct PendingSpawn {
    worker: WorkerName,
    remaining: u32,
}

/// A deterministic, in-memory world.
#[derive(Debug, Clone, Default)]
pub struct SimWorld {
    tick: u64,
    regions: BTreeMap<RegionId, Grid>,
    objects: BTreeMap<TargetId, Target>,
    workers: BTreeMap<WorkerName, Worker>,
    pending_spawns: BTreeMap<TargetId, PendingSpawn>,
    messages: Vec<(WorkerName, String)>,
}

impl SimWorld {
    /// Create an empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Add an open region of the given size.
    pub fn add_region(&mut self, width: u32, height: u32) -> RegionId {
        let id = RegionId::new();
        self.regions.insert(id, Grid::new(width, height));
        id
    }

    /// Mutable access to a region grid, for adding walls.
    pub fn grid_mut(&mut self, region: RegionId) -> Option<&mut Grid> {
        self.regions.get_mut(&region)
    }

    /// Immutable access to a region grid.
    pub fn grid(&self, region: RegionId) -> Option<&Grid> {
        self.regions.get(&region)
    }

    /// Insert a fully specified target.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RegionNotFound`], [`WorldError::OutOfBounds`],
    /// or [`WorldError::DuplicateTarget`].
    pub fn insert_target(&mut self, target: Target) -> Result<TargetId, WorldError> {
        self.check_position(&target.pos)?;
        if self.objects.contains_key(&target.id) {
            return Err(WorldError::DuplicateTarget(target.id));
        }
        let id = target.id;
        self.objects.insert(id, target);
        Ok(id)
    }

    /// Place an object of `kind` with the default store and ownership for
    /// that kind: sources start full, structures start empty, containers,
    /// sources, and piles are unowned.
    ///
    /// # Errors
    ///
    /// Same as [`SimWorld::insert_target`].
    pub fn place(&mut self, kind: TargetKind, pos: Position) -> Result<TargetId, WorldError> {
        let owned = !matches!(
            kind,
            TargetKind::Source | TargetKind::Container | TargetKind::DroppedResource
        );
        let mut target = Target::new(TargetId::new(), kind, pos, owned);
        match kind {
            TargetKind::Source => {
                target.store = Store::filled(Resource::Energy, SOURCE_CAPACITY, SOURCE_CAPACITY);
            }
            TargetKind::DroppedResource => target.store = Store::with_capacity(u32::MAX),
            TargetKind::ConstructionSite => {
                target.progress_total = DEFAULT_SITE_PROGRESS;
                target.builds_into = Some(TargetKind::Extension);
            }
            TargetKind::Controller => target.progress_total = 200,
            _ => target.store = Store::with_capacity(structure_capacity(kind)),
        }
        self.insert_target(target)
    }

    /// Place a construction site that turns into `builds_into` once
    /// `progress_total` progress has been spent on it.
    ///
    /// # Errors
    ///
    /// Same as [`SimWorld::insert_target`].
    pub fn place_site(
        &mut self,
        builds_into: TargetKind,
        pos: Position,
        progress_total: u32,
    ) -> Result<TargetId, WorldError> {
        let mut target = Target::new(TargetId::new(), TargetKind::ConstructionSite, pos, true);
        target.progress_total = progress_total;
        target.builds_into = Some(builds_into);
        self.insert_target(target)
    }

    /// Place a pile of `amount` of `resource` on the ground.
    ///
    /// # Errors
    ///
    /// Same as [`SimWorld::insert_target`].
    pub fn place_pile(
        &mut self,
        resource: Resource,
        amount: u32,
        pos: Position,
    ) -> Result<TargetId, WorldError> {
        let target = Target::new(TargetId::new(), TargetKind::DroppedResource, pos, false)
            .with_store(Store::filled(resource, amount, u32::MAX));
        self.insert_target(target)
    }

    /// Add a live worker.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateWorker`] or a position error.
    pub fn add_worker(&mut self, worker: Worker) -> Result<(), WorldError> {
        self.check_position(&worker.pos)?;
        if self.workers.contains_key(&worker.name) {
            return Err(WorldError::DuplicateWorker(worker.name));
        }
        self.workers.insert(worker.name.clone(), worker);
        Ok(())
    }

    /// Mutable access to a worker.
    pub fn worker_mut(&mut self, name: &WorkerName) -> Option<&mut Worker> {
        self.workers.get_mut(name)
    }

    /// Mutable access to an object.
    pub fn object_mut(&mut self, id: TargetId) -> Option<&mut Target> {
        self.objects.get_mut(&id)
    }

    /// Remove an object from the world.
    pub fn remove_object(&mut self, id: TargetId) -> Option<Target> {
        self.objects.remove(&id)
    }

    /// Iterate over all objects in identifier order.
    pub fn objects(&self) -> impl Iterator<Item = &Target> {
        self.objects.values()
    }

    /// Status texts shown since the last [`Simulation::advance`].
    pub fn messages(&self) -> &[(WorkerName, String)] {
        &self.messages
    }

    /// Jump the clock, e.g. to test tick-derived names.
    pub const fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    fn check_position(&self, pos: &Position) -> Result<(), WorldError> {
        let grid = self
            .regions
            .get(&pos.region)
            .ok_or(WorldError::RegionNotFound(pos.region))?;
        if !grid.contains((pos.x, pos.y)) {
            return Err(WorldError::OutOfBounds {
                region: pos.region,
                x: pos.x,
                y: pos.y,
            });
        }
        Ok(())
    }

    /// Take `cost` energy from the spawn first, then the region's other
    /// spawns and extensions in identifier order.
    fn pay_for_spawn(&mut self, spawn: TargetId, region: RegionId, cost: u32) {
        let mut owed = cost;
        let mut payers = vec![spawn];
        payers.extend(
            self.objects
                .values()
                .filter(|t| {
                    t.id != spawn
                        && t.owned
                        && t.pos.region == region
                        && matches!(t.kind, TargetKind::Spawn | TargetKind::Extension)
                })
                .map(|t| t.id),
        );
        for id in payers {
            if owed == 0 {
                break;
            }
            if let Some(payer) = self.objects.get_mut(&id) {
                let paid = payer.store.remove(Resource::Energy, owed);
                owed = owed.saturating_sub(paid);
            }
        }
    }

    /// Move up to `amount` of `resource` from a worker into an object, or
    /// the other way round. Returns the amount moved.
    fn shift(
        &mut self,
        worker: &WorkerName,
        target: TargetId,
        resource: Resource,
        amount: u32,
        into_worker: bool,
    ) -> u32 {
        let (Some(w), Some(t)) = (self.workers.get_mut(worker), self.objects.get_mut(&target))
        else {
            return 0;
        };
        let (from, to) = if into_worker {
            (&mut t.store, &mut w.store)
        } else {
            (&mut w.store, &mut t.store)
        };
        let moved = amount.min(from.get(resource)).min(to.free());
        from.remove(resource, moved);
        to.add(resource, moved);
        moved
    }

    fn complete_site(&mut self, site: TargetId) {
        let Some(finished) = self.objects.remove(&site) else {
            return;
        };
        let Some(kind) = finished.builds_into else {
            return;
        };
        let structure = Target::new(TargetId::new(), kind, finished.pos, true)
            .with_store(Store::with_capacity(structure_capacity(kind)));
        info!(site = %site, structure = %structure.id, kind = ?kind, "Construction finished");
        self.objects.insert(structure.id, structure);
    }
}

impl WorldQuery for SimWorld {
    fn tick(&self) -> u64 {
        self.tick
    }

    fn worker(&self, name: &WorkerName) -> Option<&Worker> {
        self.workers.get(name)
    }

    fn worker_names(&self) -> Vec<WorkerName> {
        self.workers.keys().cloned().collect()
    }

    fn object(&self, id: TargetId) -> Option<&Target> {
        self.objects.get(&id)
    }

    fn find_closest_by_path(
        &self,
        from: &Position,
        scope: FindScope,
        filter: &dyn Fn(&Target) -> bool,
    ) -> Option<&Target> {
        let grid = self.regions.get(&from.region)?;
        let dist = grid.distances((from.x, from.y));

        let mut best: Option<(u32, &Target)> = None;
        for target in self.objects.values() {
            if target.pos.region != from.region || !scope.matches(target) || !filter(target) {
                continue;
            }
            let Some(cost) = Grid::cost_to(&dist, (target.pos.x, target.pos.y), ADJACENT_RANGE)
            else {
                continue;
            };
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, target));
            }
        }
        best.map(|(_, target)| target)
    }

    fn controller(&self, region: RegionId) -> Option<&Target> {
        self.objects
            .values()
            .find(|t| t.kind == TargetKind::Controller && t.pos.region == region)
    }
}

impl WorkerActions for SimWorld {
    fn harvest(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode {
        let Some(w) = self.workers.get(worker) else {
            return ActionCode::NotFound;
        };
        let Some(t) = self.objects.get(&target) else {
            return ActionCode::InvalidTarget;
        };
        if t.kind != TargetKind::Source {
            return ActionCode::InvalidTarget;
        }
        if !w.has_part(BodyPart::Work) {
            return ActionCode::NoCapability;
        }
        if t.store.get(Resource::Energy) == 0 {
            return ActionCode::NotEnoughSource;
        }
        if !w.pos.in_range_to(&t.pos, ADJACENT_RANGE) {
            return ActionCode::NotInRange;
        }
        let yield_amount = w.part_count(BodyPart::Work).saturating_mul(HARVEST_POWER);
        self.shift(worker, target, Resource::Energy, yield_amount, true);
        ActionCode::Ok
    }

    fn withdraw(
        &mut self,
        worker: &WorkerName,
        target: TargetId,
        resource: Resource,
    ) -> ActionCode {
        let Some(w) = self.workers.get(worker) else {
            return ActionCode::NotFound;
        };
        let Some(t) = self.objects.get(&target) else {
            return ActionCode::InvalidTarget;
        };
        if !t.kind.is_structure() {
            return ActionCode::InvalidTarget;
        }
        if !w.has_part(BodyPart::Carry) {
            return ActionCode::NoCapability;
        }
        if t.store.get(resource) == 0 {
            return ActionCode::NotEnoughSource;
        }
        if w.store.is_full() {
            return ActionCode::Full;
        }
        if !w.pos.in_range_to(&t.pos, ADJACENT_RANGE) {
            return ActionCode::NotInRange;
        }
        self.shift(worker, target, resource, u32::MAX, true);
        ActionCode::Ok
    }

    fn pickup(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode {
        let Some(w) = self.workers.get(worker) else {
            return ActionCode::NotFound;
        };
        let Some(t) = self.objects.get(&target) else {
            return ActionCode::InvalidTarget;
        };
        if t.kind != TargetKind::DroppedResource {
            return ActionCode::InvalidTarget;
        }
        if !w.has_part(BodyPart::Carry) {
            return ActionCode::NoCapability;
        }
        if w.store.is_full() {
            return ActionCode::Full;
        }
        if !w.pos.in_range_to(&t.pos, ADJACENT_RANGE) {
            return ActionCode::NotInRange;
        }
        let Some(resource) = t.store.contents.keys().next().copied() else {
            return ActionCode::NotEnoughSource;
        };
        self.shift(worker, target, resource, u32::MAX, true);
        if self.objects.get(&target).is_some_and(|pile| pile.store.is_empty()) {
            self.objects.remove(&target);
        }
        ActionCode::Ok
    }

    fn transfer(
        &mut self,
        worker: &WorkerName,
        target: TargetId,
        resource: Resource,
    ) -> ActionCode {
        let Some(w) = self.workers.get(worker) else {
            return ActionCode::NotFound;
        };
        let Some(t) = self.objects.get(&target) else {
            return ActionCode::InvalidTarget;
        };
        if !t.kind.is_structure() {
            return ActionCode::InvalidTarget;
        }
        if !w.has_part(BodyPart::Carry) {
            return ActionCode::NoCapability;
        }
        if w.store.get(resource) == 0 {
            return ActionCode::NotEnoughSource;
        }
        if t.store.is_full() {
            return ActionCode::Full;
        }
        if !w.pos.in_range_to(&t.pos, ADJACENT_RANGE) {
            return ActionCode::NotInRange;
        }
        self.shift(worker, target, resource, u32::MAX, false);
        ActionCode::Ok
    }

    fn build(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode {
        let Some(w) = self.workers.get(worker) else {
            return ActionCode::NotFound;
        };
        let Some(t) = self.objects.get(&target) else {
            return ActionCode::InvalidTarget;
        };
        if t.kind != TargetKind::ConstructionSite || !t.owned {
            return ActionCode::InvalidTarget;
        }
        if !w.has_part(BodyPart::Work) {
            return ActionCode::NoCapability;
        }
        if w.energy() == 0 {
            return ActionCode::NotEnoughSource;
        }
        if !w.pos.in_range_to(&t.pos, WORK_RANGE) {
            return ActionCode::NotInRange;
        }
        let remaining = t.progress_total.saturating_sub(t.progress);
        let spend = w
            .part_count(BodyPart::Work)
            .saturating_mul(BUILD_POWER)
            .min(w.energy())
            .min(remaining);

        if let Some(w) = self.workers.get_mut(worker) {
            w.store.remove(Resource::Energy, spend);
        }
        let finished = self.objects.get_mut(&target).is_some_and(|site| {
            site.progress = site.progress.saturating_add(spend);
            site.progress >= site.progress_total
        });
        if finished {
            self.complete_site(target);
        }
        ActionCode::Ok
    }

    fn upgrade_controller(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode {
        let Some(w) = self.workers.get(worker) else {
            return ActionCode::NotFound;
        };
        let Some(t) = self.objects.get(&target) else {
            return ActionCode::InvalidTarget;
        };
        if t.kind != TargetKind::Controller {
            return ActionCode::InvalidTarget;
        }
        if !t.owned {
            return ActionCode::NotOwner;
        }
        if !w.has_part(BodyPart::Work) {
            return ActionCode::NoCapability;
        }
        if w.energy() == 0 {
            return ActionCode::NotEnoughSource;
        }
        if !w.pos.in_range_to(&t.pos, WORK_RANGE) {
            return ActionCode::NotInRange;
        }
        let spend = w
            .part_count(BodyPart::Work)
            .saturating_mul(UPGRADE_POWER)
            .min(w.energy());

        if let Some(w) = self.workers.get_mut(worker) {
            w.store.remove(Resource::Energy, spend);
        }
        if let Some(controller) = self.objects.get_mut(&target) {
            controller.progress = controller.progress.saturating_add(spend);
        }
        ActionCode::Ok
    }

    fn drop_resource(&mut self, worker: &WorkerName, resource: Resource) -> ActionCode {
        let Some(w) = self.workers.get_mut(worker) else {
            return ActionCode::NotFound;
        };
        let amount = w.store.remove(resource, u32::MAX);
        if amount == 0 {
            return ActionCode::NotEnoughSource;
        }
        let pos = w.pos;

        let existing = self
            .objects
            .values_mut()
            .find(|t| t.kind == TargetKind::DroppedResource && t.pos == pos);
        if let Some(pile) = existing {
            pile.store.add(resource, amount);
        } else {
            let pile = Target::new(TargetId::new(), TargetKind::DroppedResource, pos, false)
                .with_store(Store::filled(resource, amount, u32::MAX));
            self.objects.insert(pile.id, pile);
        }
        debug!(worker = %worker, ?resource, amount, "Resource dropped");
        ActionCode::Ok
    }

    fn say(&mut self, worker: &WorkerName, message: &str) {
        debug!(worker = %worker, message, "Worker says");
        self.messages.push((worker.clone(), message.to_owned()));
    }

    fn set_spent_turn(&mut self, worker: &WorkerName, spent: bool) {
        if let Some(w) = self.workers.get_mut(worker) {
            w.spent_turn = spent;
        }
    }
}

impl Movement for SimWorld {
    fn move_toward(&mut self, worker: &WorkerName, to: &Position, hint: VisualHint) -> MoveCode {
        let Some(w) = self.workers.get(worker) else {
            return MoveCode::Other(MOVE_NOT_FOUND);
        };
        if w.spawning {
            return MoveCode::Other(MOVE_BUSY);
        }
        if !w.has_part(BodyPart::Move) {
            return MoveCode::NoCapability;
        }
        if w.fatigue > 0 {
            return MoveCode::Tired;
        }
        if w.pos.region != to.region {
            return MoveCode::NoPath;
        }
        let Some(grid) = self.regions.get(&to.region) else {
            return MoveCode::NoPath;
        };
        let Some(path) = grid.path((w.pos.x, w.pos.y), (to.x, to.y), ADJACENT_RANGE) else {
            return MoveCode::NoPath;
        };

        let heavy_parts = u32::try_from(w.body.iter().filter(|p| **p != BodyPart::Move).count())
            .unwrap_or(u32::MAX);
        let fatigue = heavy_parts.saturating_mul(FATIGUE_PER_PART);

        if let (Some(&(x, y)), Some(w)) = (path.first(), self.workers.get_mut(worker)) {
            w.pos.x = x;
            w.pos.y = y;
            w.fatigue = fatigue;
            debug!(worker = %worker, x, y, stroke = hint.stroke, job = ?hint.job, "Worker stepped");
        }
        MoveCode::Ok
    }
}

impl Lifecycle for SimWorld {
    fn spawns(&self) -> Vec<TargetId> {
        self.objects
            .values()
            .filter(|t| t.kind == TargetKind::Spawn && t.owned)
            .map(|t| t.id)
            .collect()
    }

    fn is_spawning(&self, spawn: TargetId) -> bool {
        self.pending_spawns.contains_key(&spawn)
    }

    fn energy_available(&self, region: RegionId) -> u32 {
        self.objects
            .values()
            .filter(|t| {
                t.owned
                    && t.pos.region == region
                    && matches!(t.kind, TargetKind::Spawn | TargetKind::Extension)
            })
            .fold(0_u32, |acc, t| acc.saturating_add(t.store.get(Resource::Energy)))
    }

    fn spawn_worker(
        &mut self,
        spawn: TargetId,
        request: &SpawnRequest,
        dry_run: bool,
    ) -> SpawnCode {
        let Some(origin) = self
            .objects
            .get(&spawn)
            .filter(|t| t.kind == TargetKind::Spawn && t.owned)
        else {
            return SpawnCode::NotFound;
        };
        let pos = origin.pos;
        if self.pending_spawns.contains_key(&spawn) {
            return SpawnCode::Busy;
        }
        if request.body.is_empty() {
            return SpawnCode::InvalidBody;
        }
        if self.workers.contains_key(&request.name) {
            return SpawnCode::NameExists;
        }
        let cost = request.cost();
        if self.energy_available(pos.region) < cost {
            return SpawnCode::NotEnoughEnergy;
        }
        if dry_run {
            return SpawnCode::Ok;
        }

        self.pay_for_spawn(spawn, pos.region, cost);
        let mut worker = Worker::new(request.name.clone(), request.role, pos, request.body.clone());
        worker.spawning = true;
        worker.ticks_to_live = None;
        let parts = u32::try_from(request.body.len()).unwrap_or(u32::MAX);
        self.pending_spawns.insert(
            spawn,
            PendingSpawn {
                worker: request.name.clone(),
                remaining: parts.saturating_mul(SPAWN_TICKS_PER_PART),
            },
        );
        self.workers.insert(request.name.clone(), worker);
        SpawnCode::Ok
    }

    fn suicide(&mut self, worker: &WorkerName) -> ActionCode {
        if self.workers.remove(worker).is_some() {
            ActionCode::Ok
        } else {
            ActionCode::NotFound
        }
    }
}

impl Simulation for SimWorld {
    fn advance(&mut self) {
        self.tick = self.tick.saturating_add(1);
        self.messages.clear();

        let mut expired = Vec::new();
        for (name, w) in &mut self.workers {
            w.spent_turn = false;
            let recovery = w.part_count(BodyPart::Move).saturating_mul(FATIGUE_PER_PART);
            w.fatigue = w.fatigue.saturating_sub(recovery);
            if let Some(ttl) = w.ticks_to_live {
                let next = ttl.saturating_sub(1);
                w.ticks_to_live = Some(next);
                if next == 0 {
                    expired.push(name.clone());
                }
            }
        }
        for name in expired {
            self.workers.remove(&name);
            info!(worker = %name, tick = self.tick, "Worker expired");
        }

        let mut finished = Vec::new();
        for (spawn, pending) in &mut self.pending_spawns {
            pending.remaining = pending.remaining.saturating_sub(1);
            if pending.remaining == 0 {
                finished.push(*spawn);
            }
        }
        for spawn in finished {
            let Some(pending) = self.pending_spawns.remove(&spawn) else {
                continue;
            };
            if let Some(w) = self.workers.get_mut(&pending.worker) {
                w.spawning = false;
                w.ticks_to_live = Some(DEFAULT_TICKS_TO_LIVE);
                info!(worker = %pending.worker, tick = self.tick, "Worker spawned");
            }
        }

        if self.tick.checked_rem(SOURCE_REGEN_TICKS) == Some(0) {
            for source in self
                .objects
                .values_mut()
                .filter(|t| t.kind == TargetKind::Source)
            {
                let room = source.store.free();
                source.store.add(Resource::Energy, room);
            }
        }
    }
}
