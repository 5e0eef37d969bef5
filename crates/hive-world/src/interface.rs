//! The collaborator interfaces the decision engine drives.
//!
//! The engine never owns the world. It reads through [`WorldQuery`], acts
//! through [`WorkerActions`] and [`Movement`], and creates or removes
//! workers through [`Lifecycle`]. [`World`] bundles all four so the tick
//! function can take a single `&mut dyn World`.

use hive_types::{
    ActionCode, BodyPart, Job, MoveCode, Position, RegionId, Resource, Role, Target, TargetId,
    Worker, WorkerName,
};

/// Which family of objects a path search considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindScope {
    /// Resource piles on the ground.
    DroppedResources,
    /// Every structure, owned or not.
    Structures,
    /// Structures we own.
    MyStructures,
    /// Sources that still have energy.
    ActiveSources,
    /// Construction sites we own.
    MyConstructionSites,
}

impl FindScope {
    /// Whether a target falls into this scope.
    pub fn matches(self, target: &Target) -> bool {
        match self {
            Self::DroppedResources => target.kind == hive_types::TargetKind::DroppedResource,
            Self::Structures => target.kind.is_structure(),
            Self::MyStructures => target.kind.is_structure() && target.owned,
            Self::ActiveSources => target.is_active(),
            Self::MyConstructionSites => {
                target.kind == hive_types::TargetKind::ConstructionSite && target.owned
            }
        }
    }
}

/// Path visualization hint passed along with every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualHint {
    /// Stroke color of the drawn path.
    pub stroke: &'static str,
    /// The job the worker is moving for.
    pub job: Job,
}

impl VisualHint {
    /// Hint for a role's palette and the given job.
    pub const fn new(role: Role, job: Job) -> Self {
        Self {
            stroke: role.palette(),
            job,
        }
    }
}

/// A request to create a worker at a spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    /// Name to assign; must be unused.
    pub name: WorkerName,
    /// Role of the new worker.
    pub role: Role,
    /// Body composition.
    pub body: Vec<BodyPart>,
}

impl SpawnRequest {
    /// Energy needed to create this body.
    pub fn cost(&self) -> u32 {
        self.body
            .iter()
            .fold(0_u32, |acc, part| acc.saturating_add(part.cost()))
    }
}

/// Result code of a spawn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnCode {
    /// The worker is being created.
    Ok,
    /// The spawn is already creating a worker.
    Busy,
    /// A worker with this name already exists.
    NameExists,
    /// The region cannot pay for the body.
    NotEnoughEnergy,
    /// The body is empty.
    InvalidBody,
    /// The spawn does not exist or is not ours.
    NotFound,
}

/// Read access to world state.
pub trait WorldQuery {
    /// Current tick number.
    fn tick(&self) -> u64;

    /// Look up a worker by name.
    fn worker(&self, name: &WorkerName) -> Option<&Worker>;

    /// Names of all workers, in a stable order.
    fn worker_names(&self) -> Vec<WorkerName>;

    /// Look up an object by identifier; `None` once it is gone.
    fn object(&self, id: TargetId) -> Option<&Target>;

    /// The object in `scope` accepted by `filter` with the cheapest path
    /// from `from`, searching `from`'s region. Unreachable objects are
    /// never returned. Ties go to the first object in identifier order.
    fn find_closest_by_path(
        &self,
        from: &Position,
        scope: FindScope,
        filter: &dyn Fn(&Target) -> bool,
    ) -> Option<&Target>;

    /// The controller of a region, if it has one.
    fn controller(&self, region: RegionId) -> Option<&Target>;
}

/// In-range actions a worker can take.
pub trait WorkerActions {
    /// Harvest energy from a source.
    fn harvest(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode;

    /// Take a resource out of a structure.
    fn withdraw(&mut self, worker: &WorkerName, target: TargetId, resource: Resource)
    -> ActionCode;

    /// Pick up a dropped resource pile.
    fn pickup(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode;

    /// Put a resource into a structure.
    fn transfer(&mut self, worker: &WorkerName, target: TargetId, resource: Resource)
    -> ActionCode;

    /// Spend energy on a construction site.
    fn build(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode;

    /// Spend energy on a controller.
    fn upgrade_controller(&mut self, worker: &WorkerName, target: TargetId) -> ActionCode;

    /// Drop everything of `resource` on the worker's tile.
    fn drop_resource(&mut self, worker: &WorkerName, resource: Resource) -> ActionCode;

    /// Show status text above the worker.
    fn say(&mut self, worker: &WorkerName, message: &str);

    /// Set the worker's spent-turn flag.
    fn set_spent_turn(&mut self, worker: &WorkerName, spent: bool);
}

/// The movement primitive.
pub trait Movement {
    /// Take one step toward `to`, stopping within range 1 of it.
    fn move_toward(&mut self, worker: &WorkerName, to: &Position, hint: VisualHint) -> MoveCode;
}

/// Worker creation and removal.
pub trait Lifecycle {
    /// Identifiers of our spawns.
    fn spawns(&self) -> Vec<TargetId>;

    /// Whether the spawn is busy creating a worker.
    fn is_spawning(&self, spawn: TargetId) -> bool;

    /// Energy available for spawning in a region.
    fn energy_available(&self, region: RegionId) -> u32;

    /// Request a worker. With `dry_run` only the checks run.
    fn spawn_worker(&mut self, spawn: TargetId, request: &SpawnRequest, dry_run: bool)
    -> SpawnCode;

    /// Remove the worker from the world immediately.
    fn suicide(&mut self, worker: &WorkerName) -> ActionCode;
}

/// Everything the engine needs from the world for one tick.
pub trait World: WorldQuery + WorkerActions + Movement + Lifecycle {}

impl<T: WorldQuery + WorkerActions + Movement + Lifecycle> World for T {}

/// A world that can advance itself by one tick.
pub trait Simulation: World {
    /// Advance time: regenerate, age workers, finish spawns, reset the
    /// per-tick flags.
    fn advance(&mut self);
}
