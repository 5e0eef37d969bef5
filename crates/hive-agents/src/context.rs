//! The per-worker view every executor works through.
//!
//! A [`WorkerContext`] bundles the world, the worker's name and role, its
//! memory record, and the behavior settings for one decision pass. It is
//! built fresh for each worker each tick; nothing here outlives the call.

use hive_types::{ActionCode, Job, Position, Role, WorkerMemory, WorkerName};
use hive_world::{VisualHint, World};
use tracing::{info, warn};

use crate::settings::BehaviorSettings;

/// What a decision step did with the worker's tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// The worker acted or committed to its target; stop deciding.
    Consumed,
    /// The worker removed itself from the world; stop and drop its memory.
    Terminated,
    /// Nothing was done; the next step may run.
    Available,
}

impl TaskStatus {
    /// Whether the decision cascade should stop here.
    pub const fn ends_turn(self) -> bool {
        !matches!(self, Self::Available)
    }
}

/// Everything one worker's decision pass needs.
pub struct WorkerContext<'a> {
    /// The world, passed explicitly for this tick.
    pub world: &'a mut dyn World,
    /// Name of the worker being decided for.
    pub name: &'a WorkerName,
    /// Role of the worker.
    pub role: Role,
    /// The worker's persisted memory record.
    pub memory: &'a mut WorkerMemory,
    /// Behavior thresholds.
    pub settings: &'a BehaviorSettings,
}

impl WorkerContext<'_> {
    /// Current position, or `None` once the worker is gone.
    pub fn position(&self) -> Option<Position> {
        self.world.worker(self.name).map(|w| w.pos)
    }

    /// Total carried amount.
    pub fn carried(&self) -> u32 {
        self.world.worker(self.name).map_or(0, |w| w.store.used())
    }

    /// Whether the worker has no carrying room left.
    pub fn is_full(&self) -> bool {
        self.world.worker(self.name).is_some_and(|w| w.store.is_full())
    }

    /// Whether the worker already used this tick's action.
    pub fn is_spent(&self) -> bool {
        self.world.worker(self.name).is_some_and(|w| w.spent_turn)
    }

    /// Path hint for this worker's role and the given job.
    pub const fn hint(&self, job: Job) -> VisualHint {
        VisualHint::new(self.role, job)
    }

    /// Record an in-range action: mark the tick spent and reset the
    /// blocked counter.
    pub fn acted(&mut self) -> TaskStatus {
        self.world.set_spent_turn(self.name, true);
        self.memory.blocked_count = 0;
        TaskStatus::Consumed
    }

    /// Flip `needs_resource` once carrying crosses full or empty. At most
    /// one flip happens per call.
    pub fn sync_phase(&mut self) {
        let Some(worker) = self.world.worker(self.name) else {
            return;
        };
        if self.memory.needs_resource {
            if worker.store.is_full() {
                self.memory.needs_resource = false;
            }
        } else if worker.store.is_empty() {
            self.memory.needs_resource = true;
        }
    }

    /// Remove a worker that can never perform its job.
    pub fn terminate(&mut self, reason: &str) -> TaskStatus {
        let message = format!("{reason} - Suiciding..");
        self.world.say(self.name, &message);
        info!(worker = %self.name, role = %self.role, reason, "Worker self-terminating");
        self.world.set_spent_turn(self.name, true);
        let code = self.world.suicide(self.name);
        if code != ActionCode::Ok {
            warn!(worker = %self.name, ?code, "Suicide failed");
        }
        TaskStatus::Terminated
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hive_world::WorldQuery;

    use super::*;
    use crate::tasks::testing::make_world;

    #[test]
    fn terminate_removes_the_worker() {
        let (mut world, _region, name) = make_world(Role::Harvester, 0);
        let mut memory = WorkerMemory::default();
        let settings = BehaviorSettings::default();
        let mut ctx = WorkerContext {
            world: &mut world,
            name: &name,
            role: Role::Harvester,
            memory: &mut memory,
            settings: &settings,
        };

        assert_eq!(ctx.terminate("No bodypart for working"), TaskStatus::Terminated);
        assert!(world.worker(&name).is_none());
    }

    #[test]
    fn terminate_of_missing_worker_still_reports_terminated() {
        let (mut world, _region, _name) = make_world(Role::Harvester, 0);
        let ghost = WorkerName::from("Harvester_9");
        let mut memory = WorkerMemory::default();
        let settings = BehaviorSettings::default();
        let mut ctx = WorkerContext {
            world: &mut world,
            name: &ghost,
            role: Role::Harvester,
            memory: &mut memory,
            settings: &settings,
        };

        assert_eq!(ctx.terminate("No bodypart for working"), TaskStatus::Terminated);
        assert!(world.worker(&ghost).is_none());
    }
}
