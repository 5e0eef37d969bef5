//! Worker name allocation and the per-tick spawn planner.
//!
//! New workers are named `<Role>_<tick>`. When that name is taken the
//! allocator probes `<Role>_<tick>_1`, `<Role>_<tick>_2`, ... up to the
//! configured retry limit, asking the spawn for a dry run each time.
//!
//! The planner keeps each role at its configured population: every idle
//! spawn walks the roles in declaration order and requests the first
//! missing worker its region can pay for.

use hive_types::{Role, TargetId, WorkerName};
use hive_world::{SpawnCode, SpawnRequest, World, WorldQuery};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;

// -----------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------

/// Errors that can occur while creating a worker.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    /// Every probed name was already taken.
    #[error("no free name for {role} at tick {tick} after {attempts} attempts")]
    NameExhausted {
        /// Role being spawned.
        role: Role,
        /// Tick the names were derived from.
        tick: u64,
        /// Number of names probed.
        attempts: u32,
    },

    /// The spawn refused the request for a reason other than the name.
    #[error("spawn {spawn} rejected {role}: {code:?}")]
    Rejected {
        /// The spawn that was asked.
        spawn: TargetId,
        /// Role being spawned.
        role: Role,
        /// The result code returned.
        code: SpawnCode,
    },
}

// -----------------------------------------------------------------------
// Names
// -----------------------------------------------------------------------

/// The `attempt`-th candidate name for a role at a tick. Attempt 0 has no
/// suffix.
pub fn candidate_name(role: Role, tick: u64, attempt: u32) -> WorkerName {
    if attempt == 0 {
        WorkerName::new(format!("{}_{tick}", role.as_str()))
    } else {
        WorkerName::new(format!("{}_{tick}_{attempt}", role.as_str()))
    }
}

/// Find a free name for `request.role` by dry-running the spawn with each
/// candidate. `request.name` is overwritten on every probe and holds the
/// chosen name on success.
///
/// # Errors
///
/// Returns [`SpawnError::NameExhausted`] when the base name and all
/// `retry_limit` suffixed names are taken, or [`SpawnError::Rejected`]
/// when the dry run fails for any other reason.
pub fn allocate_name(
    world: &mut dyn World,
    spawn: TargetId,
    request: &mut SpawnRequest,
    retry_limit: u32,
) -> Result<WorkerName, SpawnError> {
    let tick = world.tick();
    for attempt in 0..=retry_limit {
        request.name = candidate_name(request.role, tick, attempt);
        match world.spawn_worker(spawn, request, true) {
            SpawnCode::Ok => return Ok(request.name.clone()),
            SpawnCode::NameExists => {
                debug!(name = %request.name, "Worker name taken, probing next");
            }
            code => {
                return Err(SpawnError::Rejected {
                    spawn,
                    role: request.role,
                    code,
                });
            }
        }
    }
    Err(SpawnError::NameExhausted {
        role: request.role,
        tick,
        attempts: retry_limit.saturating_add(1),
    })
}

// -----------------------------------------------------------------------
// Planner
// -----------------------------------------------------------------------

/// Live workers of a role, including those still spawning.
fn live_count<W: WorldQuery + ?Sized>(world: &W, role: Role) -> u32 {
    let count = world
        .worker_names()
        .iter()
        .filter_map(|name| world.worker(name))
        .filter(|worker| worker.role == role)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Request missing workers at every idle spawn. Returns the names of the
/// workers whose creation started this tick.
pub fn spawn_missing(world: &mut dyn World, config: &SimulationConfig) -> Vec<WorkerName> {
    let mut spawned = Vec::new();

    for spawn in world.spawns() {
        if world.is_spawning(spawn) {
            debug!(spawn = %spawn, "Spawn busy");
            continue;
        }
        let Some(region) = world.object(spawn).map(|s| s.pos.region) else {
            continue;
        };

        for role in Role::ALL {
            let target = config.target_amount(role);
            let live = live_count(&*world, role);
            if live >= target {
                continue;
            }
            let Some(body) = config.roles.get(&role).map(|r| r.body.clone()) else {
                continue;
            };

            let mut request = SpawnRequest {
                name: WorkerName::new(String::new()),
                role,
                body,
            };
            let cost = request.cost();
            let available = world.energy_available(region);
            if available < cost {
                debug!(
                    spawn = %spawn,
                    role = %role,
                    cost,
                    available,
                    "Not enough energy to spawn"
                );
                break;
            }

            let name = match allocate_name(
                world,
                spawn,
                &mut request,
                config.behavior.name_retry_limit,
            ) {
                Ok(name) => name,
                Err(e) => {
                    warn!(spawn = %spawn, error = %e, "Cannot spawn worker");
                    break;
                }
            };

            match world.spawn_worker(spawn, &request, false) {
                SpawnCode::Ok => {
                    info!(
                        name = %name,
                        role = %role,
                        body = ?request.body,
                        live,
                        target,
                        "Spawning worker"
                    );
                    spawned.push(name);
                }
                code => {
                    warn!(spawn = %spawn, role = %role, code = ?code, "Spawn request failed");
                }
            }
            break;
        }
    }

    spawned
}
