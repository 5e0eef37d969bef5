//! Acquire energy.
//!
//! Resumes the remembered gather target while it exists, otherwise asks the
//! selector for one. When the target runs dry or stays unreachable past the
//! blocked threshold, the executor reselects exactly once with that target
//! excluded.

use hive_types::{ActionCode, Job, Resource, TargetId, TargetKind};
use tracing::{info, warn};

use super::{Slot, settle_travel};
use crate::context::{TaskStatus, WorkerContext};
use crate::selector::{GatherOptions, find_resource_source};
use crate::travel::{TravelOutcome, travel};

/// Gather energy with the given options.
pub fn gather(ctx: &mut WorkerContext<'_>, options: &GatherOptions) -> TaskStatus {
    gather_excluding(ctx, options, None)
}

fn gather_excluding(
    ctx: &mut WorkerContext<'_>,
    options: &GatherOptions,
    exclude: Option<TargetId>,
) -> TaskStatus {
    if ctx.is_spent() {
        return TaskStatus::Consumed;
    }
    let Some(from) = ctx.position() else {
        return TaskStatus::Available;
    };

    let mut chosen = None;
    if let Some(id) = ctx.memory.current_resource_target_id {
        if exclude == Some(id) {
            ctx.memory.current_resource_target_id = None;
        } else {
            chosen = ctx.world.object(id).map(|t| t.id);
        }
    }
    if chosen.is_none() {
        chosen = find_resource_source(&*ctx.world, &from, options, ctx.settings, exclude);
    }
    let Some((id, kind, pos)) = chosen
        .and_then(|id| ctx.world.object(id))
        .map(|t| (t.id, t.kind, t.pos))
    else {
        ctx.world.say(ctx.name, "No sources found");
        info!(worker = %ctx.name, "No sources found");
        return TaskStatus::Available;
    };

    ctx.memory.current_resource_target_id = Some(id);
    let code = match kind {
        TargetKind::Source => ctx.world.harvest(ctx.name, id),
        TargetKind::DroppedResource => ctx.world.pickup(ctx.name, id),
        _ => ctx.world.withdraw(ctx.name, id, Resource::Energy),
    };
    ctx.sync_phase();

    let retry = exclude.is_none();
    match code {
        ActionCode::Ok => ctx.acted(),
        ActionCode::NotInRange => match travel(ctx, &pos, Job::Harvest) {
            TravelOutcome::Escalate if retry => {
                info!(worker = %ctx.name, target = %id, "Blocked - finding different resource");
                gather_excluding(ctx, options, Some(id))
            }
            outcome => settle_travel(ctx, outcome, Some(Slot::Resource)),
        },
        ActionCode::NotEnoughSource => {
            ctx.memory.current_resource_target_id = None;
            info!(worker = %ctx.name, target = %id, "Resource tapped - finding different resource");
            if retry {
                gather_excluding(ctx, options, Some(id))
            } else {
                TaskStatus::Available
            }
        }
        ActionCode::NoCapability => ctx.terminate("No bodypart for gathering"),
        ActionCode::NotOwner => {
            warn!(worker = %ctx.name, target = %id, "Worker is lost");
            TaskStatus::Available
        }
        ActionCode::Full | ActionCode::InvalidTarget | ActionCode::NotFound => {
            ctx.memory.current_resource_target_id = None;
            TaskStatus::Available
        }
    }
}
