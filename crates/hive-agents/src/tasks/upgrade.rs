//! Spend carried energy on the home region's controller.

use hive_types::{ActionCode, Job};
use tracing::{info, warn};

use super::settle_travel;
use crate::context::{TaskStatus, WorkerContext};
use crate::travel::travel;

/// Upgrade the controller of the worker's home region (its current region
/// when no home is recorded).
pub fn upgrade(ctx: &mut WorkerContext<'_>) -> TaskStatus {
    if ctx.is_spent() {
        return TaskStatus::Consumed;
    }
    let Some(from) = ctx.position() else {
        return TaskStatus::Available;
    };
    let region = ctx.memory.home_region_id.unwrap_or(from.region);
    let Some((id, pos)) = ctx.world.controller(region).map(|c| (c.id, c.pos)) else {
        info!(worker = %ctx.name, region = %region, "Cannot find home controller");
        return TaskStatus::Available;
    };

    let code = ctx.world.upgrade_controller(ctx.name, id);
    ctx.sync_phase();

    match code {
        ActionCode::Ok => ctx.acted(),
        ActionCode::NotInRange => {
            let outcome = travel(ctx, &pos, Job::Upgrade);
            settle_travel(ctx, outcome, None)
        }
        ActionCode::NotOwner => {
            warn!(worker = %ctx.name, region = %region, "Worker is lost");
            TaskStatus::Available
        }
        ActionCode::NoCapability => ctx.terminate("No bodypart for upgrading"),
        _ => TaskStatus::Available,
    }
}
