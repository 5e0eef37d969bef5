//! Movement adapter.
//!
//! Wraps [`Movement::move_toward`](hive_world::Movement::move_toward) and
//! turns its result code into a [`TravelOutcome`] while keeping the
//! worker's `blocked_count` up to date.

use hive_types::{Job, MoveCode, Position};
use tracing::debug;

use crate::context::WorkerContext;

/// What a travel attempt means for the calling executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelOutcome {
    /// The worker moved, or is tired and will move later. Its tick is spent.
    Moved,
    /// No path yet, below the escalation threshold.
    Blocked {
        /// Consecutive no-path results so far.
        count: u32,
    },
    /// No path for too long; pick a different target.
    Escalate,
    /// The worker cannot move at all.
    Fatal,
    /// Any other movement code, passed through.
    Other(MoveCode),
}

/// Step toward `to` for `job`.
pub fn travel(ctx: &mut WorkerContext<'_>, to: &Position, job: Job) -> TravelOutcome {
    let code = ctx.world.move_toward(ctx.name, to, ctx.hint(job));
    match code {
        MoveCode::Ok => {
            ctx.memory.blocked_count = 0;
            ctx.world.set_spent_turn(ctx.name, true);
            TravelOutcome::Moved
        }
        MoveCode::Tired => {
            ctx.world.set_spent_turn(ctx.name, true);
            TravelOutcome::Moved
        }
        MoveCode::NoPath => {
            let count = ctx.memory.blocked_count.saturating_add(1);
            ctx.memory.blocked_count = count;
            ctx.world.say(ctx.name, &format!("No path ({count})"));
            debug!(worker = %ctx.name, count, ?job, "No path to target");
            if count >= ctx.settings.blocked_threshold {
                ctx.memory.blocked_count = 0;
                TravelOutcome::Escalate
            } else {
                TravelOutcome::Blocked { count }
            }
        }
        MoveCode::NoCapability => TravelOutcome::Fatal,
        MoveCode::Other(_) => TravelOutcome::Other(code),
    }
}
