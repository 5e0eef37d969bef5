//! Role behavior policies as data.
//!
//! Every role runs the same pipeline: resume remembered work, then gather
//! while `needs_resource` is set, otherwise walk the role's ordered list of
//! spending steps until one uses the tick. Roles differ only in their
//! [`Policy`] row.

use hive_types::Role;

use crate::context::{TaskStatus, WorkerContext};
use crate::continuation::continue_action;
use crate::selector::GatherOptions;
use crate::tasks::{build, deposit, gather, upgrade};

/// A step a loaded worker can spend its energy on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Refill a spawn, extension, or tower.
    Deposit,
    /// Work on a construction site.
    Build,
    /// Upgrade the home controller.
    Upgrade,
}

/// One role's decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    /// The role this row belongs to.
    pub role: Role,
    /// Where the role gathers from.
    pub gather: GatherOptions,
    /// Spending steps in priority order.
    pub when_loaded: [Step; 3],
}

/// Gather from containers and sources; feed structures first.
pub const HARVESTER: Policy = Policy {
    role: Role::Harvester,
    gather: GatherOptions::HARVEST,
    when_loaded: [Step::Deposit, Step::Build, Step::Upgrade],
};

/// Acquire stored energy only, never harvest; build first.
pub const BUILDER: Policy = Policy {
    role: Role::Builder,
    gather: GatherOptions {
        pickup_dropped: true,
        from_storage: true,
        use_links: true,
        from_sources: false,
    },
    when_loaded: [Step::Build, Step::Upgrade, Step::Deposit],
};

/// Gather from anything but links; upgrade first.
pub const UPGRADER: Policy = Policy {
    role: Role::Upgrader,
    gather: GatherOptions {
        pickup_dropped: true,
        from_storage: true,
        use_links: false,
        from_sources: true,
    },
    when_loaded: [Step::Upgrade, Step::Build, Step::Deposit],
};

/// The policy row for a role.
pub const fn policy_for(role: Role) -> &'static Policy {
    match role {
        Role::Harvester => &HARVESTER,
        Role::Builder => &BUILDER,
        Role::Upgrader => &UPGRADER,
    }
}

impl Policy {
    /// Decide and act for one worker this tick.
    pub fn run(&self, ctx: &mut WorkerContext<'_>) -> TaskStatus {
        if ctx.is_spent() {
            return TaskStatus::Available;
        }

        let status = continue_action(ctx, &self.gather);
        if status.ends_turn() {
            return status;
        }

        if ctx.memory.needs_resource {
            return gather(ctx, &self.gather);
        }

        for step in self.when_loaded {
            let status = match step {
                Step::Deposit => deposit(ctx, None),
                Step::Build => build(ctx, None),
                Step::Upgrade => upgrade(ctx),
            };
            if status.ends_turn() {
                return status;
            }
        }
        TaskStatus::Available
    }
}
