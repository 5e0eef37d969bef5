//! Resume work remembered from earlier ticks.
//!
//! Before a role policy picks anything new, the worker tries to finish
//! what it started, always in the same order: gather, then build, then
//! deposit. A slot is kept only while its precondition still holds (room
//! left to gather, energy left to spend) and the resumed step used the
//! tick; otherwise it is cleared so the policy starts fresh.

use tracing::debug;

use crate::context::{TaskStatus, WorkerContext};
use crate::selector::GatherOptions;
use crate::tasks::{build, deposit, gather};

/// Resume remembered targets. `gather_options` are the active policy's.
pub fn continue_action(ctx: &mut WorkerContext<'_>, gather_options: &GatherOptions) -> TaskStatus {
    if ctx.memory.current_resource_target_id.is_some() {
        if !ctx.is_full() {
            let status = gather(ctx, gather_options);
            if status.ends_turn() {
                return status;
            }
        }
        debug!(worker = %ctx.name, "Dropping gather target");
        ctx.memory.current_resource_target_id = None;
    }

    if let Some(site) = ctx.memory.current_build_target_id {
        if ctx.carried() > 0 {
            let status = build(ctx, Some(site));
            if status.ends_turn() {
                return status;
            }
        }
        debug!(worker = %ctx.name, "Dropping build target");
        ctx.memory.current_build_target_id = None;
    }

    if let Some(sink) = ctx.memory.current_deposit_target_id {
        if ctx.carried() > 0 {
            let status = deposit(ctx, Some(sink));
            if status.ends_turn() {
                return status;
            }
        }
        debug!(worker = %ctx.name, "Dropping deposit target");
        ctx.memory.current_deposit_target_id = None;
    }

    TaskStatus::Available
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hive_types::{Position, Resource, Role, TargetKind, WorkerMemory, WorkerName};
    use hive_world::{SimWorld, WorldQuery};

    use super::*;
    use crate::settings::BehaviorSettings;
    use crate::tasks::testing::make_world;

    fn run(world: &mut SimWorld, memory: &mut WorkerMemory) -> TaskStatus {
        let name = WorkerName::from("Harvester_1");
        let settings = BehaviorSettings::default();
        let mut ctx = WorkerContext {
            world,
            name: &name,
            role: Role::Harvester,
            memory,
            settings: &settings,
        };
        continue_action(&mut ctx, &GatherOptions::HARVEST)
    }

    #[test]
    fn nothing_remembered_is_a_no_op() {
        let (mut world, _region, _name) = make_world(Role::Harvester, 0);
        let mut memory = WorkerMemory::default();
        assert_eq!(run(&mut world, &mut memory), TaskStatus::Available);
    }

    #[test]
    fn full_worker_drops_gather_target() {
        let (mut world, region, _name) = make_world(Role::Harvester, 50);
        let source = world
            .place(TargetKind::Source, Position::new(region, 16, 15))
            .unwrap();
        let mut memory = WorkerMemory {
            current_resource_target_id: Some(source),
            ..WorkerMemory::default()
        };

        assert_eq!(run(&mut world, &mut memory), TaskStatus::Available);
        assert_eq!(memory.current_resource_target_id, None);
    }

    #[test]
    fn build_is_resumed_before_deposit() {
        let (mut world, region, name) = make_world(Role::Harvester, 50);
        let site = world
            .place_site(TargetKind::Extension, Position::new(region, 16, 16), 100)
            .unwrap();
        let ext = world
            .place(TargetKind::Extension, Position::new(region, 15, 16))
            .unwrap();
        let mut memory = WorkerMemory {
            current_build_target_id: Some(site),
            current_deposit_target_id: Some(ext),
            ..WorkerMemory::default()
        };

        assert_eq!(run(&mut world, &mut memory), TaskStatus::Consumed);
        assert_eq!(world.object(site).unwrap().progress, 5);
        assert_eq!(world.object(ext).unwrap().store.get(Resource::Energy), 0);
        assert_eq!(memory.current_deposit_target_id, Some(ext));
        assert_eq!(world.worker(&name).unwrap().energy(), 45);
    }

    #[test]
    fn stale_build_target_falls_through_to_deposit() {
        let (mut world, region, _name) = make_world(Role::Harvester, 50);
        let site = world
            .place_site(TargetKind::Extension, Position::new(region, 16, 16), 100)
            .unwrap();
        world.remove_object(site);
        let ext = world
            .place(TargetKind::Extension, Position::new(region, 15, 16))
            .unwrap();
        let mut memory = WorkerMemory {
            current_build_target_id: Some(site),
            current_deposit_target_id: Some(ext),
            ..WorkerMemory::default()
        };

        assert_eq!(run(&mut world, &mut memory), TaskStatus::Consumed);
        assert_eq!(memory.current_build_target_id, None);
        assert_eq!(world.object(ext).unwrap().store.get(Resource::Energy), 50);
    }

    #[test]
    fn empty_worker_clears_spend_targets() {
        let (mut world, region, _name) = make_world(Role::Harvester, 0);
        let ext = world
            .place(TargetKind::Extension, Position::new(region, 15, 16))
            .unwrap();
        let mut memory = WorkerMemory {
            current_deposit_target_id: Some(ext),
            ..WorkerMemory::default()
        };

        assert_eq!(run(&mut world, &mut memory), TaskStatus::Available);
        assert_eq!(memory.current_deposit_target_id, None);
    }
}
