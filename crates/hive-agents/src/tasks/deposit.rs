//! Refill spawns, extensions, and towers with carried energy.

use hive_types::{ActionCode, Job, Resource, TargetId};

use super::{Slot, settle_travel};
use crate::context::{TaskStatus, WorkerContext};
use crate::selector::find_deposit_sink;
use crate::travel::travel;

/// Deposit energy. With `specific`, that structure is used while it exists
/// and the step is skipped when it is already full. A vanished `specific`
/// falls back to the usual sinks.
pub fn deposit(ctx: &mut WorkerContext<'_>, specific: Option<TargetId>) -> TaskStatus {
    if ctx.is_spent() {
        return TaskStatus::Consumed;
    }
    let Some(from) = ctx.position() else {
        return TaskStatus::Available;
    };
    let Some((id, pos)) = find_deposit_sink(&*ctx.world, &from, specific)
        .and_then(|id| ctx.world.object(id))
        .map(|t| (t.id, t.pos))
    else {
        return TaskStatus::Available;
    };

    ctx.memory.current_deposit_target_id = Some(id);
    let code = ctx.world.transfer(ctx.name, id, Resource::Energy);
    ctx.sync_phase();

    match code {
        ActionCode::Ok => ctx.acted(),
        ActionCode::NotInRange => {
            let outcome = travel(ctx, &pos, Job::Recharge);
            settle_travel(ctx, outcome, Some(Slot::Deposit))
        }
        ActionCode::NoCapability => ctx.terminate("No bodypart for carrying"),
        _ => {
            ctx.memory.current_deposit_target_id = None;
            TaskStatus::Available
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hive_types::{Position, Role, Store, TargetKind, WorkerMemory, WorkerName};
    use hive_world::{SimWorld, WorldQuery};

    use super::*;
    use crate::settings::BehaviorSettings;
    use crate::tasks::testing::{make_world, wall_in};

    fn run(world: &mut SimWorld, memory: &mut WorkerMemory, specific: Option<TargetId>) -> TaskStatus {
        let name = WorkerName::from("Harvester_1");
        let settings = BehaviorSettings::default();
        let mut ctx = WorkerContext {
            world,
            name: &name,
            role: Role::Harvester,
            memory,
            settings: &settings,
        };
        deposit(&mut ctx, specific)
    }

    #[test]
    fn adjacent_extension_is_filled() {
        let (mut world, region, name) = make_world(Role::Harvester, 50);
        let ext = world
            .place(TargetKind::Extension, Position::new(region, 15, 16))
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, None), TaskStatus::Consumed);
        assert_eq!(memory.current_deposit_target_id, Some(ext));
        assert_eq!(world.object(ext).unwrap().store.get(Resource::Energy), 50);
        assert!(memory.needs_resource);
        assert_eq!(world.worker(&name).unwrap().energy(), 0);
    }

    #[test]
    fn distant_sink_is_approached_and_remembered() {
        let (mut world, region, name) = make_world(Role::Harvester, 50);
        let spawn = world
            .place(TargetKind::Spawn, Position::new(region, 25, 25))
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, None), TaskStatus::Consumed);
        assert_eq!(memory.current_deposit_target_id, Some(spawn));
        assert_eq!(world.worker(&name).unwrap().pos.x, 16);
    }

    #[test]
    fn full_specific_sink_is_skipped() {
        let (mut world, region, _name) = make_world(Role::Harvester, 50);
        let full = world
            .place(TargetKind::Extension, Position::new(region, 15, 16))
            .unwrap();
        world.object_mut(full).unwrap().store = Store::filled(Resource::Energy, 50, 50);
        world
            .place(TargetKind::Spawn, Position::new(region, 16, 16))
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, Some(full)), TaskStatus::Available);
        assert_eq!(memory.current_deposit_target_id, None);
    }

    #[test]
    fn vanished_specific_sink_falls_back_to_nearest() {
        let (mut world, region, _name) = make_world(Role::Harvester, 50);
        let gone = world
            .place(TargetKind::Extension, Position::new(region, 15, 16))
            .unwrap();
        world.remove_object(gone);
        let spawn = world
            .place(TargetKind::Spawn, Position::new(region, 16, 16))
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, Some(gone)), TaskStatus::Consumed);
        assert_eq!(memory.current_deposit_target_id, Some(spawn));
        assert_eq!(world.object(spawn).unwrap().store.get(Resource::Energy), 50);
    }

    #[test]
    fn walled_sink_is_abandoned_after_threshold() {
        let (mut world, region, _name) = make_world(Role::Harvester, 50);
        wall_in(&mut world, region, (25, 25));
        let ext = world
            .place(TargetKind::Extension, Position::new(region, 25, 25))
            .unwrap();
        let mut memory = WorkerMemory::default();

        for expected in 1..5 {
            assert_eq!(run(&mut world, &mut memory, Some(ext)), TaskStatus::Consumed);
            assert_eq!(memory.blocked_count, expected);
            assert_eq!(memory.current_deposit_target_id, Some(ext));
        }
        assert_eq!(run(&mut world, &mut memory, Some(ext)), TaskStatus::Available);
        assert_eq!(memory.blocked_count, 0);
        assert_eq!(memory.current_deposit_target_id, None);
    }

    #[test]
    fn nothing_to_refill_leaves_tick_available() {
        let (mut world, _region, _name) = make_world(Role::Harvester, 50);
        let mut memory = WorkerMemory::default();
        assert_eq!(run(&mut world, &mut memory, None), TaskStatus::Available);
    }
}
