//! Spend carried energy on construction sites.

use hive_types::{ActionCode, Job, TargetId};

use super::{Slot, settle_travel};
use crate::context::{TaskStatus, WorkerContext};
use crate::selector::find_build_target;
use crate::travel::travel;

/// Build. With `specific`, the step is skipped once that site is gone.
pub fn build(ctx: &mut WorkerContext<'_>, specific: Option<TargetId>) -> TaskStatus {
    if ctx.is_spent() {
        return TaskStatus::Consumed;
    }
    let Some(from) = ctx.position() else {
        return TaskStatus::Available;
    };
    if let Some(id) = specific
        && ctx.world.object(id).is_none()
    {
        return TaskStatus::Available;
    }

    let Some((id, pos)) = find_build_target(&*ctx.world, &from, specific)
        .and_then(|id| ctx.world.object(id))
        .map(|t| (t.id, t.pos))
    else {
        return TaskStatus::Available;
    };

    ctx.memory.current_build_target_id = Some(id);
    let code = ctx.world.build(ctx.name, id);
    ctx.sync_phase();

    match code {
        ActionCode::Ok => {
            // A finished site disappears; stop remembering it.
            if ctx.world.object(id).is_none() {
                ctx.memory.current_build_target_id = None;
            }
            ctx.acted()
        }
        ActionCode::NotInRange => {
            let outcome = travel(ctx, &pos, Job::Build);
            settle_travel(ctx, outcome, Some(Slot::Build))
        }
        ActionCode::NoCapability => ctx.terminate("No bodypart for building"),
        _ => {
            ctx.memory.current_build_target_id = None;
            TaskStatus::Available
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hive_types::{Position, Role, TargetKind, WorkerMemory, WorkerName};
    use hive_world::{SimWorld, WorldQuery};

    use super::*;
    use crate::settings::BehaviorSettings;
    use crate::tasks::testing::{make_world, wall_in};

    fn run(world: &mut SimWorld, memory: &mut WorkerMemory, specific: Option<TargetId>) -> TaskStatus {
        let name = WorkerName::from("Builder_1");
        let settings = BehaviorSettings::default();
        let mut ctx = WorkerContext {
            world,
            name: &name,
            role: Role::Builder,
            memory,
            settings: &settings,
        };
        build(&mut ctx, specific)
    }

    #[test]
    fn site_in_range_gets_progress() {
        let (mut world, region, _name) = make_world(Role::Builder, 50);
        let site = world
            .place_site(TargetKind::Extension, Position::new(region, 17, 17), 100)
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, None), TaskStatus::Consumed);
        assert_eq!(memory.current_build_target_id, Some(site));
        assert_eq!(world.object(site).unwrap().progress, 5);
    }

    #[test]
    fn finished_site_is_forgotten() {
        let (mut world, region, _name) = make_world(Role::Builder, 50);
        world
            .place_site(TargetKind::Extension, Position::new(region, 16, 16), 5)
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, None), TaskStatus::Consumed);
        assert_eq!(memory.current_build_target_id, None);
    }

    #[test]
    fn vanished_specific_site_is_skipped() {
        let (mut world, region, _name) = make_world(Role::Builder, 50);
        let gone = world
            .place_site(TargetKind::Extension, Position::new(region, 16, 16), 100)
            .unwrap();
        world.remove_object(gone);
        world
            .place_site(TargetKind::Extension, Position::new(region, 17, 17), 100)
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, Some(gone)), TaskStatus::Available);
        assert_eq!(memory.current_build_target_id, None);
    }

    #[test]
    fn walled_site_is_abandoned_after_threshold() {
        let (mut world, region, _name) = make_world(Role::Builder, 50);
        wall_in(&mut world, region, (25, 25));
        let site = world
            .place_site(TargetKind::Extension, Position::new(region, 25, 25), 100)
            .unwrap();
        let mut memory = WorkerMemory::default();

        for expected in 1..5 {
            assert_eq!(run(&mut world, &mut memory, Some(site)), TaskStatus::Consumed);
            assert_eq!(memory.blocked_count, expected);
            assert_eq!(memory.current_build_target_id, Some(site));
        }
        assert_eq!(run(&mut world, &mut memory, Some(site)), TaskStatus::Available);
        assert_eq!(memory.blocked_count, 0);
        assert_eq!(memory.current_build_target_id, None);
        assert_eq!(world.object(site).unwrap().progress, 0);
    }

    #[test]
    fn empty_worker_cannot_build() {
        let (mut world, region, _name) = make_world(Role::Builder, 0);
        world
            .place_site(TargetKind::Extension, Position::new(region, 16, 16), 100)
            .unwrap();
        let mut memory = WorkerMemory::default();

        assert_eq!(run(&mut world, &mut memory, None), TaskStatus::Available);
        assert_eq!(memory.current_build_target_id, None);
        assert!(memory.needs_resource);
    }
}
