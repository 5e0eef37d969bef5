//! Whole-tick scenarios for the Hive worker engine.
//!
//! Each test builds a small [`SimWorld`], runs one or more ticks through
//! [`run_tick`], and checks worker memory and world state afterwards.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use hive_core::{MemoryStore, SimulationConfig, run_tick};
use hive_types::{
    BodyPart, Position, RegionId, Resource, Role, TargetId, TargetKind, Worker, WorkerMemory,
    WorkerName,
};
use hive_world::{Simulation, SimWorld, WorldQuery};

// =============================================================================
// Fixtures
// =============================================================================

fn body() -> Vec<BodyPart> {
    vec![BodyPart::Work, BodyPart::Carry, BodyPart::Move, BodyPart::Move]
}

/// A config that never spawns anything, so only hand-placed workers run.
fn no_spawn_config() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.roles.clear();
    config
}

fn make_world() -> (SimWorld, RegionId) {
    let mut world = SimWorld::new();
    let region = world.add_region(30, 30);
    (world, region)
}

fn add_worker(
    world: &mut SimWorld,
    region: RegionId,
    name: &str,
    role: Role,
    at: (u32, u32),
    energy: u32,
) -> WorkerName {
    let name = WorkerName::from(name);
    let mut worker = Worker::new(name.clone(), role, Position::new(region, at.0, at.1), body());
    worker.store.add(Resource::Energy, energy);
    world.add_worker(worker).unwrap();
    name
}

fn add_container(world: &mut SimWorld, region: RegionId, at: (u32, u32), energy: u32) -> TargetId {
    let id = world
        .place(TargetKind::Container, Position::new(region, at.0, at.1))
        .unwrap();
    world
        .object_mut(id)
        .unwrap()
        .store
        .add(Resource::Energy, energy);
    id
}

fn wall_in(world: &mut SimWorld, region: RegionId, center: (u32, u32)) {
    let grid = world.grid_mut(region).unwrap();
    for y in center.1.saturating_sub(1)..=center.1.saturating_add(1) {
        for x in center.0.saturating_sub(1)..=center.0.saturating_add(1) {
            if (x, y) != center {
                grid.add_wall((x, y));
            }
        }
    }
}

fn remembered(memory: &MemoryStore, name: &WorkerName) -> WorkerMemory {
    memory.get(name).cloned().unwrap()
}

// =============================================================================
// Normalization and the gather phase
// =============================================================================

#[test]
fn empty_worker_starts_gathering_on_first_tick() {
    let (mut world, region) = make_world();
    let source = world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 0);
    let mut memory = MemoryStore::new();

    run_tick(&mut world, &mut memory, &no_spawn_config());

    let record = remembered(&memory, &name);
    assert!(record.needs_resource);
    assert_eq!(record.home_region_id, Some(region));
    assert_eq!(record.current_resource_target_id, Some(source));
    assert_eq!(world.worker(&name).unwrap().energy(), 2);
}

#[test]
fn needs_resource_flips_on_the_tick_capacity_is_reached() {
    let (mut world, region) = make_world();
    world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 48);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            needs_resource: true,
            ..WorkerMemory::default()
        },
    );

    run_tick(&mut world, &mut memory, &no_spawn_config());

    assert!(world.worker(&name).unwrap().store.is_full());
    assert!(!remembered(&memory, &name).needs_resource);
}

#[test]
fn full_transition_clears_only_the_resource_slot() {
    // Reaching full clears the gather target but leaves the build and
    // deposit targets alone. This asymmetry is kept on purpose.
    let (mut world, region) = make_world();
    let source = world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let site = world
        .place_site(TargetKind::Extension, Position::new(region, 5, 6), 100)
        .unwrap();
    let ext = world
        .place(TargetKind::Extension, Position::new(region, 4, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 50);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            needs_resource: true,
            current_resource_target_id: Some(source),
            current_build_target_id: Some(site),
            current_deposit_target_id: Some(ext),
            ..WorkerMemory::default()
        },
    );

    run_tick(&mut world, &mut memory, &no_spawn_config());

    let record = remembered(&memory, &name);
    assert!(!record.needs_resource);
    assert_eq!(record.current_resource_target_id, None);
    assert_eq!(record.current_build_target_id, Some(site));
    assert_eq!(record.current_deposit_target_id, Some(ext));
    // The remembered build was resumed ahead of the harvester's deposit.
    assert_eq!(world.object(site).unwrap().progress, 5);
}

#[test]
fn vanished_resource_target_falls_through_to_fresh_selection() {
    let (mut world, region) = make_world();
    let source = world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 0);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            needs_resource: true,
            current_resource_target_id: Some(TargetId::new()),
            ..WorkerMemory::default()
        },
    );

    let summary = run_tick(&mut world, &mut memory, &no_spawn_config());

    assert_eq!(summary.acted, 1);
    assert_eq!(remembered(&memory, &name).current_resource_target_id, Some(source));
    assert_eq!(world.worker(&name).unwrap().energy(), 2);
}

#[test]
fn tapped_source_is_reselected_once_excluding_it() {
    let (mut world, region) = make_world();
    let tapped = world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    world
        .object_mut(tapped)
        .unwrap()
        .store
        .remove(Resource::Energy, u32::MAX);
    let fresh = world
        .place(TargetKind::Source, Position::new(region, 4, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 0);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            needs_resource: true,
            current_resource_target_id: Some(tapped),
            ..WorkerMemory::default()
        },
    );

    run_tick(&mut world, &mut memory, &no_spawn_config());

    assert_eq!(remembered(&memory, &name).current_resource_target_id, Some(fresh));
    assert_eq!(world.worker(&name).unwrap().energy(), 2);
}

// =============================================================================
// End of life
// =============================================================================

#[test]
fn dying_worker_drops_its_load_and_loses_memory() {
    let (mut world, region) = make_world();
    world
        .place(TargetKind::Extension, Position::new(region, 6, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 50);
    world.worker_mut(&name).unwrap().ticks_to_live = Some(1);
    let mut memory = MemoryStore::new();
    memory.get_or_default(&name);

    let summary = run_tick(&mut world, &mut memory, &no_spawn_config());

    assert_eq!(summary.died, vec![name.clone()]);
    assert_eq!(summary.acted, 0);
    assert!(!memory.contains(&name));
    assert_eq!(world.worker(&name).unwrap().energy(), 0);

    let pile = world
        .objects()
        .find(|t| t.kind == TargetKind::DroppedResource)
        .unwrap();
    assert_eq!(pile.pos, Position::new(region, 5, 5));
    assert_eq!(pile.store.get(Resource::Energy), 50);
    assert!(
        world
            .messages()
            .iter()
            .any(|(who, text)| *who == name && text == "Dying -- dropping resources")
    );
}

#[test]
fn worker_without_work_parts_terminates_itself() {
    let (mut world, region) = make_world();
    world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let name = WorkerName::from("Harvester_1");
    world
        .add_worker(Worker::new(
            name.clone(),
            Role::Harvester,
            Position::new(region, 5, 5),
            vec![BodyPart::Carry, BodyPart::Move],
        ))
        .unwrap();
    let mut memory = MemoryStore::new();

    let summary = run_tick(&mut world, &mut memory, &no_spawn_config());

    assert_eq!(summary.terminated, vec![name.clone()]);
    assert!(world.worker(&name).is_none());
    assert!(!memory.contains(&name));
}

// =============================================================================
// Blocked targets
// =============================================================================

#[test]
fn walled_container_is_abandoned_after_five_no_paths() {
    let (mut world, region) = make_world();
    let walled = add_container(&mut world, region, (25, 25), 500);
    wall_in(&mut world, region, (25, 25));
    let open = add_container(&mut world, region, (10, 5), 500);
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 0);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            needs_resource: true,
            current_resource_target_id: Some(walled),
            ..WorkerMemory::default()
        },
    );
    let config = no_spawn_config();

    for expected in 1..=4 {
        run_tick(&mut world, &mut memory, &config);
        world.advance();
        let record = remembered(&memory, &name);
        assert_eq!(record.blocked_count, expected);
        assert_eq!(record.current_resource_target_id, Some(walled));
    }

    run_tick(&mut world, &mut memory, &config);

    let record = remembered(&memory, &name);
    assert_eq!(record.current_resource_target_id, Some(open));
    assert_eq!(record.blocked_count, 0);
    assert_ne!(world.worker(&name).unwrap().pos, Position::new(region, 5, 5));
}

// =============================================================================
// Selection and mutual exclusion
// =============================================================================

#[test]
fn gather_tiers_win_regardless_of_distance() {
    let (mut world, region) = make_world();
    let pile = world
        .place_pile(Resource::Energy, 40, Position::new(region, 25, 25))
        .unwrap();
    let container = add_container(&mut world, region, (15, 25), 500);
    world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Upgrader_1", Role::Upgrader, (5, 5), 0);
    let config = no_spawn_config();

    let mut memory = MemoryStore::new();
    run_tick(&mut world, &mut memory, &config);
    assert_eq!(remembered(&memory, &name).current_resource_target_id, Some(pile));

    world.remove_object(pile);
    world.advance();
    let mut memory = MemoryStore::new();
    run_tick(&mut world, &mut memory, &config);
    assert_eq!(
        remembered(&memory, &name).current_resource_target_id,
        Some(container)
    );
}

#[test]
fn loaded_worker_takes_exactly_one_action() {
    let (mut world, region) = make_world();
    let site = world
        .place_site(TargetKind::Extension, Position::new(region, 6, 5), 100)
        .unwrap();
    let ext = world
        .place(TargetKind::Extension, Position::new(region, 4, 5))
        .unwrap();
    let controller = world
        .place(TargetKind::Controller, Position::new(region, 5, 6))
        .unwrap();
    let name = add_worker(&mut world, region, "Builder_1", Role::Builder, (5, 5), 50);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            current_deposit_target_id: Some(ext),
            ..WorkerMemory::default()
        },
    );

    let summary = run_tick(&mut world, &mut memory, &no_spawn_config());

    assert_eq!(summary.acted, 1);
    // The remembered deposit is resumed before the builder's own build step.
    assert_eq!(world.object(ext).unwrap().store.get(Resource::Energy), 50);
    assert_eq!(world.object(site).unwrap().progress, 0);
    assert_eq!(world.object(controller).unwrap().progress, 0);
    assert_eq!(world.worker(&name).unwrap().energy(), 0);
}

#[test]
fn vanished_deposit_target_falls_back_to_nearest_sink() {
    let (mut world, region) = make_world();
    let gone = world
        .place(TargetKind::Extension, Position::new(region, 4, 5))
        .unwrap();
    world.remove_object(gone);
    let spawn = world
        .place(TargetKind::Spawn, Position::new(region, 6, 5))
        .unwrap();
    let site = world
        .place_site(TargetKind::Extension, Position::new(region, 5, 6), 100)
        .unwrap();
    let name = add_worker(&mut world, region, "Builder_1", Role::Builder, (5, 5), 50);
    let mut memory = MemoryStore::new();
    memory.insert(
        name.clone(),
        WorkerMemory {
            current_deposit_target_id: Some(gone),
            ..WorkerMemory::default()
        },
    );

    let summary = run_tick(&mut world, &mut memory, &no_spawn_config());

    assert_eq!(summary.acted, 1);
    assert_eq!(world.object(spawn).unwrap().store.get(Resource::Energy), 50);
    assert_eq!(world.object(site).unwrap().progress, 0);
    assert_eq!(remembered(&memory, &name).current_deposit_target_id, Some(spawn));
}

// =============================================================================
// Spawning and memory persistence
// =============================================================================

#[test]
fn taken_tick_name_is_suffixed() {
    let (mut world, region) = make_world();
    let spawn = world
        .place(TargetKind::Spawn, Position::new(region, 15, 15))
        .unwrap();
    world
        .object_mut(spawn)
        .unwrap()
        .store
        .add(Resource::Energy, 300);
    add_worker(&mut world, region, "Harvester_1000", Role::Harvester, (2, 2), 0);
    world.set_tick(1000);
    let mut memory = MemoryStore::new();

    let summary = run_tick(&mut world, &mut memory, &SimulationConfig::default());

    assert_eq!(summary.spawned, vec![WorkerName::from("Harvester_1000_1")]);
    assert!(world.worker(&WorkerName::from("Harvester_1000_1")).unwrap().spawning);
}

#[test]
fn partial_memory_blob_reads_as_first_tick_defaults() {
    let (mut world, region) = make_world();
    world
        .place(TargetKind::Source, Position::new(region, 6, 5))
        .unwrap();
    let name = add_worker(&mut world, region, "Harvester_1", Role::Harvester, (5, 5), 0);
    let mut memory = MemoryStore::from_json(r#"{"Harvester_1": {"blockedCount": 3}}"#).unwrap();

    run_tick(&mut world, &mut memory, &no_spawn_config());

    let record = remembered(&memory, &name);
    assert!(record.needs_resource);
    assert_eq!(record.home_region_id, Some(region));
    assert_eq!(record.blocked_count, 0);
}
