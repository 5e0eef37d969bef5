//! Seeded colony layout for the simulated world.
//!
//! Generates one or more open regions with sources, a controller, and a
//! few wall segments. The first region is home: it owns its controller and
//! holds the spawn, a container next to the first source, and extension
//! construction sites near the spawn. Other regions hold sources and an
//! unowned controller.

use std::collections::BTreeSet;

use hive_types::{Position, RegionId, Resource, TargetId, TargetKind};
use rand::Rng;
use tracing::info;

use crate::error::WorldError;
use crate::grid::{Tile, chebyshev};
use crate::sim::{DEFAULT_SITE_PROGRESS, SimWorld};

/// Smallest region side that fits a colony.
pub const MIN_REGION_SIDE: u32 = 10;

/// Energy the spawn starts with.
pub const STARTING_SPAWN_ENERGY: u32 = 300;

/// Number of extension construction sites placed around the spawn.
pub const STARTING_EXTENSION_SITES: u32 = 2;

/// Tile attempts before giving up on placing an object.
const PLACEMENT_ATTEMPTS: u32 = 1000;

/// Inputs for [`create_colony`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Region width in tiles.
    pub width: u32,
    /// Region height in tiles.
    pub height: u32,
    /// Number of regions; the first is home.
    pub regions: u32,
    /// Sources placed in each region.
    pub sources_per_region: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: 25,
            height: 25,
            regions: 1,
            sources_per_region: 2,
        }
    }
}

/// Identifiers of the generated objects, returned alongside the world so
/// callers can place workers and look things up.
#[derive(Debug, Clone)]
pub struct ColonyLayout {
    /// All regions; the first is home.
    pub regions: Vec<RegionId>,
    /// The home spawn.
    pub spawn: TargetId,
    /// The home controller.
    pub controller: TargetId,
    /// Every source, home region first.
    pub sources: Vec<TargetId>,
}

impl ColonyLayout {
    /// The home region.
    pub fn home(&self) -> Option<RegionId> {
        self.regions.first().copied()
    }
}

/// Pick a free tile at least `margin` away from every tile in `avoid`.
fn free_tile(
    rng: &mut impl Rng,
    params: &LayoutParams,
    occupied: &BTreeSet<Tile>,
    avoid: &[Tile],
    margin: u32,
) -> Result<Tile, WorldError> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let tile = (
            rng.random_range(1..params.width.saturating_sub(1)),
            rng.random_range(1..params.height.saturating_sub(1)),
        );
        if !occupied.contains(&tile) && avoid.iter().all(|a| chebyshev(*a, tile) >= margin) {
            return Ok(tile);
        }
    }
    Err(WorldError::InvalidLayout {
        reason: format!("no free tile after {PLACEMENT_ATTEMPTS} attempts"),
    })
}

/// Add a short horizontal wall segment that keeps clear of every object.
fn wall_segment(
    world: &mut SimWorld,
    rng: &mut impl Rng,
    region: RegionId,
    params: &LayoutParams,
    occupied: &BTreeSet<Tile>,
) {
    let length = rng.random_range(2..=4_u32);
    let x0 = rng.random_range(1..params.width.saturating_sub(length).max(2));
    let y = rng.random_range(1..params.height.saturating_sub(1));
    let Some(grid) = world.grid_mut(region) else {
        return;
    };
    for dx in 0..length {
        let tile = (x0.saturating_add(dx), y);
        if occupied.iter().all(|o| chebyshev(*o, tile) > 1) {
            grid.add_wall(tile);
        }
    }
}

/// Generate a colony.
///
/// # Errors
///
/// Returns [`WorldError::InvalidLayout`] when the regions are too small or
/// there are none, or when objects cannot be placed.
pub fn create_colony(
    params: &LayoutParams,
    rng: &mut impl Rng,
) -> Result<(SimWorld, ColonyLayout), WorldError> {
    if params.width < MIN_REGION_SIDE || params.height < MIN_REGION_SIDE {
        return Err(WorldError::InvalidLayout {
            reason: format!(
                "regions must be at least {MIN_REGION_SIDE}x{MIN_REGION_SIDE}, got {}x{}",
                params.width, params.height
            ),
        });
    }
    if params.regions == 0 {
        return Err(WorldError::InvalidLayout {
            reason: "at least one region is required".to_owned(),
        });
    }

    let mut world = SimWorld::new();
    let mut regions = Vec::new();
    let mut sources = Vec::new();
    let mut home_objects = None;

    for index in 0..params.regions {
        let region = world.add_region(params.width, params.height);
        regions.push(region);
        let is_home = index == 0;
        let mut occupied = BTreeSet::new();

        let controller_tile = free_tile(rng, params, &occupied, &[], 0)?;
        occupied.insert(controller_tile);
        let controller = world.place(
            TargetKind::Controller,
            Position::new(region, controller_tile.0, controller_tile.1),
        )?;
        if !is_home && let Some(c) = world.object_mut(controller) {
            c.owned = false;
        }

        let spawn_tile = if is_home {
            let tile = free_tile(rng, params, &occupied, &[controller_tile], 3)?;
            occupied.insert(tile);
            Some(tile)
        } else {
            None
        };
        let spawn_avoid: Vec<Tile> = spawn_tile.into_iter().collect();

        let mut first_source = None;
        for _ in 0..params.sources_per_region {
            let tile = free_tile(rng, params, &occupied, &spawn_avoid, 4)?;
            occupied.insert(tile);
            let id = world.place(TargetKind::Source, Position::new(region, tile.0, tile.1))?;
            sources.push(id);
            first_source.get_or_insert(tile);
        }

        if let Some(spawn_tile) = spawn_tile {
            let spawn = world.place(
                TargetKind::Spawn,
                Position::new(region, spawn_tile.0, spawn_tile.1),
            )?;
            if let Some(s) = world.object_mut(spawn) {
                s.store.add(Resource::Energy, STARTING_SPAWN_ENERGY);
            }

            if let Some(source_tile) = first_source {
                let tile = world.grid(region).and_then(|g| {
                    g.neighbors(source_tile)
                        .into_iter()
                        .find(|t| !occupied.contains(t))
                });
                if let Some(tile) = tile {
                    occupied.insert(tile);
                    world.place(TargetKind::Container, Position::new(region, tile.0, tile.1))?;
                }
            }

            for _ in 0..STARTING_EXTENSION_SITES {
                let tile = free_tile(rng, params, &occupied, &[], 0)?;
                occupied.insert(tile);
                world.place_site(
                    TargetKind::Extension,
                    Position::new(region, tile.0, tile.1),
                    DEFAULT_SITE_PROGRESS,
                )?;
            }

            home_objects = Some((spawn, controller));
        }

        let segments = rng.random_range(1..=3_u32);
        for _ in 0..segments {
            wall_segment(&mut world, rng, region, params, &occupied);
        }
    }

    let Some((spawn, controller)) = home_objects else {
        return Err(WorldError::InvalidLayout {
            reason: "home region has no spawn".to_owned(),
        });
    };

    info!(
        regions = regions.len(),
        sources = sources.len(),
        width = params.width,
        height = params.height,
        "Colony layout generated"
    );

    Ok((
        world,
        ColonyLayout {
            regions,
            spawn,
            controller,
            sources,
        },
    ))
}
