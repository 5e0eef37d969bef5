//! Priority-ordered target selection.
//!
//! Each selector walks a fixed list of tiers and returns the nearest
//! candidate (by path cost) of the first tier that has one. A nearer
//! candidate in a later tier never beats a farther one in an earlier tier.
//! Selectors only read the world; callers persist what they pick.

use hive_types::{Position, Resource, Target, TargetId, TargetKind};
use hive_world::{FindScope, WorldQuery};

use crate::settings::BehaviorSettings;

/// Which resource holders a gather may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatherOptions {
    /// Pick up energy lying on the ground.
    pub pickup_dropped: bool,
    /// Withdraw from storage, not only containers.
    pub from_storage: bool,
    /// Withdraw from links.
    pub use_links: bool,
    /// Harvest active sources.
    pub from_sources: bool,
}

impl GatherOptions {
    /// Containers and sources only.
    pub const HARVEST: Self = Self {
        pickup_dropped: false,
        from_storage: false,
        use_links: false,
        from_sources: true,
    };
}

/// Find where to gather energy.
///
/// Tiers: dropped energy (if enabled), then containers holding more than
/// `container_min_energy` (storage and links only if enabled), then active
/// sources (if enabled). `exclude` is never returned.
pub fn find_resource_source<W: WorldQuery + ?Sized>(
    world: &W,
    from: &Position,
    options: &GatherOptions,
    settings: &BehaviorSettings,
    exclude: Option<TargetId>,
) -> Option<TargetId> {
    let allowed = |t: &Target| exclude != Some(t.id);

    if options.pickup_dropped
        && let Some(pile) = world.find_closest_by_path(from, FindScope::DroppedResources, &|t| {
            allowed(t) && t.store.get(Resource::Energy) > 0
        })
    {
        return Some(pile.id);
    }

    let holder = world.find_closest_by_path(from, FindScope::Structures, &|t| {
        let kind_ok = match t.kind {
            TargetKind::Container => true,
            TargetKind::Storage => options.from_storage,
            TargetKind::Link => options.use_links,
            _ => false,
        };
        kind_ok && allowed(t) && t.store.get(Resource::Energy) > settings.container_min_energy
    });
    if let Some(holder) = holder {
        return Some(holder.id);
    }

    if options.from_sources {
        return world
            .find_closest_by_path(from, FindScope::ActiveSources, &allowed)
            .map(|t| t.id);
    }
    None
}

/// Whether a target is a bounded sink with no room left.
fn is_full_sink(target: &Target) -> bool {
    target.kind.is_bounded_sink() && target.store.free() == 0
}

/// Find where to deposit energy.
///
/// A remembered structure that still exists is used unless it is a full
/// bounded sink, in which case nothing is returned. Otherwise the tiers are
/// extensions and spawns with free room, then towers with free room.
pub fn find_deposit_sink<W: WorldQuery + ?Sized>(
    world: &W,
    from: &Position,
    remembered: Option<TargetId>,
) -> Option<TargetId> {
    if let Some(target) = remembered.and_then(|id| world.object(id)) {
        return (!is_full_sink(target)).then_some(target.id);
    }

    world
        .find_closest_by_path(from, FindScope::MyStructures, &|t| {
            matches!(t.kind, TargetKind::Extension | TargetKind::Spawn) && t.store.free() > 0
        })
        .or_else(|| {
            world.find_closest_by_path(from, FindScope::Structures, &|t| {
                t.kind == TargetKind::Tower && t.store.free() > 0
            })
        })
        .map(|t| t.id)
}

/// Find what to build: the remembered site while it exists, else the
/// nearest own construction site.
pub fn find_build_target<W: WorldQuery + ?Sized>(
    world: &W,
    from: &Position,
    remembered: Option<TargetId>,
) -> Option<TargetId> {
    if let Some(site) = remembered.and_then(|id| world.object(id))
        && site.kind == TargetKind::ConstructionSite
    {
        return Some(site.id);
    }
    world
        .find_closest_by_path(from, FindScope::MyConstructionSites, &|_| true)
        .map(|t| t.id)
}
