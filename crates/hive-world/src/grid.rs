//! Region grids: walkable tiles, walls, and breadth-first path search.
//!
//! Every region is a rectangular grid. Movement is 8-directional and each
//! step costs one. A path "reaches" a target once it ends on any tile
//! within the requested range of it, so targets standing on or behind a
//! wall are only reachable if some tile next to them is.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

/// A tile coordinate inside a grid.
pub type Tile = (u32, u32);

/// The walkability map of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    walls: BTreeSet<Tile>,
}

impl Grid {
    /// Create an open grid with no walls.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
        }
    }

    /// Grid width in tiles.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether the tile lies inside the grid.
    pub const fn contains(&self, (x, y): Tile) -> bool {
        x < self.width && y < self.height
    }

    /// Turn a tile into a wall. Tiles outside the grid are ignored.
    pub fn add_wall(&mut self, tile: Tile) {
        if self.contains(tile) {
            self.walls.insert(tile);
        }
    }

    /// Whether a worker can stand on the tile.
    pub fn is_walkable(&self, tile: Tile) -> bool {
        self.contains(tile) && !self.walls.contains(&tile)
    }

    /// Walkable tiles adjacent to `tile` (8-directional).
    pub fn neighbors(&self, (x, y): Tile) -> Vec<Tile> {
        let mut result = Vec::with_capacity(8);
        for dy in [-1_i64, 0, 1] {
            for dx in [-1_i64, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = i64::from(x).checked_add(dx);
                let ny = i64::from(y).checked_add(dy);
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                let (Ok(nx), Ok(ny)) = (u32::try_from(nx), u32::try_from(ny)) else {
                    continue;
                };
                if self.is_walkable((nx, ny)) {
                    result.push((nx, ny));
                }
            }
        }
        result
    }

    /// Step distances from `start` to every reachable walkable tile.
    pub fn distances(&self, start: Tile) -> BTreeMap<Tile, u32> {
        let mut dist = BTreeMap::new();
        if !self.contains(start) {
            return dist;
        }
        let mut queue = VecDeque::new();
        dist.insert(start, 0_u32);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let current_dist = dist.get(&current).copied().unwrap_or(0);
            for next in self.neighbors(current) {
                if !dist.contains_key(&next) {
                    dist.insert(next, current_dist.saturating_add(1));
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    /// Cheapest step count from a distance map to any tile within `range`
    /// of `goal`, or `None` when no such tile was reached.
    pub fn cost_to(dist: &BTreeMap<Tile, u32>, goal: Tile, range: u32) -> Option<u32> {
        dist.iter()
            .filter(|(tile, _)| chebyshev(**tile, goal) <= range)
            .map(|(_, d)| *d)
            .min()
    }

    /// Shortest path from `start` to any tile within `range` of `goal`.
    ///
    /// The returned list excludes `start` and ends on the first tile found
    /// in range; it is empty when `start` is already in range. Returns
    /// `None` when no in-range tile is reachable.
    pub fn path(&self, start: Tile, goal: Tile, range: u32) -> Option<Vec<Tile>> {
        if chebyshev(start, goal) <= range {
            return Some(Vec::new());
        }
        if !self.contains(start) {
            return None;
        }

        let mut prev: BTreeMap<Tile, Tile> = BTreeMap::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        let mut reached = None;
        while let Some(current) = queue.pop_front() {
            if chebyshev(current, goal) <= range {
                reached = Some(current);
                break;
            }
            for next in self.neighbors(current) {
                if visited.insert(next) {
                    prev.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        let mut current = reached?;
        let mut path = VecDeque::new();
        while current != start {
            path.push_front(current);
            current = *prev.get(&current)?;
        }
        Some(path.into_iter().collect())
    }
}

/// Chebyshev distance between two tiles.
pub const fn chebyshev(a: Tile, b: Tile) -> u32 {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    if dx > dy { dx } else { dy }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_box(grid: &mut Grid, center: Tile) {
        for y in center.1.saturating_sub(1)..=center.1.saturating_add(1) {
            for x in center.0.saturating_sub(1)..=center.0.saturating_add(1) {
                if (x, y) != center {
                    grid.add_wall((x, y));
                }
            }
        }
    }

    #[test]
    fn path_in_open_grid_is_diagonal() {
        let grid = Grid::new(10, 10);
        let path = grid.path((0, 0), (5, 5), 1);
        assert_eq!(path.map(|p| p.len()), Some(4));
    }

    #[test]
    fn path_is_empty_when_already_in_range() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.path((4, 4), (5, 5), 1), Some(Vec::new()));
    }

    #[test]
    fn enclosed_goal_has_no_path() {
        let mut grid = Grid::new(10, 10);
        walled_box(&mut grid, (7, 7));
        assert!(grid.path((0, 0), (7, 7), 1).is_none());

        let dist = grid.distances((0, 0));
        assert_eq!(Grid::cost_to(&dist, (7, 7), 1), None);
    }

    #[test]
    fn walls_lengthen_paths() {
        let mut grid = Grid::new(10, 10);
        for y in 0..9 {
            grid.add_wall((3, y));
        }
        let dist = grid.distances((0, 0));
        let around = Grid::cost_to(&dist, (6, 0), 0);
        assert!(around.is_some_and(|c| c > 6));
    }

    #[test]
    fn out_of_bounds_walls_ignored() {
        let mut grid = Grid::new(3, 3);
        grid.add_wall((5, 5));
        assert!(grid.is_walkable((2, 2)));
        assert!(!grid.contains((5, 5)));
    }
}
