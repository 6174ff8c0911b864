use crate::error::Result;
use crate::grid::Grid;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// A position on the grid (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Calculate Euclidean distance squared (avoid sqrt for comparisons)
    pub fn distance_squared(&self, other: &Position) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }

    /// Calculate Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// Towers whose own radius reaches `point` (Euclidean distance ≤ tower radius).
///
/// The relation is directional: a large-radius tower can be a neighbor of a
/// point that a small-radius tower at that point could never reach back.
pub fn neighbors(grid: &Grid, point: Position) -> Vec<Position> {
    let mut result: Vec<Position> = Vec::new();
    for tower in grid.towers() {
        let pos = tower.position;
        let reach = tower.radius as i64;
        if pos.distance_squared(&point) > reach * reach {
            continue;
        }
        if grid.is_obstacle(pos.y, pos.x) || result.contains(&pos) {
            continue;
        }
        result.push(pos);
    }
    result
}

/// Breadth-first path search over tower connectivity with a per-endpoint cache.
///
/// Cached paths are tied to the grid revision they were computed against;
/// the whole cache is dropped when a later query sees a changed grid.
#[derive(Debug, Default)]
pub struct PathFinder {
    cache: HashMap<(Position, Position), Vec<Position>>,
    revision: Option<u64>,
}

impl PathFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the first path (in BFS level order) from `start` to `end`.
    ///
    /// Returns an empty vector when `end` is unreachable; misses are not cached.
    /// Endpoints outside the grid fail with `OutOfBounds` before any search.
    pub fn find_path(&mut self, grid: &Grid, start: Position, end: Position) -> Result<Vec<Position>> {
        grid.check_bounds(start.y, start.x)?;
        grid.check_bounds(end.y, end.x)?;
        self.sync_revision(grid);

        if let Some(path) = self.cache.get(&(start, end)) {
            trace!("[find_path] cache hit ({},{}) -> ({},{})", start.x, start.y, end.x, end.y);
            return Ok(path.clone());
        }

        if grid.is_obstacle(start.y, start.x) || grid.is_obstacle(end.y, end.x) {
            debug!("[find_path] endpoint on obstacle - no path");
            return Ok(Vec::new());
        }

        let path = bfs(grid, start, end);
        if !path.is_empty() {
            self.cache.insert((start, end), path.clone());
        }
        Ok(path)
    }

    pub fn is_cached(&self, start: Position, end: Position) -> bool {
        self.cache.contains_key(&(start, end))
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn sync_revision(&mut self, grid: &Grid) {
        let revision = grid.revision();
        if self.revision != Some(revision) {
            if !self.cache.is_empty() {
                debug!(
                    "[find_path] grid revision changed {:?} -> {}, dropping {} cached paths",
                    self.revision,
                    revision,
                    self.cache.len()
                );
                self.cache.clear();
            }
            self.revision = Some(revision);
        }
    }
}

/// Nodes are only deduplicated against the path under construction, so the
/// same tower may be expanded again through a different path.
fn bfs(grid: &Grid, start: Position, end: Position) -> Vec<Position> {
    let mut queue: VecDeque<Vec<Position>> = VecDeque::new();
    queue.push_back(vec![start]);

    let mut iterations = 0usize;
    while let Some(path) = queue.pop_front() {
        iterations += 1;
        let Some(&node) = path.last() else {
            continue;
        };

        if node == end {
            debug!(
                "[find_path] FOUND PATH: {} hops after {} iterations: {}",
                path.len() - 1,
                iterations,
                format_path(&path)
            );
            return path;
        }

        for next in neighbors(grid, node) {
            if path.contains(&next) {
                continue;
            }
            let mut extended = path.clone();
            extended.push(next);
            queue.push_back(extended);
        }
    }

    debug!(
        "[find_path] NO PATH ({},{}) -> ({},{}) after {} iterations",
        start.x, start.y, end.x, end.y, iterations
    );
    Vec::new()
}

/// Format path for display
pub fn format_path(path: &[Position]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(|pos| format!("({},{})", pos.x, pos.y))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::place_tower;
    use crate::error::PlanError;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_distance() {
        assert_eq!(p(0, 0).distance_squared(&p(3, 4)), 25);
        assert!((p(0, 0).distance(&p(3, 4)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_neighbors_use_each_towers_own_radius() {
        let mut grid = Grid::open(5, 5).unwrap();
        place_tower(&mut grid, 0, 0, 3).unwrap();
        place_tower(&mut grid, 2, 0, 1).unwrap();

        assert_eq!(neighbors(&grid, p(0, 0)), vec![p(0, 0)]);
        assert_eq!(neighbors(&grid, p(2, 0)), vec![p(0, 0), p(2, 0)]);
        // Non-tower points are valid queries
        assert_eq!(neighbors(&grid, p(4, 4)), Vec::<Position>::new());
    }

    #[test]
    fn test_path_to_self() {
        let mut grid = Grid::open(3, 3).unwrap();
        place_tower(&mut grid, 1, 1, 1).unwrap();
        let mut finder = PathFinder::new();
        assert_eq!(finder.find_path(&grid, p(1, 1), p(1, 1)).unwrap(), vec![p(1, 1)]);
    }

    #[test]
    fn test_chain_of_towers() {
        let mut grid = Grid::open(1, 7).unwrap();
        place_tower(&mut grid, 0, 0, 2).unwrap();
        place_tower(&mut grid, 2, 0, 2).unwrap();
        place_tower(&mut grid, 4, 0, 2).unwrap();
        place_tower(&mut grid, 6, 0, 2).unwrap();

        let mut finder = PathFinder::new();
        let path = finder.find_path(&grid, p(0, 0), p(6, 0)).unwrap();
        assert_eq!(path, vec![p(0, 0), p(2, 0), p(4, 0), p(6, 0)]);
        assert_eq!(format_path(&path), "(0,0) -> (2,0) -> (4,0) -> (6,0)");
    }

    #[test]
    fn test_shortest_hop_count_wins() {
        let mut grid = Grid::open(1, 7).unwrap();
        place_tower(&mut grid, 0, 0, 1).unwrap();
        place_tower(&mut grid, 1, 0, 1).unwrap();
        place_tower(&mut grid, 2, 0, 1).unwrap();
        place_tower(&mut grid, 3, 0, 3).unwrap();

        let mut finder = PathFinder::new();
        // (3,0) reaches (0,0) directly with its radius of 3
        assert_eq!(finder.find_path(&grid, p(0, 0), p(3, 0)).unwrap(), vec![p(0, 0), p(3, 0)]);
    }

    #[test]
    fn test_asymmetric_reachability() {
        let mut grid = Grid::open(1, 5).unwrap();
        place_tower(&mut grid, 0, 0, 3).unwrap();
        place_tower(&mut grid, 2, 0, 1).unwrap();

        let mut finder = PathFinder::new();
        assert!(finder.find_path(&grid, p(0, 0), p(2, 0)).unwrap().is_empty());
        assert_eq!(finder.find_path(&grid, p(2, 0), p(0, 0)).unwrap(), vec![p(2, 0), p(0, 0)]);
    }

    #[test]
    fn test_cache_hits_and_misses() {
        let mut grid = Grid::open(1, 4).unwrap();
        place_tower(&mut grid, 0, 0, 2).unwrap();
        place_tower(&mut grid, 2, 0, 2).unwrap();

        let mut finder = PathFinder::new();
        finder.find_path(&grid, p(0, 0), p(2, 0)).unwrap();
        assert!(finder.is_cached(p(0, 0), p(2, 0)));

        assert!(finder.find_path(&grid, p(0, 0), p(3, 0)).unwrap().is_empty());
        assert!(!finder.is_cached(p(0, 0), p(3, 0)));
        assert_eq!(finder.cache_len(), 1);

        finder.clear_cache();
        assert_eq!(finder.cache_len(), 0);
    }

    #[test]
    fn test_cache_dropped_after_grid_changes() {
        let mut grid = Grid::open(1, 6).unwrap();
        place_tower(&mut grid, 0, 0, 2).unwrap();
        place_tower(&mut grid, 2, 0, 2).unwrap();

        let mut finder = PathFinder::new();
        finder.find_path(&grid, p(0, 0), p(2, 0)).unwrap();
        assert_eq!(finder.cache_len(), 1);

        place_tower(&mut grid, 5, 0, 3).unwrap();
        let path = finder.find_path(&grid, p(0, 0), p(5, 0)).unwrap();
        assert_eq!(path, vec![p(0, 0), p(2, 0), p(5, 0)]);
        assert!(!finder.is_cached(p(0, 0), p(2, 0)));
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = Grid::open(2, 2).unwrap();
        let mut finder = PathFinder::new();
        assert!(matches!(
            finder.find_path(&grid, p(-1, 0), p(1, 1)),
            Err(PlanError::OutOfBounds { .. })
        ));
        assert!(matches!(
            finder.find_path(&grid, p(0, 0), p(0, 2)),
            Err(PlanError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_obstacle_endpoint_has_no_path() {
        let mut grid = Grid::with_obstacles(1, 3, &[(0, 2)]).unwrap();
        place_tower(&mut grid, 0, 0, 5).unwrap();
        let mut finder = PathFinder::new();
        assert!(finder.find_path(&grid, p(0, 0), p(2, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_format_empty_path() {
        assert_eq!(format_path(&[]), "No path");
    }
}
