use std::collections::{HashMap, HashSet, VecDeque};

use super::topology::GridTopology;
use super::types::{Point, SearchAlgorithm};

/// Frontier discipline shared by BFS (FIFO) and DFS (LIFO).
trait Frontier {
    fn push(&mut self, pos: Point);
    fn pop(&mut self) -> Option<Point>;
}

struct Queue(VecDeque<Point>);

impl Frontier for Queue {
    fn push(&mut self, pos: Point) {
        self.0.push_back(pos);
    }

    fn pop(&mut self) -> Option<Point> {
        self.0.pop_front()
    }
}

struct Stack(Vec<Point>);

impl Frontier for Stack {
    fn push(&mut self, pos: Point) {
        self.0.push(pos);
    }

    fn pop(&mut self) -> Option<Point> {
        self.0.pop()
    }
}

/// Shortest path in hop count from `start` to `target`, both endpoints included.
///
/// Ties between equal-length paths are broken by the fixed neighbor order of
/// [`GridTopology::neighbors`]. `target` is never obstacle-checked.
pub fn find_path_bfs(
    start: Point,
    target: Point,
    obstacles: &HashSet<Point>,
    topology: &GridTopology,
) -> Option<Vec<Point>> {
    search(Queue(VecDeque::new()), start, target, obstacles, topology)
}

/// Some path from `start` to `target`, not necessarily the shortest.
pub fn find_path_dfs(
    start: Point,
    target: Point,
    obstacles: &HashSet<Point>,
    topology: &GridTopology,
) -> Option<Vec<Point>> {
    search(Stack(Vec::new()), start, target, obstacles, topology)
}

pub fn find_path(
    algorithm: SearchAlgorithm,
    start: Point,
    target: Point,
    obstacles: &HashSet<Point>,
    topology: &GridTopology,
) -> Option<Vec<Point>> {
    match algorithm {
        SearchAlgorithm::Bfs => find_path_bfs(start, target, obstacles, topology),
        SearchAlgorithm::Dfs => find_path_dfs(start, target, obstacles, topology),
    }
}

/// First cell to move into on the way to `target`, or `None` when there is
/// nowhere to go (unreachable, or already there).
pub fn next_step(
    current: Point,
    target: Point,
    obstacles: &HashSet<Point>,
    topology: &GridTopology,
    algorithm: SearchAlgorithm,
) -> Option<Point> {
    let path = find_path(algorithm, current, target, obstacles, topology)?;
    path.get(1).copied()
}

fn search(
    mut frontier: impl Frontier,
    start: Point,
    target: Point,
    obstacles: &HashSet<Point>,
    topology: &GridTopology,
) -> Option<Vec<Point>> {
    if start == target {
        return Some(vec![start]);
    }

    let mut parents: HashMap<Point, Point> = HashMap::new();
    let mut visited: HashSet<Point> = HashSet::from([start]);
    frontier.push(start);

    while let Some(current) = frontier.pop() {
        for next in topology.neighbors(current) {
            if next == target {
                parents.insert(next, current);
                return Some(reconstruct_path(&parents, start, target));
            }
            if !visited.contains(&next) && !obstacles.contains(&next) {
                visited.insert(next);
                parents.insert(next, current);
                frontier.push(next);
            }
        }
    }

    None
}

fn reconstruct_path(parents: &HashMap<Point, Point>, start: Point, target: Point) -> Vec<Point> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::session_rng::SessionRng;
    use crate::games::snake::types::EdgeMode;

    fn no_obstacles() -> HashSet<Point> {
        HashSet::new()
    }

    fn assert_is_walk(path: &[Point], obstacles: &HashSet<Point>, topology: &GridTopology) {
        for pair in path.windows(2) {
            assert!(
                topology.neighbors(pair[0]).contains(&pair[1]),
                "{:?} -> {:?} is not a single step",
                pair[0],
                pair[1]
            );
        }
        if path.len() > 2 {
            for cell in &path[1..path.len() - 1] {
                assert!(!obstacles.contains(cell), "path crosses obstacle {:?}", cell);
            }
        }
    }

    /// Every cell on the ring at Chebyshev distance 1 around `center`, i.e. a closed wall.
    fn ring_around(center: Point) -> HashSet<Point> {
        let mut ring = HashSet::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx != 0 || dy != 0 {
                    ring.insert(Point::new(center.x + dx, center.y + dy));
                }
            }
        }
        ring
    }

    #[test]
    fn test_wrapped_seam_is_adjacent() {
        let topology = GridTopology::square(20, EdgeMode::Wrapped);
        let path = find_path_bfs(Point::new(0, 0), Point::new(0, 19), &no_obstacles(), &topology);
        assert_eq!(path, Some(vec![Point::new(0, 0), Point::new(0, 19)]));
    }

    #[test]
    fn test_bounded_walks_the_edge() {
        let topology = GridTopology::square(20, EdgeMode::Bounded);
        let path = find_path_bfs(Point::new(0, 0), Point::new(0, 19), &no_obstacles(), &topology)
            .expect("open grid is connected");
        assert_eq!(path.len() - 1, 19);
        assert!(path.iter().all(|p| p.x == 0));
    }

    #[test]
    fn test_bfs_length_equals_distance_on_open_grid() {
        let mut rng = SessionRng::new(42);
        for edge_mode in [EdgeMode::Bounded, EdgeMode::Wrapped] {
            let topology = GridTopology::square(12, edge_mode);
            for _ in 0..50 {
                let a = Point::new(rng.random_range(0..12), rng.random_range(0..12));
                let b = Point::new(rng.random_range(0..12), rng.random_range(0..12));
                let path = find_path_bfs(a, b, &no_obstacles(), &topology)
                    .expect("open grid is connected");
                assert_eq!((path.len() - 1) as u32, topology.distance(a, b));
                assert_is_walk(&path, &no_obstacles(), &topology);
            }
        }
    }

    #[test]
    fn test_bfs_never_longer_than_dfs() {
        let mut rng = SessionRng::new(42);
        for edge_mode in [EdgeMode::Bounded, EdgeMode::Wrapped] {
            let topology = GridTopology::square(10, edge_mode);
            for _ in 0..40 {
                let obstacles: HashSet<Point> = (0..25)
                    .map(|_| Point::new(rng.random_range(0..10), rng.random_range(0..10)))
                    .collect();
                let a = Point::new(rng.random_range(0..10), rng.random_range(0..10));
                let b = Point::new(rng.random_range(0..10), rng.random_range(0..10));

                let bfs = find_path_bfs(a, b, &obstacles, &topology);
                let dfs = find_path_dfs(a, b, &obstacles, &topology);
                assert_eq!(bfs.is_some(), dfs.is_some());
                if let (Some(bfs), Some(dfs)) = (bfs, dfs) {
                    assert!(bfs.len() <= dfs.len());
                    assert_is_walk(&bfs, &obstacles, &topology);
                    assert_is_walk(&dfs, &obstacles, &topology);
                    assert_eq!(dfs.first(), Some(&a));
                    assert_eq!(dfs.last(), Some(&b));
                }
            }
        }
    }

    #[test]
    fn test_enclosed_target_has_no_path() {
        let topology = GridTopology::square(10, EdgeMode::Bounded);
        let target = Point::new(5, 5);
        let walls = ring_around(target);
        assert_eq!(find_path_bfs(Point::new(0, 0), target, &walls, &topology), None);
        assert_eq!(find_path_dfs(Point::new(0, 0), target, &walls, &topology), None);
    }

    #[test]
    fn test_enclosed_start_has_no_path() {
        let topology = GridTopology::square(10, EdgeMode::Wrapped);
        let start = Point::new(0, 0);
        let walls: HashSet<Point> = ring_around(start)
            .into_iter()
            .map(|p| topology.wrap(p))
            .collect();
        assert_eq!(find_path_bfs(start, Point::new(5, 5), &walls, &topology), None);
        assert_eq!(find_path_dfs(start, Point::new(5, 5), &walls, &topology), None);
    }

    #[test]
    fn test_start_equals_target() {
        let topology = GridTopology::square(10, EdgeMode::Bounded);
        let p = Point::new(3, 3);
        assert_eq!(find_path_bfs(p, p, &no_obstacles(), &topology), Some(vec![p]));
        assert_eq!(find_path_dfs(p, p, &no_obstacles(), &topology), Some(vec![p]));
        assert_eq!(
            next_step(p, p, &no_obstacles(), &topology, SearchAlgorithm::Bfs),
            None
        );
    }

    #[test]
    fn test_target_inside_obstacles_is_still_reachable() {
        let topology = GridTopology::square(10, EdgeMode::Bounded);
        let target = Point::new(2, 0);
        let obstacles = HashSet::from([target]);
        let path = find_path_bfs(Point::new(0, 0), target, &obstacles, &topology);
        assert_eq!(
            path,
            Some(vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)])
        );
    }

    #[test]
    fn test_start_inside_obstacles_is_not_rejected() {
        let topology = GridTopology::square(10, EdgeMode::Bounded);
        let start = Point::new(4, 4);
        let obstacles = HashSet::from([start]);
        let path = find_path_bfs(start, Point::new(4, 6), &obstacles, &topology);
        assert_eq!(path.map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_tie_break_prefers_down_then_right() {
        let topology = GridTopology::square(10, EdgeMode::Bounded);
        let path = find_path_bfs(Point::new(0, 0), Point::new(1, 1), &no_obstacles(), &topology);
        assert_eq!(
            path,
            Some(vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)])
        );
    }

    #[test]
    fn test_bfs_routes_around_wall() {
        let topology = GridTopology::square(5, EdgeMode::Bounded);
        // vertical wall at x = 2 with a gap at y = 4
        let wall: HashSet<Point> = (0..4).map(|y| Point::new(2, y)).collect();
        let path = find_path_bfs(Point::new(0, 0), Point::new(4, 0), &wall, &topology)
            .expect("gap at the bottom");
        assert_eq!(path.len() - 1, 12);
        assert_is_walk(&path, &wall, &topology);
    }

    #[test]
    fn test_dfs_is_deterministic() {
        let topology = GridTopology::square(8, EdgeMode::Wrapped);
        let obstacles = HashSet::from([Point::new(3, 3), Point::new(3, 4), Point::new(4, 3)]);
        let first = find_path_dfs(Point::new(0, 0), Point::new(6, 6), &obstacles, &topology);
        let second = find_path_dfs(Point::new(0, 0), Point::new(6, 6), &obstacles, &topology);
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_next_step_is_second_path_cell() {
        let topology = GridTopology::square(20, EdgeMode::Wrapped);
        let step = next_step(
            Point::new(0, 0),
            Point::new(0, 19),
            &no_obstacles(),
            &topology,
            SearchAlgorithm::Dfs,
        );
        assert_eq!(step, Some(Point::new(0, 19)));

        let walls = ring_around(Point::new(10, 10));
        let blocked = next_step(
            Point::new(0, 0),
            Point::new(10, 10),
            &walls,
            &topology,
            SearchAlgorithm::Bfs,
        );
        assert_eq!(blocked, None);
    }
}
