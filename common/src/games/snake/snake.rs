use std::collections::{HashMap, HashSet, VecDeque};

use super::types::{Direction, Point, SelfCollisionPolicy};

/// The creature: body cells head-first plus its heading.
///
/// `body` is never empty. Cells are counted rather than stored in a set because
/// the lenient policy lets the head re-enter the neck, so one cell can be held twice.
#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    occupancy: HashMap<Point, usize>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
    pub target_length: usize,
    pub score: u32,
}

impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        Self::from_body([start_pos], direction)
    }

    /// Builds a snake from cells listed head-first.
    pub fn from_body(cells: impl IntoIterator<Item = Point>, direction: Direction) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            occupancy: HashMap::new(),
            direction,
            pending_direction: None,
            target_length: 0,
            score: 0,
        };
        for cell in cells {
            snake.push_tail(cell);
        }
        snake.target_length = snake.body.len().max(1);
        snake
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: &Point) -> bool {
        self.occupancy.contains_key(pos)
    }

    pub fn cells(&self) -> Vec<Point> {
        self.body.iter().copied().collect()
    }

    pub fn push_head(&mut self, pos: Point) {
        self.body.push_front(pos);
        *self.occupancy.entry(pos).or_insert(0) += 1;
    }

    fn push_tail(&mut self, pos: Point) {
        self.body.push_back(pos);
        *self.occupancy.entry(pos).or_insert(0) += 1;
    }

    /// Drops tail cells until the body is back at `target_length`.
    pub fn trim_to_target(&mut self) {
        while self.body.len() > self.target_length {
            let Some(tail) = self.body.pop_back() else {
                break;
            };
            if let Some(count) = self.occupancy.get_mut(&tail) {
                *count -= 1;
                if *count == 0 {
                    self.occupancy.remove(&tail);
                }
            }
        }
    }

    /// Whether moving the head onto `next` hits the body under `policy`.
    /// `grows` tells whether the tail stays put this tick.
    pub fn collides_with_self(&self, next: Point, policy: SelfCollisionPolicy, grows: bool) -> bool {
        match policy {
            SelfCollisionPolicy::Strict => self.contains(&next),
            SelfCollisionPolicy::TailVacates => {
                self.contains(&next) && (grows || next != self.tail() || self.count(&next) > 1)
            }
            SelfCollisionPolicy::Lenient => self
                .body
                .iter()
                .skip(SelfCollisionPolicy::LENIENT_SKIP)
                .any(|&cell| cell == next),
        }
    }

    /// Cells a path search must route around.
    pub fn obstacles(&self, policy: SelfCollisionPolicy) -> HashSet<Point> {
        let mut cells: HashSet<Point> = self.occupancy.keys().copied().collect();
        if policy == SelfCollisionPolicy::TailVacates && self.count(&self.tail()) == 1 {
            cells.remove(&self.tail());
        }
        cells
    }

    fn count(&self, pos: &Point) -> usize {
        self.occupancy.get(pos).copied().unwrap_or(0)
    }
}
