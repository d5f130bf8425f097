use super::types::{Direction, EdgeMode, FieldSize, Point};

/// Coordinate space and neighbor relation shared by search and simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridTopology {
    pub field_size: FieldSize,
    pub edge_mode: EdgeMode,
}

impl GridTopology {
    pub fn new(field_size: FieldSize, edge_mode: EdgeMode) -> Self {
        Self {
            field_size,
            edge_mode,
        }
    }

    pub fn square(size: usize, edge_mode: EdgeMode) -> Self {
        Self::new(FieldSize::square(size), edge_mode)
    }

    fn width(&self) -> i32 {
        self.field_size.width as i32
    }

    fn height(&self) -> i32 {
        self.field_size.height as i32
    }

    pub fn is_valid(&self, pos: Point) -> bool {
        (0..self.width()).contains(&pos.x) && (0..self.height()).contains(&pos.y)
    }

    /// Folds `pos` back onto the grid under `Wrapped`; identity under `Bounded`.
    pub fn wrap(&self, pos: Point) -> Point {
        match self.edge_mode {
            EdgeMode::Bounded => pos,
            EdgeMode::Wrapped => Point::new(
                pos.x.rem_euclid(self.width()),
                pos.y.rem_euclid(self.height()),
            ),
        }
    }

    pub fn offset(&self, pos: Point, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        Point::new(pos.x + dx, pos.y + dy)
    }

    pub fn step(&self, pos: Point, direction: Direction) -> Option<Point> {
        let next = self.wrap(self.offset(pos, direction));
        self.is_valid(next).then_some(next)
    }

    /// Up to four neighbors in [`Direction::SEARCH_ORDER`]. All four survive under `Wrapped`.
    pub fn neighbors(&self, pos: Point) -> Vec<Point> {
        Direction::SEARCH_ORDER
            .iter()
            .filter_map(|&direction| self.step(pos, direction))
            .collect()
    }

    pub fn direction_between(&self, from: Point, to: Point) -> Option<Direction> {
        Direction::SEARCH_ORDER
            .into_iter()
            .find(|&direction| self.step(from, direction) == Some(to))
    }

    pub fn distance(&self, a: Point, b: Point) -> u32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();

        match self.edge_mode {
            EdgeMode::Bounded => (dx + dy) as u32,
            EdgeMode::Wrapped => {
                let min_dx = dx.min(self.width() - dx);
                let min_dy = dy.min(self.height() - dy);
                (min_dx + min_dy) as u32
            }
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width() / 2, self.height() / 2)
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height()).flat_map(move |y| (0..self.width()).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_neighbors_always_four() {
        let topology = GridTopology::square(5, EdgeMode::Wrapped);
        let neighbors = topology.neighbors(Point::new(0, 0));
        assert_eq!(
            neighbors,
            vec![
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(0, 4),
                Point::new(4, 0),
            ]
        );
    }

    #[test]
    fn test_bounded_corner_filters_out_of_grid() {
        let topology = GridTopology::square(5, EdgeMode::Bounded);
        let neighbors = topology.neighbors(Point::new(0, 0));
        assert_eq!(neighbors, vec![Point::new(0, 1), Point::new(1, 0)]);

        let far = topology.neighbors(Point::new(4, 4));
        assert_eq!(far, vec![Point::new(4, 3), Point::new(3, 4)]);
    }

    #[test]
    fn test_wrap_is_identity_when_bounded() {
        let topology = GridTopology::square(5, EdgeMode::Bounded);
        let outside = Point::new(-1, 7);
        assert_eq!(topology.wrap(outside), outside);
        assert!(!topology.is_valid(outside));
    }

    #[test]
    fn test_wrap_folds_negative_and_overflow() {
        let topology = GridTopology::square(5, EdgeMode::Wrapped);
        assert_eq!(topology.wrap(Point::new(-1, 5)), Point::new(4, 0));
        assert_eq!(topology.wrap(Point::new(12, -6)), Point::new(2, 4));
    }

    #[test]
    fn test_step_off_edge() {
        let bounded = GridTopology::square(5, EdgeMode::Bounded);
        assert_eq!(bounded.step(Point::new(4, 2), Direction::Right), None);

        let wrapped = GridTopology::square(5, EdgeMode::Wrapped);
        assert_eq!(
            wrapped.step(Point::new(4, 2), Direction::Right),
            Some(Point::new(0, 2))
        );
    }

    #[test]
    fn test_direction_between_across_seam() {
        let topology = GridTopology::square(20, EdgeMode::Wrapped);
        assert_eq!(
            topology.direction_between(Point::new(0, 0), Point::new(0, 19)),
            Some(Direction::Up)
        );
        assert_eq!(
            topology.direction_between(Point::new(0, 0), Point::new(5, 5)),
            None
        );
    }

    #[test]
    fn test_distance_bounded_vs_wrapped() {
        let a = Point::new(0, 0);
        let b = Point::new(0, 19);
        assert_eq!(GridTopology::square(20, EdgeMode::Bounded).distance(a, b), 19);
        assert_eq!(GridTopology::square(20, EdgeMode::Wrapped).distance(a, b), 1);
    }

    #[test]
    fn test_cells_row_major() {
        let topology = GridTopology::new(
            FieldSize {
                width: 3,
                height: 2,
            },
            EdgeMode::Bounded,
        );
        let cells: Vec<Point> = topology.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Point::new(0, 0));
        assert_eq!(cells[3], Point::new(0, 1));
        assert_eq!(topology.center(), Point::new(1, 1));
    }
}
