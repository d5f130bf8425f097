use crate::games::SessionRng;
use crate::{debug, log};
use super::bot_controller::BotController;
use super::settings::SnakeSettings;
use super::snake::Snake;
use super::topology::GridTopology;
use super::types::{CollisionKind, Direction, Point, SearchAlgorithm, SelfCollisionPolicy, TickStatus};

/// Outcome of one [`SnakeGameState::tick`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickResult {
    pub status: TickStatus,
    pub body: Vec<Point>,
    pub food: Option<Point>,
    pub score: u32,
    pub ate_food: bool,
}

/// Read-only snapshot handed to whatever draws the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderState {
    pub occupied_cells: Vec<Point>,
    pub food_cell: Option<Point>,
    pub score: u32,
    pub high_score: u32,
    pub status: TickStatus,
    pub tick: u64,
    pub field_width: usize,
    pub field_height: usize,
}

/// Owns the creature and the food and advances them one tick at a time.
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: Option<Point>,
    pub topology: GridTopology,
    pub collision_policy: SelfCollisionPolicy,
    pub search_algorithm: SearchAlgorithm,
    status: TickStatus,
    high_score: u32,
    tick_count: u64,
    rng: SessionRng,
}

impl SnakeGameState {
    pub fn new(
        topology: GridTopology,
        collision_policy: SelfCollisionPolicy,
        search_algorithm: SearchAlgorithm,
        rng: SessionRng,
    ) -> Self {
        let mut state = Self {
            snake: Snake::new(topology.center(), Direction::Right),
            food: None,
            topology,
            collision_policy,
            search_algorithm,
            status: TickStatus::Continuing,
            high_score: 0,
            tick_count: 0,
            rng,
        };
        state.reset();
        state
    }

    pub fn from_settings(settings: &SnakeSettings, rng: SessionRng) -> Self {
        Self::new(
            settings.topology(),
            settings.self_collision_policy,
            settings.search_algorithm,
            rng,
        )
    }

    pub fn status(&self) -> TickStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == TickStatus::Continuing
    }

    pub fn score(&self) -> u32 {
        self.snake.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Back to a fresh length-one snake at the center with a random heading.
    /// The high score survives.
    pub fn reset(&mut self) {
        let direction = self
            .rng
            .choose(&Direction::ALL)
            .copied()
            .unwrap_or(Direction::Right);
        self.snake = Snake::new(self.topology.center(), direction);
        self.status = TickStatus::Continuing;
        self.tick_count = 0;
        self.place_food();
        debug!(
            "Reset: head at ({}, {}) heading {:?}",
            self.snake.head().x,
            self.snake.head().y,
            direction
        );
    }

    /// Queues a heading change for the next tick. Reversals and requests
    /// against a finished world are refused.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.is_alive() || direction.is_opposite(&self.snake.direction) {
            return false;
        }
        self.snake.pending_direction = Some(direction);
        true
    }

    pub fn tick(&mut self, autopilot: bool) -> TickResult {
        if self.status.is_terminal() {
            return self.tick_result(false);
        }

        if let Some(direction) = self.snake.pending_direction.take() {
            self.snake.direction = direction;
        }

        // The path is planned against the body as it is before this move.
        if autopilot
            && let Some(direction) = BotController::calculate_move(self.search_algorithm, self)
        {
            self.snake.direction = direction;
        }

        self.tick_count += 1;

        let next_head = match self.calculate_next_head_position() {
            Ok(pos) => pos,
            Err(kind) => {
                self.terminate(kind);
                return self.tick_result(false);
            }
        };

        self.snake.push_head(next_head);

        let ate_food = self.food == Some(next_head);
        if ate_food {
            self.snake.target_length += 1;
            self.snake.score += 1;
            self.high_score = self.high_score.max(self.snake.score);
            log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.snake.score
            );
            self.place_food();
        } else {
            self.snake.trim_to_target();
        }

        self.tick_result(ate_food)
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            occupied_cells: self.snake.cells(),
            food_cell: self.food,
            score: self.snake.score,
            high_score: self.high_score,
            status: self.status,
            tick: self.tick_count,
            field_width: self.topology.field_size.width,
            field_height: self.topology.field_size.height,
        }
    }

    fn calculate_next_head_position(&self) -> Result<Point, CollisionKind> {
        let head = self.snake.head();
        let next_head = self
            .topology
            .wrap(self.topology.offset(head, self.snake.direction));

        if !self.topology.is_valid(next_head) {
            return Err(CollisionKind::Wall);
        }

        let grows = self.food == Some(next_head);
        if self
            .snake
            .collides_with_self(next_head, self.collision_policy, grows)
        {
            return Err(CollisionKind::SelfCollision);
        }

        Ok(next_head)
    }

    fn terminate(&mut self, kind: CollisionKind) {
        self.status = TickStatus::Collided(kind);
        log!(
            "Collision ({:?}) at tick {} heading {:?}. Final score: {}",
            kind,
            self.tick_count,
            self.snake.direction,
            self.snake.score
        );
    }

    /// Picks food uniformly among the free cells; with none left the board is filled.
    fn place_food(&mut self) {
        let free_cells: Vec<Point> = self
            .topology
            .cells()
            .filter(|cell| !self.snake.contains(cell))
            .collect();

        self.food = self.rng.choose(&free_cells).copied();
        match self.food {
            Some(pos) => debug!("Food placed at ({}, {})", pos.x, pos.y),
            None => {
                self.status = TickStatus::BoardFilled;
                log!("Board filled with score {}", self.snake.score);
            }
        }
    }

    fn tick_result(&self, ate_food: bool) -> TickResult {
        TickResult {
            status: self.status,
            body: self.snake.cells(),
            food: self.food,
            score: self.snake.score,
            ate_food,
        }
    }

    #[cfg(test)]
    fn place_snake(&mut self, body: Vec<Point>, direction: Direction) {
        self.snake = Snake::from_body(body, direction);
        self.status = TickStatus::Continuing;
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Option<Point>) {
        self.food = food;
    }
}
