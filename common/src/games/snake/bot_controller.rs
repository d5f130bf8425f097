use super::game_state::SnakeGameState;
use super::pathfinding;
use super::types::{Direction, SearchAlgorithm};

/// Autopilot: turns a path search toward the food into a heading.
pub struct BotController;

impl BotController {
    /// `None` means keep the current heading: the snake is not alive, there is
    /// no food, or the food cannot be reached.
    pub fn calculate_move(algorithm: SearchAlgorithm, state: &SnakeGameState) -> Option<Direction> {
        if !state.is_alive() {
            return None;
        }

        let food = state.food?;
        let head = state.snake.head();
        let obstacles = state.snake.obstacles(state.collision_policy);

        let next = pathfinding::next_step(head, food, &obstacles, &state.topology, algorithm)?;
        state.topology.direction_between(head, next)
    }
}
