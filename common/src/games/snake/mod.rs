mod bot_controller;
mod game_state;
pub mod pathfinding;
mod settings;
mod snake;
mod topology;
mod types;

pub use bot_controller::BotController;
pub use game_state::{RenderState, SnakeGameState, TickResult};
pub use pathfinding::{find_path, find_path_bfs, find_path_dfs, next_step};
pub use settings::{MAX_GRID_SIZE, MAX_TICK_INTERVAL_MS, MIN_GRID_SIZE, SnakeSettings};
pub use snake::Snake;
pub use topology::GridTopology;
pub use types::{
    CollisionKind, Direction, EdgeMode, FieldSize, Point, SearchAlgorithm, SelfCollisionPolicy,
    TickStatus,
};
