use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::topology::GridTopology;
use super::types::{EdgeMode, SearchAlgorithm, SelfCollisionPolicy};

pub const MIN_GRID_SIZE: usize = 2;
pub const MAX_GRID_SIZE: usize = 200;
pub const MAX_TICK_INTERVAL_MS: u64 = 5000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    pub grid_size: usize,
    pub edge_mode: EdgeMode,
    pub self_collision_policy: SelfCollisionPolicy,
    pub search_algorithm: SearchAlgorithm,
    pub autopilot: bool,
    pub auto_reset: bool,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: 30,
            edge_mode: EdgeMode::Wrapped,
            self_collision_policy: SelfCollisionPolicy::Lenient,
            search_algorithm: SearchAlgorithm::Bfs,
            autopilot: true,
            auto_reset: true,
            tick_interval_ms: 100,
            seed: None,
            verbose: false,
        }
    }
}

impl SnakeSettings {
    pub fn topology(&self) -> GridTopology {
        GridTopology::square(self.grid_size, self.edge_mode)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(format!(
                "Grid size must be between {} and {}",
                MIN_GRID_SIZE, MAX_GRID_SIZE
            ));
        }
        if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(format!(
                "Tick interval must be at most {}ms",
                MAX_TICK_INTERVAL_MS
            ));
        }
        Ok(())
    }
}
