use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use common::games::snake::{SnakeGameState, SnakeSettings, TickStatus};
use common::{debug, log};

use crate::commands::SessionCommand;
use crate::sink::FrameSink;

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub tick_interval: Duration,
    pub autopilot: bool,
    pub auto_reset: bool,
    pub max_ticks: Option<u64>,
}

impl SessionOptions {
    pub fn from_settings(settings: &SnakeSettings, max_ticks: Option<u64>) -> Self {
        Self {
            tick_interval: settings.tick_interval(),
            autopilot: settings.autopilot,
            auto_reset: settings.auto_reset,
            max_ticks,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub game_number: u32,
    pub status: TickStatus,
    pub score: u32,
    pub high_score: u32,
    pub tick: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: u64,
    pub games: u32,
    pub score: u32,
    pub high_score: u32,
    pub final_status: TickStatus,
}

/// Drives `state` at a fixed pace until quit, tick limit, or a terminal state
/// that is not auto-reset. Board filled always ends the session.
pub async fn run_session<S: FrameSink>(
    mut state: SnakeGameState,
    options: SessionOptions,
    sink: S,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
) -> SessionSummary {
    // tokio rejects a zero period
    let mut tick_timer = interval(options.tick_interval.max(Duration::from_millis(1)));
    tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut autopilot = options.autopilot;
    let mut paused = false;
    let mut ticks: u64 = 0;
    let mut game_number: u32 = 1;

    log!(
        "Session started: seed {}, autopilot {}",
        state.seed(),
        if autopilot { "on" } else { "off" }
    );

    loop {
        tokio::select! {
            _ = tick_timer.tick() => {
                if paused {
                    continue;
                }

                let result = state.tick(autopilot);
                ticks += 1;
                sink.present(state.render_state()).await;

                if result.status.is_terminal() {
                    sink.game_over(GameOver {
                        game_number,
                        status: result.status,
                        score: result.score,
                        high_score: state.high_score(),
                        tick: state.tick_count(),
                    }).await;

                    let collided = matches!(result.status, TickStatus::Collided(_));
                    if !(collided && options.auto_reset) {
                        break;
                    }
                    state.reset();
                    game_number += 1;
                }

                if let Some(limit) = options.max_ticks
                    && ticks >= limit
                {
                    debug!("Tick limit {} reached", limit);
                    break;
                }
            }
            Some(command) = commands.recv() => {
                match command {
                    SessionCommand::Turn(direction) => {
                        if !state.set_direction(direction) {
                            debug!("Ignored turn to {:?}", direction);
                        }
                    }
                    SessionCommand::TogglePause => {
                        paused = !paused;
                        log!("{}", if paused { "Paused" } else { "Resumed" });
                    }
                    SessionCommand::ToggleAutopilot => {
                        autopilot = !autopilot;
                        log!("Autopilot {}", if autopilot { "on" } else { "off" });
                    }
                    SessionCommand::Reset => {
                        state.reset();
                        game_number += 1;
                        log!("Reset requested, starting game {}", game_number);
                    }
                    SessionCommand::Quit => {
                        break;
                    }
                }
            }
        }
    }

    SessionSummary {
        seed: state.seed(),
        ticks,
        games: game_number,
        score: state.score(),
        high_score: state.high_score(),
        final_status: state.status(),
    }
}
