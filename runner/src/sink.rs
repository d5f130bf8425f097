use std::future::Future;
use std::io::Write;

use common::games::snake::{RenderState, TickStatus};
use common::{debug, log};

use crate::session::GameOver;

/// Receives every frame the session produces. The engine never draws; this is
/// where a host plugs its own output in.
pub trait FrameSink: Send + Sync + Clone + 'static {
    fn present(&self, frame: RenderState) -> impl Future<Output = ()> + Send;

    fn game_over(&self, game_over: GameOver) -> impl Future<Output = ()> + Send;
}

/// Redraws the whole grid as text on every tick.
#[derive(Clone, Default)]
pub struct TerminalSink;

impl FrameSink for TerminalSink {
    async fn present(&self, frame: RenderState) {
        let text = render_frame(&frame);
        let mut stdout = std::io::stdout().lock();
        // clear screen, cursor home
        let written = write!(stdout, "\x1b[2J\x1b[H{}", text).and_then(|_| stdout.flush());
        if let Err(e) = written {
            log!("Failed to draw frame: {}", e);
        }
    }

    async fn game_over(&self, game_over: GameOver) {
        log!("{}", describe_game_over(&game_over));
    }
}

/// Headless output: one debug line per tick, one log line per finished game.
#[derive(Clone, Default)]
pub struct LogSink;

impl FrameSink for LogSink {
    async fn present(&self, frame: RenderState) {
        if let Some(head) = frame.occupied_cells.first() {
            debug!(
                "tick {} head ({}, {}) length {} score {}",
                frame.tick,
                head.x,
                head.y,
                frame.occupied_cells.len(),
                frame.score
            );
        }
    }

    async fn game_over(&self, game_over: GameOver) {
        log!("{}", describe_game_over(&game_over));
    }
}

pub fn describe_game_over(game_over: &GameOver) -> String {
    let outcome = match game_over.status {
        TickStatus::Continuing => "stopped".to_string(),
        TickStatus::Collided(kind) => format!("collided ({:?})", kind),
        TickStatus::BoardFilled => "board filled".to_string(),
    };
    format!(
        "Game {} {} after {} ticks. Score: {}, high score: {}",
        game_over.game_number, outcome, game_over.tick, game_over.score, game_over.high_score
    )
}

pub fn render_frame(frame: &RenderState) -> String {
    let mut rows = vec![vec!['.'; frame.field_width]; frame.field_height];
    let mut put = |x: i32, y: i32, glyph: char| {
        if let Some(cell) = rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = glyph;
        }
    };

    if let Some(food) = frame.food_cell {
        put(food.x, food.y, '*');
    }
    for cell in frame.occupied_cells.iter().skip(1) {
        put(cell.x, cell.y, 'o');
    }
    if let Some(head) = frame.occupied_cells.first() {
        put(head.x, head.y, '@');
    }

    let mut text = format!(
        "score {}  high {}  tick {}  {:?}\n",
        frame.score, frame.high_score, frame.tick, frame.status
    );
    for row in rows {
        text.extend(row);
        text.push('\n');
    }
    text
}
