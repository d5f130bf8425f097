use std::io::BufRead;

use tokio::sync::mpsc;

use common::games::snake::Direction;
use common::log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    TogglePause,
    ToggleAutopilot,
    Reset,
    Quit,
}

pub fn parse_command(line: &str) -> Option<SessionCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => SessionCommand::Turn(Direction::Up),
        "s" | "down" => SessionCommand::Turn(Direction::Down),
        "a" | "left" => SessionCommand::Turn(Direction::Left),
        "d" | "right" => SessionCommand::Turn(Direction::Right),
        "p" | "pause" => SessionCommand::TogglePause,
        "t" | "auto" | "autopilot" => SessionCommand::ToggleAutopilot,
        "r" | "reset" => SessionCommand::Reset,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Reads commands line by line on a dedicated thread so a pending blocking
/// read never holds up runtime shutdown.
pub fn spawn_stdin_reader(tx: mpsc::UnboundedSender<SessionCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log!("Failed to read input: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                None => log!("Unknown command: {}", line.trim()),
            }
        }
    });
}
