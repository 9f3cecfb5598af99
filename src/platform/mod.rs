//! Platform abstraction layer
//!
//! Maps raw key names (browser `KeyboardEvent.key` values) to game commands.

use crate::sim::Direction;

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Turn(Direction),
    PauseToggle,
    Start,
}

/// Translate a key name. Arrows and WASD steer, P or space pauses, Enter starts.
pub fn map_key(key: &str) -> Option<InputCommand> {
    let command = match key {
        "ArrowUp" => InputCommand::Turn(Direction::Up),
        "ArrowDown" => InputCommand::Turn(Direction::Down),
        "ArrowLeft" => InputCommand::Turn(Direction::Left),
        "ArrowRight" => InputCommand::Turn(Direction::Right),
        " " => InputCommand::PauseToggle,
        "Enter" => InputCommand::Start,
        _ => match key.to_ascii_lowercase().as_str() {
            "w" => InputCommand::Turn(Direction::Up),
            "s" => InputCommand::Turn(Direction::Down),
            "a" => InputCommand::Turn(Direction::Left),
            "d" => InputCommand::Turn(Direction::Right),
            "p" => InputCommand::PauseToggle,
            _ => return None,
        },
    };
    Some(command)
}
