//! Top-level game state machine.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossReason {
    OutOfLives,
    /// The enemy grid reached the ship line.
    Overrun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost(LossReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
    GameOver(Outcome),
    HighScores,
    Controls,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameState::Playing)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Menu => write!(f, "menu"),
            GameState::Playing => write!(f, "playing"),
            GameState::GameOver(Outcome::Won) => write!(f, "game over (won)"),
            GameState::GameOver(Outcome::Lost(LossReason::OutOfLives)) => {
                write!(f, "game over (out of lives)")
            }
            GameState::GameOver(Outcome::Lost(LossReason::Overrun)) => {
                write!(f, "game over (overrun)")
            }
            GameState::HighScores => write!(f, "high scores"),
            GameState::Controls => write!(f, "controls"),
        }
    }
}

/// Requests coming from menus and panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    ToMenu,
    ShowHighScores,
    ShowControls,
    Back,
}

/// The state `command` leads to from `state`, or `None` if the command
/// means nothing there. Losing and winning are not commands; the
/// simulation enters `GameOver` itself.
pub fn transition(state: GameState, command: Command) -> Option<GameState> {
    use Command::*;
    use GameState::*;

    match (state, command) {
        (Menu, Start) => Some(Playing),
        (Menu, ShowHighScores) => Some(HighScores),
        (Menu, ShowControls) => Some(Controls),
        (HighScores | Controls, Back) => Some(Menu),
        (GameOver(_), Restart) => Some(Playing),
        (GameOver(_), ToMenu) => Some(Menu),
        _ => None,
    }
}
