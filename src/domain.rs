//! Session-level value types shared by the protocol, the state machine and
//! the renderer.

use alloc::string::String;
use core::fmt;

use crate::board::Color;

/// A seated player as announced by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub nickname: String,
    pub color: Color,
}

impl Player {
    pub fn new(nickname: impl Into<String>, color: Color) -> Self {
        Self {
            nickname: nickname.into(),
            color,
        }
    }
}

/// Whether this client may issue moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Player,
    #[default]
    Watcher,
}

/// Lifecycle of one session as seen by the client.
///
/// Variants are declared in lifecycle order; the state machine never moves
/// to an earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    #[default]
    Connecting,
    Waiting,
    Active,
    Finished,
    Removed,
}

impl SessionState {
    /// No event can leave this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Removed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connecting => "connecting",
            SessionState::Waiting => "waiting",
            SessionState::Active => "active",
            SessionState::Finished => "finished",
            SessionState::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    Win(Color),
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Win(color) => Some(color),
            GameResult::Draw => None,
        }
    }
}
