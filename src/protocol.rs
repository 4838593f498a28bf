use alloc::string::String;
use alloc::vec::Vec;

use crate::board::{Color, Point, Tile};
use crate::domain::{GameResult, Mode, Player, SessionState};

/// Messages sent from this client to the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientMessage {
    /// One-time identification sent right after connecting.
    Client { nickname: String },
    /// Liveness ping.
    Heartbeat,
    /// Place a tile at the given cell.
    Put(Point),
}

/// Messages pushed by the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ServerMessage {
    /// Identification accepted.
    Ok,
    State(SessionState),
    Mode(Mode),
    /// Full board replacement, row-major with the wall border.
    Board(Vec<Tile>),
    Me(Player),
    Enemy(Player),
    Turn(Color),
    Finish(GameResult),
    /// Most recent move, display only.
    Put(Point),
}
