//! Client-side session state machine.
//!
//! [`SessionMachine`] folds server events into a running [`Snapshot`]. Each
//! field is merged independently, so a `turn` update never disturbs a board
//! received earlier. The lifecycle only moves forward:
//!
//! ```text
//! connecting -> waiting -> active -> finished
//!      \           \          \         \
//!       +-----------+----------+---------+--> removed
//! ```
//!
//! Once `finished`, the board, turn and last move freeze. Once `removed`,
//! every further event is ignored.

use crate::board::{Board, Color, Point};
use crate::config::BOARD_SIZE;
use crate::domain::{GameResult, Mode, Player, SessionState};
use crate::protocol::ServerMessage;

/// One fully merged, read-only view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub state: SessionState,
    pub mode: Mode,
    pub board: Option<Board>,
    pub me: Option<Player>,
    pub enemy: Option<Player>,
    pub turn: Option<Color>,
    pub result: Option<GameResult>,
    pub last_move: Option<Point>,
}

impl Snapshot {
    /// Everything the board renderer needs, or `None` while any of board,
    /// players or turn is still missing.
    pub fn scene(&self) -> Option<Scene<'_>> {
        Some(Scene {
            board: self.board.as_ref()?,
            me: self.me.as_ref()?,
            enemy: self.enemy.as_ref()?,
            turn: self.turn?,
            state: self.state,
            mode: self.mode,
            result: self.result,
            last_move: self.last_move,
        })
    }
}

/// Borrowed view of a snapshot whose board, players and turn are all known.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: &'a Board,
    pub me: &'a Player,
    pub enemy: &'a Player,
    pub turn: Color,
    pub state: SessionState,
    pub mode: Mode,
    pub result: Option<GameResult>,
    pub last_move: Option<Point>,
}

impl<'a> Scene<'a> {
    /// The seated player holding `color`.
    pub fn player(&self, color: Color) -> &'a Player {
        if self.me.color == color {
            self.me
        } else {
            self.enemy
        }
    }

    /// The game has ended, either by a `finish` result or by the server
    /// moving the session to `finished` on its own.
    pub fn is_over(&self) -> bool {
        self.result.is_some() || self.state == SessionState::Finished
    }

    /// Whether a click may turn into a move command this frame.
    pub fn accepts_input(&self) -> bool {
        self.mode == Mode::Player && !self.is_over() && self.me.color == self.turn
    }
}

/// Effect of feeding one event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The snapshot changed and should be republished.
    Changed,
    /// Event was valid but carried nothing new.
    Unchanged,
    /// Event was dropped; the reason is for logging.
    Ignored(&'static str),
}

impl Transition {
    pub fn is_changed(self) -> bool {
        matches!(self, Transition::Changed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionMachine {
    current: Snapshot,
}

impl SessionMachine {
    /// Machine in the `connecting` state with nothing received yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn state(&self) -> SessionState {
        self.current.state
    }

    /// Fold one server event into the snapshot.
    pub fn apply(&mut self, msg: ServerMessage) -> Transition {
        if self.current.state.is_terminal() {
            return Transition::Ignored("session removed");
        }
        let frozen = self.current.state == SessionState::Finished;
        match msg {
            ServerMessage::Ok => {
                if self.current.state == SessionState::Connecting {
                    self.advance(SessionState::Waiting)
                } else {
                    Transition::Unchanged
                }
            }
            ServerMessage::State(next) => self.advance(next),
            ServerMessage::Mode(mode) => replace(&mut self.current.mode, mode),
            ServerMessage::Board(tiles) => {
                if frozen {
                    return Transition::Ignored("board is frozen after finish");
                }
                // both the bare 8x8 cells and the walled 10x10 grid are accepted
                let parsed = if tiles.len() == BOARD_SIZE * BOARD_SIZE {
                    Board::from_interior(BOARD_SIZE, BOARD_SIZE, tiles)
                } else {
                    Board::from_tiles(BOARD_SIZE, BOARD_SIZE, tiles)
                };
                match parsed {
                    Ok(board) => replace(&mut self.current.board, Some(board)),
                    Err(_) => Transition::Ignored("malformed board"),
                }
            }
            ServerMessage::Me(player) => replace(&mut self.current.me, Some(player)),
            ServerMessage::Enemy(player) => replace(&mut self.current.enemy, Some(player)),
            ServerMessage::Turn(color) => {
                if frozen {
                    return Transition::Ignored("turn is frozen after finish");
                }
                replace(&mut self.current.turn, Some(color))
            }
            ServerMessage::Finish(result) => {
                let changed = replace(&mut self.current.result, Some(result));
                match self.advance(SessionState::Finished) {
                    Transition::Changed => Transition::Changed,
                    _ => changed,
                }
            }
            ServerMessage::Put(point) => {
                if frozen {
                    return Transition::Ignored("last move is frozen after finish");
                }
                replace(&mut self.current.last_move, Some(point))
            }
        }
    }

    /// The connection dropped; the session is over for good.
    pub fn connection_lost(&mut self) -> Transition {
        self.advance(SessionState::Removed)
    }

    fn advance(&mut self, next: SessionState) -> Transition {
        let current = self.current.state;
        if next < current {
            Transition::Ignored("state would move backwards")
        } else if next == current {
            Transition::Unchanged
        } else {
            self.current.state = next;
            Transition::Changed
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> Transition {
    if *slot == value {
        Transition::Unchanged
    } else {
        *slot = value;
        Transition::Changed
    }
}
