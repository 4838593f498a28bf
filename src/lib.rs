#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod board;
pub mod config;
pub mod domain;
pub mod framebuffer;
pub mod nickname;
pub mod protocol;
pub mod render;
pub mod session;

#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;
#[cfg(feature = "window")]
pub mod window;

pub use board::{Board, BoardError, Color, Point, Tile};
pub use config::*;
pub use domain::{GameResult, Mode, Player, SessionState};
pub use framebuffer::FrameBuffer;
pub use nickname::{Nickname, NicknameError};
pub use protocol::{ClientMessage, ServerMessage};
pub use render::{BoardView, ButtonEdge, Canvas, Pixel, Pointer, PointerSample, Rgba, TextAlign};
pub use session::{Scene, SessionMachine, Snapshot, Transition};

#[cfg(feature = "std")]
pub use client::{SessionClient, SnapshotReceiver};
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
