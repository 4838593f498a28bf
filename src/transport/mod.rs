use crate::protocol::{ClientMessage, ServerMessage};

/// Bidirectional message channel to the game server.
///
/// `recv` must be cancel-safe: the session driver polls it inside
/// `tokio::select!` next to the heartbeat timer, and a dropped `recv` future
/// must not lose a partially read message.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: ClientMessage) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<ServerMessage>;
}

pub mod in_memory;
pub mod tcp;
